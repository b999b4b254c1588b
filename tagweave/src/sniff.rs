//! Byte signature sniffing
//!
//! Used by dispatch as a last resort, when neither a content type nor a path resolved a parser.

use crate::mpeg::header::verify_frame_sync;

/// The number of bytes dispatch peeks before sniffing
///
/// This covers the longest signature checked, so a shorter buffer only means a stream that is
/// shorter than this.
pub const SNIFF_BUFFER_SIZE: usize = 4100;

const ASF_HEADER_GUID: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

/// Guess the MIME type of a stream from its first bytes
///
/// This recognizes more than tagweave can parse (Musepack, MIDI, MP4 video), those MIME types
/// simply fail to resolve a parser afterwards.
///
/// # Examples
///
/// ```rust
/// use tagweave::sniff::guess_mime_type;
///
/// assert_eq!(guess_mime_type(b"fLaC\0\0\0\x22"), Some("audio/x-flac"));
/// assert_eq!(guess_mime_type(b"ID3\x04\0\0\0\0\0\0"), Some("audio/mpeg"));
/// assert_eq!(guess_mime_type(b"plain text"), None);
/// ```
pub fn guess_mime_type(buf: &[u8]) -> Option<&'static str> {
	if buf.len() < 2 {
		return None;
	}

	match buf[0] {
		b'I' if buf.starts_with(b"ID3") => Some("audio/mpeg"),
		0xFF if verify_frame_sync([buf[0], buf[1]]) => {
			// ADTS and MPEG frame sync overlap. ADTS has a layer of 0b00, which
			// is reserved in MPEG.
			if buf[1] & 0b0000_0110 == 0 {
				return Some("audio/aac");
			}

			Some("audio/mpeg")
		},
		b'f' if buf.starts_with(b"fLaC") => Some("audio/x-flac"),
		b'O' if buf.starts_with(b"OggS") => Some("audio/ogg"),
		b'R' if buf.len() >= 12 && buf.starts_with(b"RIFF") && &buf[8..12] == b"WAVE" => {
			Some("audio/x-wav")
		},
		b'F' if buf.len() >= 12 && buf.starts_with(b"FORM") => match &buf[8..12] {
			b"AIFF" | b"AIFC" => Some("audio/x-aiff"),
			_ => None,
		},
		b'M' if buf.starts_with(b"MAC ") => Some("audio/ape"),
		b'M' if buf.starts_with(b"MPCK") || buf.starts_with(b"MP+") => Some("audio/x-musepack"),
		b'M' if buf.starts_with(b"MThd") => Some("audio/midi"),
		b'w' if buf.starts_with(b"wvpk") => Some("audio/wavpack"),
		0x30 if buf.starts_with(&ASF_HEADER_GUID) => Some("video/x-ms-asf"),
		_ if buf.len() >= 12 && &buf[4..8] == b"ftyp" => match &buf[8..12] {
			b"M4A " | b"M4B " | b"M4P " => Some("audio/x-m4a"),
			_ => Some("video/mp4"),
		},
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::guess_mime_type;

	#[test_log::test]
	fn signatures() {
		let cases: [(&[u8], &str); 11] = [
			(b"ID3\x03\0\0\0\0\0\0", "audio/mpeg"),
			(&[0xFF, 0xFB, 0x90, 0x64], "audio/mpeg"),
			(&[0xFF, 0xF1, 0x50, 0x80], "audio/aac"),
			(b"fLaC\0\0\0\x22", "audio/x-flac"),
			(b"OggS\0\x02", "audio/ogg"),
			(b"RIFF\0\0\0\0WAVEfmt ", "audio/x-wav"),
			(b"FORM\0\0\0\0AIFC", "audio/x-aiff"),
			(b"MAC \x96\x0f", "audio/ape"),
			(b"wvpk\0\0\0\0", "audio/wavpack"),
			(b"MPCK", "audio/x-musepack"),
			(b"MThd\0\0\0\x06", "audio/midi"),
		];

		for (signature, mime_type) in cases {
			assert_eq!(guess_mime_type(signature), Some(mime_type), "{signature:?}");
		}
	}

	#[test_log::test]
	fn asf_guid() {
		let mut header = super::ASF_HEADER_GUID.to_vec();
		header.extend([0; 14]);
		assert_eq!(guess_mime_type(&header), Some("video/x-ms-asf"));
	}

	#[test_log::test]
	fn mp4_brands() {
		assert_eq!(guess_mime_type(b"\0\0\0\x20ftypM4A \0\0\0\0"), Some("audio/x-m4a"));
		assert_eq!(guess_mime_type(b"\0\0\0\x20ftypisom\0\0\0\0"), Some("video/mp4"));
	}

	#[test_log::test]
	fn unrecognized() {
		assert_eq!(guess_mime_type(b""), None);
		assert_eq!(guess_mime_type(b"R"), None);
		assert_eq!(guess_mime_type(b"RIFF\0\0\0\0AVI "), None);
		assert_eq!(guess_mime_type(b"FORM\0\0\0\08SVX"), None);
		assert_eq!(guess_mime_type(&[0; 64]), None);
	}
}
