use crate::error::Result;
use crate::macros::err;

/// The text encodings used by ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub(crate) enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub(crate) fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}
}

/// Decode an entire buffer with `encoding`, trimming trailing nulls
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	match encoding {
		TextEncoding::Latin1 => Ok(latin1_decode(bytes)),
		TextEncoding::UTF16 => {
			if bytes.len() < 2 {
				err!(TextDecode("UTF-16 string has an invalid length (< 2)"));
			}

			match [bytes[0], bytes[1]] {
				[0xFE, 0xFF] => utf16_decode_bytes(&bytes[2..], u16::from_be_bytes),
				[0xFF, 0xFE] => utf16_decode_bytes(&bytes[2..], u16::from_le_bytes),
				// Some encoders only write a BOM on the first string of a frame
				_ => utf16_decode_bytes(bytes, u16::from_le_bytes),
			}
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes),
		TextEncoding::UTF8 => utf8_decode(bytes.to_vec()),
	}
}

/// Split `bytes` at the first terminator for `encoding`
///
/// Returns the text before the terminator and everything after it. If no terminator is
/// found, the entire buffer is considered text.
pub(crate) fn split_terminated(bytes: &[u8], encoding: TextEncoding) -> (&[u8], &[u8]) {
	let terminator_len = encoding.terminator_len();

	let position = if terminator_len == 1 {
		bytes.iter().position(|b| *b == 0)
	} else {
		bytes
			.chunks_exact(2)
			.position(|c| c == [0, 0])
			.map(|pos| pos * 2)
	};

	match position {
		Some(pos) => (&bytes[..pos], &bytes[pos + terminator_len..]),
		None => (bytes, &[]),
	}
}

/// Decode a terminated string from the front of `bytes`, returning the remainder
pub(crate) fn decode_terminated(bytes: &[u8], encoding: TextEncoding) -> Result<(String, &[u8])> {
	let (text, rest) = split_terminated(bytes, encoding);
	Ok((decode_text(text, encoding)?, rest))
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(Into::into)
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	if bytes.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		// Multiple strings separated by null may each carry a BOM
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			_ => Some(endianness([c[0], c[1]])),
		})
		.collect();

	match String::from_utf16(&unverified) {
		Ok(mut text) => {
			trim_end_nulls(&mut text);
			Ok(text)
		},
		Err(_) => err!(TextDecode("Given an invalid UTF-16 string")),
	}
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}
