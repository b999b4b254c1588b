use super::header::{Header, VbrHeader, VbrHeaderType, verify_frame_sync};
use crate::ape::find_ape_tag_before;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::parse_id3v1;
use crate::id3::v2::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v1, find_id3v2, find_lyrics3v2};
use crate::io::Tokenizer;
use crate::macros::decode_err;
use crate::properties::FormatInfo;
use crate::tag::{NativeMetadata, NativeTags, TagFormat};

use std::io::{Read, SeekFrom};
use std::time::Duration;

/// Read an MPEG audio stream
///
/// Tags are read from the front (ID3v2) and the back (APEv2, ID3v1) of the stream, and the
/// properties from the first frame.
pub(crate) fn read_from(reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
	let mut native = NativeTags::new();

	reader.rewind()?;

	// Some encoders write more than one ID3v2 tag, keep them all
	loop {
		let ID3FindResults(header, content) = find_id3v2(reader, true)?;
		let (Some(header), Some(content)) = (header, content) else {
			break;
		};

		let tags = parse_id3v2(&content, header, options.skip_covers)?;
		native.extend(header.version.tag_format(), tags);
	}

	let first_frame = find_first_frame(reader, options.max_junk_bytes_or_default())?;

	// Trailing tags, in the order they are stored: APEv2, Lyrics3v2, ID3v1
	reader.seek(SeekFrom::End(0))?;

	let ID3FindResults(_, id3v1) = find_id3v1(reader)?;
	find_lyrics3v2(reader)?;

	if let Some(ape) = find_ape_tag_before(reader, options.skip_covers)? {
		native.extend(TagFormat::Apev2, ape);
	}

	if let Some(id3v1) = id3v1 {
		native.extend(TagFormat::Id3v1, parse_id3v1(id3v1));
	}

	let audio_end = reader.stream_position()?;

	let mut format = FormatInfo::with_container("MPEG");
	format.lossless = Some(false);

	match first_frame {
		Some((frame_start, header, vbr)) => {
			read_properties(&mut format, header, vbr, audio_end.saturating_sub(frame_start));
		},
		None if native.is_empty() => {
			decode_err!(@BAIL Mpeg, "File contains no MPEG frames or tags");
		},
		None => log::warn!("MPEG: Unable to find an MPEG frame, no properties will be read"),
	}

	Ok(NativeMetadata { format, native })
}

// Look for the first valid frame header within `max_junk_bytes` of the current position
fn find_first_frame(
	reader: &mut dyn Tokenizer,
	max_junk_bytes: usize,
) -> Result<Option<(u64, Header, Option<VbrHeader>)>> {
	let start = reader.stream_position()?;

	let mut buf = Vec::new();
	// Enough to also cover a VBRI header at the end of the window
	(&mut *reader)
		.take((max_junk_bytes as u64).saturating_add(4 + 64))
		.read_to_end(&mut buf)?;

	let search_len = buf.len().saturating_sub(3).min(max_junk_bytes.saturating_add(1));
	for offset in 0..search_len {
		if !verify_frame_sync([buf[offset], buf[offset + 1]]) {
			continue;
		}

		let data = u32::from_be_bytes([
			buf[offset],
			buf[offset + 1],
			buf[offset + 2],
			buf[offset + 3],
		]);

		let Some(header) = Header::read(data) else {
			continue;
		};

		log::debug!("MPEG: Found a frame at offset {}", start + offset as u64);

		let frame_start = start + offset as u64;
		let vbr = read_vbr_header(reader, frame_start, header)?;
		return Ok(Some((frame_start, header, vbr)));
	}

	Ok(None)
}

fn read_vbr_header(
	reader: &mut dyn Tokenizer,
	frame_start: u64,
	header: Header,
) -> Result<Option<VbrHeader>> {
	let mut frame = [0; 64];

	// Xing/Info follow the side information, VBRI is always 32 bytes in
	for offset in [u64::from(header.data_start), 36] {
		reader.seek(SeekFrom::Start(frame_start + offset))?;

		let read = reader.peek(&mut frame)?;
		if let Some(vbr) = VbrHeader::read(&mut &frame[..read])? {
			if vbr.is_valid() {
				return Ok(Some(vbr));
			}
		}
	}

	Ok(None)
}

fn read_properties(format: &mut FormatInfo, header: Header, vbr: Option<VbrHeader>, audio_len: u64) {
	format.codec = Some(format!("MPEG {} Layer {}", header.version, header.layer as u8));
	format.sample_rate = Some(header.sample_rate);
	format.channels = Some(header.channels());

	match vbr {
		Some(vbr) => {
			format.codec_profile = Some(String::from(match vbr.ty {
				VbrHeaderType::Info => "CBR",
				VbrHeaderType::Xing | VbrHeaderType::Vbri => "VBR",
			}));

			let samples = u64::from(vbr.frames) * u64::from(header.samples);
			format.number_of_samples = Some(samples);
			format.duration_from_samples();

			if let Some(duration) = format.duration.filter(|d| !d.is_zero()) {
				let bits = u128::from(vbr.size) * 8;
				format.bitrate = u32::try_from(bits * 1000 / duration.as_millis().max(1)).ok();
			}
		},
		None => {
			format.codec_profile = Some(String::from("CBR"));

			let bitrate = u64::from(header.bitrate) * 1000;
			format.bitrate = u32::try_from(bitrate).ok();
			format.duration = Some(Duration::from_millis(audio_len * 8 * 1000 / bitrate));
		},
	}
}
