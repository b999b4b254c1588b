use super::block::{BLOCK_ID_PICTURE, BLOCK_ID_STREAMINFO, BLOCK_ID_VORBIS_COMMENTS, Block};
use super::properties::read_stream_info;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v2};
use crate::io::{Tokenizer, stream_len};
use crate::macros::{decode_err, err};
use crate::ogg::read::read_comments;
use crate::picture::Picture;
use crate::properties::FormatInfo;
use crate::tag::{NativeMetadata, NativeTag, NativeTags, TagFormat};

fn verify_flac(data: &mut dyn Tokenizer) -> Result<Block> {
	let mut marker = [0; 4];
	data.read_exact(&mut marker)?;

	if &marker != b"fLaC" {
		decode_err!(@BAIL Flac, "File missing \"fLaC\" stream marker");
	}

	let block = Block::read(data, |_| true)?;

	if block.ty != BLOCK_ID_STREAMINFO {
		decode_err!(@BAIL Flac, "File missing mandatory STREAMINFO block");
	}

	log::debug!("FLAC: File verified");
	Ok(block)
}

/// Read a FLAC stream
pub(crate) fn read_from(reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
	let mut native = NativeTags::new();

	reader.rewind()?;

	// It is possible for a FLAC file to contain an ID3v2 tag
	if let ID3FindResults(Some(header), Some(content)) = find_id3v2(reader, true)? {
		log::warn!("FLAC: Encountered an ID3v2 tag");

		let tags = parse_id3v2(&content, header, options.skip_covers)?;
		native.extend(header.version.tag_format(), tags);
	}

	let stream_info = verify_flac(reader)?;
	if stream_info.content.len() < 18 {
		decode_err!(@BAIL Flac, "File has an invalid STREAMINFO block size (< 18)");
	}

	let mut vorbis_comments: Option<Vec<NativeTag>> = None;
	let mut pictures = Vec::new();
	let mut format = FormatInfo::with_container("FLAC");

	let mut last_block = stream_info.last;
	while !last_block {
		let block = Block::read(reader, |block_type| {
			block_type == BLOCK_ID_VORBIS_COMMENTS
				|| (block_type == BLOCK_ID_PICTURE && !options.skip_covers)
		})?;

		last_block = block.last;

		if block.content.is_empty() {
			continue;
		}

		match block.ty {
			BLOCK_ID_VORBIS_COMMENTS => {
				log::debug!("FLAC: Encountered a Vorbis Comments block, parsing");

				// There may be only one VORBIS_COMMENT block in a stream, the last one wins
				if vorbis_comments.is_some() {
					log::warn!("FLAC: Stream has more than one Vorbis Comments block");
				}

				let comments = read_comments(&block.content, options.skip_covers)?;
				format.encoder = Some(comments.vendor).filter(|vendor| !vendor.is_empty());
				vorbis_comments = Some(comments.tags);
			},
			BLOCK_ID_PICTURE => {
				log::debug!("FLAC: Encountered a picture block, parsing");

				match Picture::from_flac_bytes(&block.content, false) {
					Ok(picture) => pictures.push(NativeTag::new("METADATA_BLOCK_PICTURE", picture)),
					Err(e) => log::warn!("FLAC: Unable to read picture block, discarding: {e}"),
				}
			},
			_ => {},
		}
	}

	if vorbis_comments.is_some() || !pictures.is_empty() {
		let mut tags = vorbis_comments.unwrap_or_default();
		tags.extend(pictures);
		native.extend(TagFormat::Vorbis, tags);
	}

	let stream_length = {
		let current = reader.stream_position()?;
		let end = stream_len(reader)?;

		// In the event that a block lies about its size, the current position could be
		// completely wrong.
		if current > end {
			err!(SizeMismatch);
		}

		end - current
	};

	read_stream_info(&stream_info.content, stream_length, &mut format)?;

	Ok(NativeMetadata { format, native })
}

#[cfg(test)]
mod tests {
	use super::read_from;
	use crate::config::ParseOptions;
	use crate::ogg::read::tests::comment_block;
	use crate::tag::{NativeValue, TagFormat};

	use std::io::Cursor;
	use std::time::Duration;

	fn block(ty: u8, last: bool, content: &[u8]) -> Vec<u8> {
		let mut block = vec![if last { ty | 0x80 } else { ty }];
		block.extend(&(content.len() as u32).to_be_bytes()[1..]);
		block.extend(content);
		block
	}

	fn stream_info() -> Vec<u8> {
		let mut info = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
		// 44100 Hz, 2 channels, 16 bits per sample, total samples high bits 0
		let packed = (44100_u32 << 12) | (1 << 9) | (15 << 4);
		info.extend(packed.to_be_bytes());
		info.extend(441_000_u32.to_be_bytes());
		info.extend([0; 16]);
		info
	}

	fn picture_block() -> Vec<u8> {
		let mut picture = 3_u32.to_be_bytes().to_vec();
		picture.extend(10_u32.to_be_bytes());
		picture.extend(b"image/jpeg");
		picture.extend(0_u32.to_be_bytes());
		picture.extend([0; 16]);
		picture.extend(3_u32.to_be_bytes());
		picture.extend([0xFF, 0xD8, 0xFF]);
		picture
	}

	fn flac_file() -> Vec<u8> {
		let mut data = b"fLaC".to_vec();
		data.extend(block(0, false, &stream_info()));
		data.extend(block(4, false, &comment_block("reference libFLAC 1.4.3", &["TITLE=Foo"])));
		data.extend(block(6, true, &picture_block()));
		data.extend([0; 100]);
		data
	}

	#[test_log::test]
	fn properties_and_tags() {
		let metadata = read_from(&mut Cursor::new(flac_file()), &ParseOptions::new()).unwrap();

		assert_eq!(metadata.format.container.as_deref(), Some("FLAC"));
		assert_eq!(metadata.format.sample_rate, Some(44100));
		assert_eq!(metadata.format.channels, Some(2));
		assert_eq!(metadata.format.bits_per_sample, Some(16));
		assert_eq!(metadata.format.duration, Some(Duration::from_secs(10)));
		assert_eq!(metadata.format.lossless, Some(true));
		assert_eq!(metadata.format.audio_md5, None);
		assert_eq!(metadata.format.encoder.as_deref(), Some("reference libFLAC 1.4.3"));

		let tags = metadata.native.get(TagFormat::Vorbis).unwrap();
		assert_eq!(tags.len(), 2);
		assert_eq!(tags[0].value.text(), Some("Foo"));
		assert!(matches!(tags[1].value, NativeValue::Picture(_)));
	}

	#[test_log::test]
	fn covers_can_be_skipped() {
		let options = ParseOptions::new().skip_covers(true);
		let metadata = read_from(&mut Cursor::new(flac_file()), &options).unwrap();

		assert_eq!(metadata.native.get(TagFormat::Vorbis).unwrap().len(), 1);
	}

	#[test_log::test]
	fn missing_marker() {
		let data = b"OggS\0\0\0\0\0\0\0\0".to_vec();
		assert!(read_from(&mut Cursor::new(data), &ParseOptions::new()).is_err());
	}
}
