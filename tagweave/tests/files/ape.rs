use crate::util::{ape_item, ape_tag, id3v1_tag};

use std::io::Cursor;
use std::time::Duration;

use tagweave::common::Position;
use tagweave::config::ParseOptions;
use tagweave::picture::{MimeType, PictureType};
use tagweave::tag::TagFormat;

// A single 16 bit stereo WavPack block of 10 seconds at 44.1 kHz
fn wavpack_block() -> Vec<u8> {
	let mut block = b"wvpk".to_vec();
	block.extend(56_u32.to_le_bytes());
	block.extend(0x410_u16.to_le_bytes());
	block.extend([0, 0]);
	block.extend(441_000_u32.to_le_bytes());
	block.extend(0_u32.to_le_bytes());
	block.extend(441_000_u32.to_le_bytes());
	block.extend((1_u32 | (9 << 23)).to_le_bytes());
	block.extend([0; 4]);
	block.extend([0; 32]);
	block
}

fn tagged_wavpack() -> Vec<u8> {
	let mut file = wavpack_block();
	file.extend(ape_tag(&[
		ape_item("Title", 0, b"Title"),
		ape_item("Artist", 0, b"A\0B"),
		ape_item("Disc", 0, b"1/2"),
		ape_item("Cover Art (Front)", 1, b"front.jpg\0\xFF\xD8\xFF\xE0"),
	]));
	file.extend(id3v1_tag("v1 title", "v1 artist", "v1 album", 1, 255));
	file
}

#[test_log::test]
fn wavpack_with_apev2() {
	let metadata =
		tagweave::parse_stream(Cursor::new(tagged_wavpack()), None, &ParseOptions::new()).unwrap();

	assert_eq!(metadata.format.container.as_deref(), Some("WavPack"));
	assert_eq!(metadata.format.tag_types, [TagFormat::Apev2, TagFormat::Id3v1]);
	assert_eq!(metadata.format.lossless, Some(true));
	assert_eq!(metadata.format.duration, Some(Duration::from_secs(10)));

	let common = &metadata.common;
	assert_eq!(common.title(), Some("Title"));
	assert_eq!(common.artist(), Some("A"));
	assert_eq!(common.artists(), ["A", "B"]);
	assert_eq!(common.disk(), Position::new(Some(1), Some(2)));
	assert_eq!(common.track(), Position::default());

	let pictures = common.pictures();
	assert_eq!(pictures.len(), 1);
	assert_eq!(pictures[0].pic_type(), PictureType::CoverFront);
	assert_eq!(pictures[0].mime_type(), Some(&MimeType::Jpeg));
	assert_eq!(pictures[0].description(), Some("front.jpg"));
}

#[test_log::test]
fn merged_with_id3v1() {
	let options = ParseOptions::new().merge_tag_headers(true);
	let metadata = tagweave::parse_stream(Cursor::new(tagged_wavpack()), None, &options).unwrap();

	let common = &metadata.common;
	assert_eq!(common.title(), Some("Title"));
	assert_eq!(common.album(), Some("v1 album"));
	assert_eq!(common.track(), Position::new(Some(1), None));
	assert_eq!(common.disk(), Position::new(Some(1), Some(2)));
}

#[test_log::test]
fn covers_can_be_skipped() {
	let options = ParseOptions::new().skip_covers(true);
	let metadata = tagweave::parse_stream(Cursor::new(tagged_wavpack()), None, &options).unwrap();

	assert!(metadata.common.pictures().is_empty());
	assert_eq!(metadata.common.title(), Some("Title"));
}
