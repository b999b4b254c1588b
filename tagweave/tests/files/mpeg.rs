use crate::util::{
	ape_item, ape_tag, id3v1_tag, id3v23_tag, id3v24_tag, latin1_text, mpeg_frames, popularimeter,
	user_text, utf8_text,
};

use std::io::Cursor;
use std::time::Duration;

use tagweave::common::Position;
use tagweave::config::ParseOptions;
use tagweave::picture::{MimeType, PictureType};
use tagweave::tag::TagFormat;
use tagweave::{parse_stream, rating_to_stars};

fn cover_frame() -> Vec<u8> {
	let mut content = vec![0];
	content.extend(b"image/png\0");
	content.push(3);
	content.push(0);
	content.extend(b"\x89PNG\r\n\x1a\n");
	content
}

fn tagged_mp3() -> Vec<u8> {
	let mut file = id3v24_tag(&[
		("TIT2", utf8_text(&["Title"])),
		("TPE1", utf8_text(&["A", "B"])),
		("TRCK", utf8_text(&["3/12"])),
		("TCON", utf8_text(&["(17)"])),
		("TXXX", user_text("MusicBrainz Album Id", "9e4b6fd4-ac2a-4d6b-9e4a-0b6c3b3d6f2e")),
		("POPM", popularimeter("user@example.com", 255)),
		("APIC", cover_frame()),
	]);
	file.extend(mpeg_frames(10));
	file.extend(id3v1_tag("v1 title", "v1 artist", "v1 album", 7, 8));
	file
}

#[test_log::test]
fn id3v24_wins_over_id3v1() {
	let metadata = parse_stream(Cursor::new(tagged_mp3()), Some("audio/mpeg"), &ParseOptions::new()).unwrap();

	assert_eq!(metadata.format.tag_types, [TagFormat::Id3v24, TagFormat::Id3v1]);

	let common = &metadata.common;
	assert_eq!(common.title(), Some("Title"));
	assert_eq!(common.artist(), Some("A"));
	assert_eq!(common.artists(), ["A", "B"]);
	assert_eq!(common.track(), Position::new(Some(3), Some(12)));
	assert_eq!(common.genre(), ["Rock"]);
	assert_eq!(
		common.text(tagweave::common::CommonKey::MusicBrainzAlbumId),
		Some("9e4b6fd4-ac2a-4d6b-9e4a-0b6c3b3d6f2e")
	);

	// ID3v1 is never consulted
	assert_eq!(common.album(), None);

	let ratings = common.ratings();
	assert_eq!(ratings.len(), 1);
	assert_eq!(ratings[0].source.as_deref(), Some("user@example.com"));
	assert_eq!(rating_to_stars(Some(ratings[0].rating)), 5);

	let pictures = common.pictures();
	assert_eq!(pictures.len(), 1);
	assert_eq!(pictures[0].pic_type(), PictureType::CoverFront);
	assert_eq!(pictures[0].mime_type(), Some(&MimeType::Png));
}

#[test_log::test]
fn merged_with_id3v1() {
	let options = ParseOptions::new().merge_tag_headers(true);
	let metadata = parse_stream(Cursor::new(tagged_mp3()), Some("audio/mpeg"), &options).unwrap();

	let common = &metadata.common;
	assert_eq!(common.title(), Some("Title"));
	assert_eq!(common.artist(), Some("A"));
	assert_eq!(common.album(), Some("v1 album"));
	// Set by ID3v2, the ID3v1 track number is ignored
	assert_eq!(common.track(), Position::new(Some(3), Some(12)));
}

#[test_log::test]
fn properties() {
	let metadata = parse_stream(Cursor::new(tagged_mp3()), Some("audio/mpeg"), &ParseOptions::new()).unwrap();

	let format = &metadata.format;
	assert_eq!(format.container.as_deref(), Some("MPEG"));
	assert_eq!(format.codec.as_deref(), Some("MPEG 1 Layer 3"));
	assert_eq!(format.sample_rate, Some(44100));
	assert_eq!(format.channels, Some(2));
	assert_eq!(format.bitrate, Some(128_000));
	assert_eq!(format.lossless, Some(false));
	// 4170 bytes of audio at 16000 bytes per second
	assert_eq!(format.duration, Some(Duration::from_millis(260)));
}

#[test_log::test]
fn skip_covers() {
	let options = ParseOptions::new().skip_covers(true).include_native(true);
	let metadata = parse_stream(Cursor::new(tagged_mp3()), Some("audio/mpeg"), &options).unwrap();

	assert!(metadata.common.pictures().is_empty());

	let native = metadata.native.unwrap();
	let id3v2 = native.get(TagFormat::Id3v24).unwrap();
	assert!(id3v2.iter().all(|tag| tag.id != "APIC"));
}

#[test_log::test]
fn id3v23_uses_the_id3v24_mapper() {
	let mut file = id3v23_tag(&[("TIT2", latin1_text("Old title")), ("TALB", latin1_text("Old album"))]);
	file.extend(mpeg_frames(2));

	let metadata = parse_stream(Cursor::new(file), Some("audio/mpeg"), &ParseOptions::new()).unwrap();

	assert_eq!(metadata.format.tag_types, [TagFormat::Id3v23]);
	assert_eq!(metadata.common.title(), Some("Old title"));
	assert_eq!(metadata.common.album(), Some("Old album"));
}

#[test_log::test]
fn apev2_has_the_highest_priority() {
	let mut file = id3v24_tag(&[("TIT2", utf8_text(&["ID3v2 title"]))]);
	file.extend(mpeg_frames(2));
	file.extend(ape_tag(&[
		ape_item("Title", 0, b"APE title"),
		ape_item("Track", 0, b"5/9"),
	]));
	file.extend(id3v1_tag("v1 title", "", "", 1, 255));

	let metadata = parse_stream(Cursor::new(file), Some("audio/mpeg"), &ParseOptions::new()).unwrap();

	assert_eq!(
		metadata.format.tag_types,
		[TagFormat::Id3v24, TagFormat::Apev2, TagFormat::Id3v1]
	);
	assert_eq!(metadata.common.title(), Some("APE title"));
	assert_eq!(metadata.common.track(), Position::new(Some(5), Some(9)));
}
