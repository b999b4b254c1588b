use crate::util::{flac_file, id3v1_tag, id3v24_tag, mpeg_frames, utf8_text};

use std::io::Cursor;

use tagweave::common::{CommonKey, CommonValue, Position};
use tagweave::config::ParseOptions;
use tagweave::error::ErrorKind;
use tagweave::mapping::{MapperRegistry, TagMapper};
use tagweave::tag::{NativeMetadata, NativeTag, TagFormat};
use tagweave::{MetadataParser, rating_to_stars};

fn native(tags: &[(TagFormat, &str, &str)]) -> NativeMetadata {
	let mut metadata = NativeMetadata::default();
	for (format, id, value) in tags {
		metadata.native.push(*format, NativeTag::new(*id, *value));
	}

	metadata
}

const TAGS: &[(TagFormat, &str, &str)] = &[
	(TagFormat::Id3v1, "title", "v1 title"),
	(TagFormat::Id3v1, "album", "v1 album"),
	(TagFormat::Id3v1, "track", "9"),
	(TagFormat::Vorbis, "TITLE", "vorbis title"),
	(TagFormat::Vorbis, "GENRE", "Jazz"),
	(TagFormat::Apev2, "Artist", "ape artist"),
	(TagFormat::Id3v24, "TIT2", "v24 title"),
	(TagFormat::Id3v24, "TCOM", "v24 composer"),
];

#[test_log::test]
fn storage_order_does_not_matter() {
	let parser = MetadataParser::new();

	let forward = parser.parse_native_tags(native(TAGS), false, true).unwrap();

	let reversed = TAGS.iter().rev().copied().collect::<Vec<_>>();
	let backward = parser.parse_native_tags(native(&reversed), false, true).unwrap();

	assert_eq!(forward.common, backward.common);
	assert_eq!(forward.common.title(), Some("vorbis title"));
	assert_eq!(forward.common.composer(), ["v24 composer"]);
	assert_eq!(forward.common.artist(), Some("ape artist"));
	assert_eq!(forward.common.genre(), ["Jazz"]);
	assert_eq!(forward.common.album(), Some("v1 album"));
}

#[test_log::test]
fn merging_only_adds_fields() {
	let parser = MetadataParser::new();

	let single = parser.parse_native_tags(native(TAGS), false, false).unwrap();
	let merged = parser.parse_native_tags(native(TAGS), false, true).unwrap();

	assert!(merged.common.len() > single.common.len());
	for (key, value) in single.common.iter() {
		// Unset positions can still be filled in
		if matches!(key, CommonKey::Track | CommonKey::Disk) && merged.common.get(key) != Some(value) {
			assert_eq!(*value, CommonValue::Position(Position::default()));
			continue;
		}

		assert_eq!(merged.common.get(key), Some(value), "{key:?} changed when merging");
	}
}

#[test_log::test]
fn single_format_matches_merge() {
	// With only one format present, merging makes no difference
	let tags = &[
		(TagFormat::Vorbis, "TITLE", "Title"),
		(TagFormat::Vorbis, "ARTIST", "A"),
		(TagFormat::Vorbis, "DISCNUMBER", "1"),
		(TagFormat::Vorbis, "DISCTOTAL", "2"),
	];

	let parser = MetadataParser::new();
	let single = parser.parse_native_tags(native(tags), false, false).unwrap();
	let merged = parser.parse_native_tags(native(tags), false, true).unwrap();

	assert_eq!(single.common, merged.common);
	assert_eq!(single.common.disk(), Position::new(Some(1), Some(2)));
}

#[test_log::test]
fn positions_are_always_present() {
	let result = MetadataParser::new()
		.parse_native_tags(native(&[(TagFormat::Vorbis, "TITLE", "Title")]), false, false)
		.unwrap();

	assert!(result.common.contains(CommonKey::Track));
	assert!(result.common.contains(CommonKey::Disk));
	assert_eq!(result.common.track(), Position::new(None, None));
	assert!(!result.common.contains(CommonKey::Artist));
	assert!(result.common.artists().is_empty());
}

#[test_log::test]
fn single_artist_becomes_artists() {
	let result = MetadataParser::new()
		.parse_native_tags(native(&[(TagFormat::Apev2, "Artist", "Solo")]), false, false)
		.unwrap();

	assert_eq!(result.common.artist(), Some("Solo"));
	assert_eq!(result.common.artists(), ["Solo"]);
}

#[test_log::test]
fn ratings_as_stars() {
	let result = MetadataParser::new()
		.parse_native_tags(
			native(&[(TagFormat::Apev2, "Rating", "60"), (TagFormat::Exif, "IRTD", "100")]),
			false,
			true,
		)
		.unwrap();

	// Both formats carry a rating, the first one found keeps the field
	let ratings = result.common.ratings();
	assert_eq!(ratings.len(), 1);
	assert!(ratings[0].source.is_none());
	assert_eq!(rating_to_stars(Some(ratings[0].rating)), 3);

	let result = MetadataParser::new()
		.parse_native_tags(native(&[(TagFormat::Apev2, "Title", "Unrated")]), false, false)
		.unwrap();
	assert_eq!(rating_to_stars(result.common.ratings().first().map(|r| r.rating)), 0);
}

#[test_log::test]
fn registry_without_the_file_format() {
	let parser = MetadataParser::with_registry(MapperRegistry::from_mappers([
		TagMapper::Id3v1,
		TagMapper::Id3v24,
	]));

	let mut mp3 = id3v24_tag(&[("TIT2", utf8_text(&["Title"]))]);
	mp3.extend(mpeg_frames(2));
	mp3.extend(id3v1_tag("v1", "", "", 1, 255));

	let options = ParseOptions::new().content_type("audio/mpeg").merge_tag_headers(true);
	let metadata = parser.parse(&mut Cursor::new(mp3), &options).unwrap();
	assert_eq!(metadata.common.title(), Some("Title"));
	assert_eq!(metadata.common.track().no, Some(1));

	let err = parser
		.parse(&mut Cursor::new(flac_file(&["TITLE=Title"])), &ParseOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnmappedFormat(TagFormat::Vorbis)));
}
