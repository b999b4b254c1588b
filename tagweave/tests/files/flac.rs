use crate::util::{flac_file, temp_file};

use std::time::Duration;

use tagweave::common::{CommonKey, Position};
use tagweave::config::ParseOptions;
use tagweave::tag::TagFormat;

#[test_log::test]
fn read_from_path() {
	let file = temp_file(
		&flac_file(&[
			"TITLE=Title",
			"ARTISTS=A",
			"ARTISTS=B",
			"ARTISTS=C",
			"TRACKNUMBER=4",
			"TRACKTOTAL=10",
			"DATE=2004-05-03",
			"RATING:user@example.com=80",
		]),
		".flac",
	);

	let metadata = tagweave::parse_file(file.path(), &ParseOptions::new()).unwrap();

	assert_eq!(metadata.format.container.as_deref(), Some("FLAC"));
	assert_eq!(metadata.format.tag_types, [TagFormat::Vorbis]);
	assert_eq!(metadata.format.encoder.as_deref(), Some("reference libFLAC"));
	assert_eq!(metadata.format.sample_rate, Some(44100));
	assert_eq!(metadata.format.bits_per_sample, Some(16));
	assert_eq!(metadata.format.channels, Some(2));
	assert_eq!(metadata.format.lossless, Some(true));
	assert_eq!(metadata.format.duration, Some(Duration::from_secs(10)));

	let common = &metadata.common;
	assert_eq!(common.title(), Some("Title"));
	assert_eq!(common.artist(), Some("A, B & C"));
	assert_eq!(common.artists(), ["A", "B", "C"]);
	assert_eq!(common.track(), Position::new(Some(4), Some(10)));
	assert_eq!(common.date(), Some("2004-05-03"));
	assert_eq!(common.year(), Some(2004));

	let ratings = common.ratings();
	assert_eq!(ratings.len(), 1);
	assert_eq!(ratings[0].source.as_deref(), Some("user@example.com"));
	assert!((ratings[0].rating - 0.8).abs() < f64::EPSILON);
}

#[test_log::test]
fn extension_is_ignored_when_content_type_is_declared() {
	// A FLAC stream hiding behind an `.mp3` extension
	let file = temp_file(&flac_file(&["TITLE=Title"]), ".mp3");

	let options = ParseOptions::new().content_type("audio/flac");
	let metadata = tagweave::parse_file(file.path(), &options).unwrap();
	assert_eq!(metadata.common.title(), Some("Title"));

	// Without it, the extension picks the MPEG parser, which finds nothing it recognizes
	assert!(tagweave::parse_file(file.path(), &ParseOptions::new()).is_err());
}

#[test_log::test]
fn sniffed_without_extension() {
	let file = temp_file(&flac_file(&["ALBUM=Album"]), "");

	let metadata = tagweave::parse_file(file.path(), &ParseOptions::new()).unwrap();
	assert!(metadata.common.contains(CommonKey::Album));
}

#[test_log::test]
fn native_tags_are_kept_in_order() {
	let file = temp_file(&flac_file(&["ARTIST=B", "TITLE=Title", "ARTIST=A"]), ".flac");

	let options = ParseOptions::new().include_native(true);
	let metadata = tagweave::parse_file(file.path(), &options).unwrap();

	let native = metadata.native.unwrap();
	let vorbis = native.get(TagFormat::Vorbis).unwrap();

	let ordered = tagweave::order_tags(vorbis);
	assert_eq!(ordered["ARTIST"].len(), 2);
	assert_eq!(ordered["ARTIST"][0].text(), Some("B"));
	assert_eq!(ordered["ARTIST"][1].text(), Some("A"));

	// Several `ARTIST` values, the first one is kept as the display artist
	assert_eq!(metadata.common.artist(), Some("B"));
	assert_eq!(metadata.common.artists(), ["B", "A"]);
}
