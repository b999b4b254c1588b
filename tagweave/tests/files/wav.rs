use crate::util::wav_file;

use std::io::Cursor;
use std::time::Duration;

use tagweave::common::Position;
use tagweave::config::ParseOptions;
use tagweave::tag::TagFormat;

#[test_log::test]
fn riff_info() {
	let file = wav_file(&[
		(b"INAM", "Title"),
		(b"IART", "Artist"),
		(b"IPRT", "2"),
		(b"IGNR", "Ambient"),
		(b"IRTD", "80"),
	]);

	// No content type or path, the format is sniffed
	let metadata = tagweave::parse_stream(Cursor::new(file), None, &ParseOptions::new()).unwrap();

	assert_eq!(metadata.format.container.as_deref(), Some("WAVE"));
	assert_eq!(metadata.format.codec.as_deref(), Some("PCM"));
	assert_eq!(metadata.format.tag_types, [TagFormat::Exif]);
	assert_eq!(metadata.format.sample_rate, Some(44100));
	assert_eq!(metadata.format.bitrate, Some(1_411_200));
	assert_eq!(metadata.format.duration, Some(Duration::from_secs(1)));

	let common = &metadata.common;
	assert_eq!(common.title(), Some("Title"));
	assert_eq!(common.artist(), Some("Artist"));
	assert_eq!(common.artists(), ["Artist"]);
	assert_eq!(common.track(), Position::new(Some(2), None));
	assert_eq!(common.genre(), ["Ambient"]);
	assert_eq!(tagweave::rating_to_stars(common.ratings().first().map(|r| r.rating)), 4);
}

#[test_log::test]
fn no_tags() {
	let metadata =
		tagweave::parse_stream(Cursor::new(wav_file(&[])), Some("audio/wav"), &ParseOptions::new()).unwrap();

	assert!(metadata.format.tag_types.is_empty());
	assert!(metadata.common.title().is_none());
	assert_eq!(metadata.common.track(), Position::default());
	assert_eq!(metadata.common.disk(), Position::default());
}
