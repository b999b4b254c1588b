use crate::util::{flac_file, mpeg_frames, temp_file};

use std::io::{Cursor, Read as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tagweave::config::ParseOptions;
use tagweave::error::{ErrorKind, Result};
use tagweave::io::{ReaderTokenizer, Tokenizer};
use tagweave::properties::FormatInfo;
use tagweave::resolve::{ParserId, TagParser};
use tagweave::tag::{NativeMetadata, NativeTag, TagFormat};

// Stands in for an MP4 parser, reporting an `©nam` atom
struct AtomParser;

impl TagParser for AtomParser {
	fn parse(&self, reader: &mut dyn Tokenizer, _: &ParseOptions) -> Result<NativeMetadata> {
		let mut header = [0; 8];
		reader.read_exact(&mut header)?;

		let mut metadata = NativeMetadata::default();
		metadata.format = FormatInfo::with_container("MPEG-4");
		metadata
			.native
			.push(TagFormat::Mp4, NativeTag::new("\u{a9}nam", "Atom title"));

		Ok(metadata)
	}
}

#[test_log::test]
fn custom_loader_is_only_asked_for_the_resolved_format() {
	let calls = Arc::new(AtomicUsize::new(0));

	let loader_calls = Arc::clone(&calls);
	let options = ParseOptions::new().parser_loader(move |id: ParserId| -> Option<Box<dyn TagParser>> {
		loader_calls.fetch_add(1, Ordering::SeqCst);
		match id {
			ParserId::Mp4 => Some(Box::new(AtomParser)),
			_ => None,
		}
	});

	let file = b"\0\0\0\x20ftypM4A \0\0\0\0".to_vec();
	let metadata = tagweave::parse_stream(Cursor::new(file), None, &options).unwrap();

	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert_eq!(metadata.format.container.as_deref(), Some("MPEG-4"));
	assert_eq!(metadata.format.tag_types, [TagFormat::Mp4]);
	assert_eq!(metadata.common.title(), Some("Atom title"));
}

#[test_log::test]
fn custom_loader_replaces_the_builtin_parsers() {
	let options = ParseOptions::new().parser_loader(|_: ParserId| -> Option<Box<dyn TagParser>> { None });

	let err = tagweave::parse_stream(Cursor::new(flac_file(&[])), None, &options).unwrap_err();
	let ErrorKind::ParserLoad(load_err) = err.kind() else {
		panic!("Expected a load error, got {err:?}");
	};

	assert_eq!(load_err.id(), ParserId::Flac);
	assert!(load_err.is_custom_loader());
}

#[test_log::test]
fn content_type_from_the_tokenizer() {
	// As a network tokenizer would report it
	let mut tokenizer =
		ReaderTokenizer::new(Cursor::new(flac_file(&["TITLE=Remote"]))).with_content_type("audio/x-flac");

	let metadata = tagweave::MetadataParser::new()
		.parse(&mut tokenizer, &ParseOptions::new())
		.unwrap();
	assert_eq!(metadata.common.title(), Some("Remote"));
}

#[test_log::test]
fn declared_content_type_beats_signature() {
	// FLAC data, declared as MPEG, so the MPEG parser runs and finds nothing
	let err = tagweave::parse_stream(Cursor::new(flac_file(&[])), Some("audio/mpeg"), &ParseOptions::new())
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileDecoding(_)));
}

#[test_log::test]
fn unrecognized_signatures() {
	let err = tagweave::parse_stream(Cursor::new(vec![0; 64]), None, &ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnknownFormat));

	let err =
		tagweave::parse_stream(Cursor::new(b"MPCKSH".to_vec()), None, &ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::UnsupportedMimeType(mime) if mime == "audio/x-musepack"));
}

#[test_log::test]
fn parse_native_skips_normalization() {
	let options = ParseOptions::new().path("track.mp3");
	let native = tagweave::parse_native(&mut Cursor::new(mpeg_frames(4)), &options).unwrap();

	assert!(native.native.is_empty());
	assert!(native.format.tag_types.is_empty());
	assert_eq!(native.format.sample_rate, Some(44100));
}

#[test_log::test]
fn missing_file() {
	let err = tagweave::parse_file("this/file/does/not/exist.mp3", &ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test_log::test]
fn opened_path_replaces_declared_path() {
	let file = temp_file(&flac_file(&["TITLE=Flac title"]), ".flac");

	let options = ParseOptions::new().path("stale_name.mp3");
	let metadata = tagweave::parse_file(file.path(), &options).unwrap();
	assert_eq!(metadata.common.title(), Some("Flac title"));
}
