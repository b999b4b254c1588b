//! Format-agnostic parsing entry points
//!
//! Dispatch settles on a [`ParserId`], in order of preference, from:
//!
//! 1. The declared content type, resolved as a MIME type, or failing that, as an extension
//! 2. The extension of the declared path
//! 3. The stream's own signature, see [`guess_mime_type`]
//!
//! The first one to resolve wins. Only the signature is a hard failure, an unresolved content
//! type or path simply moves on to the next step.

use crate::config::ParseOptions;
use crate::error::{ErrorKind, ParserLoadError, Result};
use crate::io::{ReaderTokenizer, Tokenizer};
use crate::macros::err;
use crate::normalize::{AudioMetadata, MetadataParser};
use crate::resolve::{BuiltinLoader, ParserId, ParserLoader, TagParser};
use crate::sniff::{SNIFF_BUFFER_SIZE, guess_mime_type};
use crate::tag::NativeMetadata;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::OnceLock;

/// Parse a file into an [`AudioMetadata`]
///
/// The path of the opened file is used for dispatch, replacing any path declared in `options`.
/// The file is closed before returning, whether parsing succeeded or not.
///
/// # Errors
///
/// * The file cannot be opened
/// * See [`MetadataParser::parse`]
///
/// # Examples
///
/// ```rust,no_run
/// use tagweave::config::ParseOptions;
///
/// # fn main() -> tagweave::error::Result<()> {
/// let metadata = tagweave::parse_file("track.flac", &ParseOptions::new())?;
/// println!("{:?}", metadata.common.title());
/// # Ok(()) }
/// ```
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<AudioMetadata> {
	let path = path.as_ref();
	log::debug!("Probe: Opening {}", path.display());

	let mut reader = BufReader::new(File::open(path)?);

	let options = options.clone().path(path);
	shared_parser().parse(&mut reader, &options)
}

/// Parse any [`Read`] + [`Seek`] stream into an [`AudioMetadata`]
///
/// `content_type` takes precedence over one declared in `options`.
///
/// # Errors
///
/// See [`MetadataParser::parse`]
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tagweave::config::ParseOptions;
///
/// # fn main() -> tagweave::error::Result<()> {
/// // An empty ID3v1 tag, with no audio at all
/// let mut id3v1 = b"TAG".to_vec();
/// id3v1.resize(128, 0);
///
/// let metadata = tagweave::parse_stream(Cursor::new(id3v1), Some("audio/mpeg"), &ParseOptions::new())?;
/// assert!(metadata.common.title().is_none());
/// # Ok(()) }
/// ```
pub fn parse_stream<R>(
	reader: R,
	content_type: Option<&str>,
	options: &ParseOptions,
) -> Result<AudioMetadata>
where
	R: Read + Seek,
{
	let mut tokenizer = ReaderTokenizer::new(reader);

	match content_type {
		Some(content_type) => {
			let options = options.clone().content_type(content_type);
			shared_parser().parse(&mut tokenizer, &options)
		},
		None => shared_parser().parse(&mut tokenizer, options),
	}
}

/// Dispatch a tokenizer to its format parser, without normalizing
///
/// This returns the parser's output untouched. Errors from the parser itself are propagated
/// as-is.
///
/// # Errors
///
/// * No content type, path or signature resolved a parser ([`ErrorKind::UnknownFormat`],
///   [`ErrorKind::UnsupportedMimeType`])
/// * The loader has no parser for the resolved format ([`ErrorKind::ParserLoad`])
/// * The parser fails
pub fn parse_native(reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
	let id = resolve_parser_id(reader, options)?;
	let parser = load_parser(id, options)?;

	// A length only known to the caller still has to reach the parser
	match (reader.file_size(), options.file_size) {
		(None, Some(file_size)) => {
			log::debug!("Probe: Using the declared file size of {file_size} bytes");

			let mut sized = ReaderTokenizer::new(reader).with_file_size(file_size);
			parser.parse(&mut sized, options)
		},
		_ => parser.parse(reader, options),
	}
}

fn resolve_parser_id(reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<ParserId> {
	let content_type = options
		.content_type
		.as_deref()
		.or_else(|| reader.content_type())
		.map(str::to_owned);

	if let Some(content_type) = content_type {
		let id = ParserId::from_mime_type(&content_type).or_else(|| {
			let extension = content_type.rsplit('.').next().unwrap_or(&content_type);
			ParserId::from_extension(extension)
		});

		match id {
			Some(id) => {
				log::debug!("Probe: Resolved {id} from content type {content_type:?}");
				return Ok(id);
			},
			None => log::debug!("Probe: No parser found for content type {content_type:?}"),
		}
	}

	if let Some(path) = &options.path {
		match ParserId::from_path(path) {
			Some(id) => {
				log::debug!("Probe: Resolved {id} from path {}", path.display());
				return Ok(id);
			},
			None => log::debug!("Probe: No parser found for path {}", path.display()),
		}
	}

	log::debug!("Probe: Guessing the format from the stream's content");

	let mut buf = [0; SNIFF_BUFFER_SIZE];
	let read = reader.peek(&mut buf)?;

	let Some(mime_type) = guess_mime_type(&buf[..read]) else {
		err!(UnknownFormat);
	};

	match ParserId::from_mime_type(mime_type) {
		Some(id) => {
			log::debug!("Probe: Resolved {id} from sniffed MIME type {mime_type:?}");
			Ok(id)
		},
		None => err!(UnsupportedMimeType(mime_type.to_owned())),
	}
}

fn load_parser(id: ParserId, options: &ParseOptions) -> Result<Box<dyn TagParser>> {
	let custom_loader = options.parser_loader.is_some();
	log::debug!(
		"Probe: Loading the {id} parser ({} loader)",
		if custom_loader { "custom" } else { "built-in" }
	);

	let parser = match &options.parser_loader {
		Some(loader) => loader.load(id),
		None => BuiltinLoader.load(id),
	};

	parser.ok_or_else(|| ErrorKind::ParserLoad(ParserLoadError::new(id, custom_loader)).into())
}

fn shared_parser() -> &'static MetadataParser {
	static PARSER: OnceLock<MetadataParser> = OnceLock::new();
	PARSER.get_or_init(MetadataParser::new)
}
