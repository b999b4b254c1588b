//! Format identifiers and parser loading
//!
//! A [`ParserId`] names a family of containers that share a parser. Once dispatch has settled on
//! one, a [`ParserLoader`] provides the [`TagParser`] for it. The built-in parsers are available
//! through [`BuiltinLoader`], and callers can plug in their own through
//! [`ParseOptions::parser_loader`](crate::config::ParseOptions::parser_loader).

use crate::config::ParseOptions;
use crate::error::Result;
use crate::io::Tokenizer;
use crate::tag::NativeMetadata;
use crate::{ape, flac, iff, mpeg, ogg};

use std::fmt::{Display, Formatter};
use std::path::Path;

/// Identifies the parser responsible for a container family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParserId {
	/// MPEG audio (MP1, MP2, MP3)
	Mpeg,
	/// Monkey's Audio
	Apev2,
	/// MP4/M4A/AAC
	Mp4,
	/// ASF (WMA/WMV)
	Asf,
	/// FLAC
	Flac,
	/// Ogg Vorbis and Ogg Opus
	Ogg,
	/// AIFF
	Aiff,
	/// RIFF WAVE
	Riff,
	/// WavPack
	WavPack,
}

impl ParserId {
	/// The identifier as a string
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Mpeg => "mpeg",
			Self::Apev2 => "apev2",
			Self::Mp4 => "mp4",
			Self::Asf => "asf",
			Self::Flac => "flac",
			Self::Ogg => "ogg",
			Self::Aiff => "aiff",
			Self::Riff => "riff",
			Self::WavPack => "wavpack",
		}
	}

	/// Resolve a `ParserId` from a MIME type
	///
	/// Parameters (`; codecs=...`) are ignored, as is the `x-` prefix of experimental subtypes.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::resolve::ParserId;
	///
	/// assert_eq!(ParserId::from_mime_type("audio/mpeg"), Some(ParserId::Mpeg));
	/// assert_eq!(ParserId::from_mime_type("audio/x-flac"), Some(ParserId::Flac));
	/// assert_eq!(ParserId::from_mime_type("video/x-ms-asf"), Some(ParserId::Asf));
	/// assert_eq!(ParserId::from_mime_type("text/plain"), None);
	/// ```
	pub fn from_mime_type(mime_type: &str) -> Option<Self> {
		let mime_type = mime_type.split(';').next()?.trim().to_ascii_lowercase();
		let (ty, subtype) = mime_type.split_once('/')?;
		let subtype = subtype.strip_prefix("x-").unwrap_or(subtype);

		match ty {
			"audio" => match subtype {
				"mpeg" => Some(Self::Mpeg),
				"flac" => Some(Self::Flac),
				"ape" | "monkeys-audio" => Some(Self::Apev2),
				"mp4" | "aac" | "aacp" | "m4a" => Some(Self::Mp4),
				"ogg" => Some(Self::Ogg),
				"ms-wma" | "ms-wmv" | "ms-asf" => Some(Self::Asf),
				"aiff" | "aif" | "aifc" => Some(Self::Aiff),
				"vnd.wave" | "wav" | "wave" => Some(Self::Riff),
				"wavpack" => Some(Self::WavPack),
				_ => None,
			},
			"video" => match subtype {
				"ms-asf" | "ms-wmv" => Some(Self::Asf),
				"ogg" => Some(Self::Ogg),
				_ => None,
			},
			"application" => match subtype {
				"vnd.ms-asf" => Some(Self::Asf),
				"ogg" => Some(Self::Ogg),
				_ => None,
			},
			_ => None,
		}
	}

	/// Resolve a `ParserId` from a file extension, without the `.`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::resolve::ParserId;
	///
	/// assert_eq!(ParserId::from_extension("MP3"), Some(ParserId::Mpeg));
	/// assert_eq!(ParserId::from_extension("m4b"), Some(ParserId::Mp4));
	/// assert_eq!(ParserId::from_extension("txt"), None);
	/// ```
	pub fn from_extension(extension: &str) -> Option<Self> {
		match extension.to_ascii_lowercase().as_str() {
			"mp2" | "mp3" | "m2a" => Some(Self::Mpeg),
			"ape" => Some(Self::Apev2),
			"aac" | "mp4" | "m4a" | "m4b" | "m4pa" | "m4v" | "m4r" | "3gp" => Some(Self::Mp4),
			"wma" | "wmv" | "asf" => Some(Self::Asf),
			"flac" => Some(Self::Flac),
			"ogg" | "ogv" | "oga" | "ogx" | "opus" => Some(Self::Ogg),
			"aif" | "aiff" | "aifc" => Some(Self::Aiff),
			"wav" => Some(Self::Riff),
			"wv" | "wvp" => Some(Self::WavPack),
			_ => None,
		}
	}

	/// Resolve a `ParserId` from the extension of a path
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::resolve::ParserId;
	///
	/// assert_eq!(ParserId::from_path("music/track.flac"), Some(ParserId::Flac));
	/// assert_eq!(ParserId::from_path("no_extension"), None);
	/// ```
	pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
		let extension = path.as_ref().extension()?.to_str()?;
		Self::from_extension(extension)
	}
}

impl Display for ParserId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A format-specific parser
///
/// A parser reads everything it recognizes from the tokenizer and reports it as
/// [`NativeMetadata`]. Errors are returned as-is to the caller of the parse.
pub trait TagParser {
	/// Parse the tokenizer's content
	///
	/// # Errors
	///
	/// Parser specific, such as malformed or truncated input.
	fn parse(&self, reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata>;
}

/// Provides the [`TagParser`] for a [`ParserId`]
///
/// Implemented for any `Fn(ParserId) -> Option<Box<dyn TagParser>>`.
pub trait ParserLoader: Send + Sync {
	/// Load the parser for `id`, or `None` if it is unavailable
	fn load(&self, id: ParserId) -> Option<Box<dyn TagParser>>;
}

impl<F> ParserLoader for F
where
	F: Fn(ParserId) -> Option<Box<dyn TagParser>> + Send + Sync,
{
	fn load(&self, id: ParserId) -> Option<Box<dyn TagParser>> {
		self(id)
	}
}

type ReadFn = fn(&mut dyn Tokenizer, &ParseOptions) -> Result<NativeMetadata>;

struct BuiltinParser(ReadFn);

impl TagParser for BuiltinParser {
	fn parse(&self, reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
		(self.0)(reader, options)
	}
}

/// The parsers that ship with tagweave
///
/// MP4, ASF and AIFF have no built-in parser. Loading them fails, and their files need a
/// custom [`ParserLoader`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLoader;

impl ParserLoader for BuiltinLoader {
	fn load(&self, id: ParserId) -> Option<Box<dyn TagParser>> {
		let read: ReadFn = match id {
			ParserId::Mpeg => mpeg::read_from,
			ParserId::Apev2 | ParserId::WavPack => ape::read_from,
			ParserId::Flac => flac::read_from,
			ParserId::Ogg => ogg::read_from,
			ParserId::Riff => iff::wav::read_from,
			ParserId::Mp4 | ParserId::Asf | ParserId::Aiff => return None,
		};

		Some(Box::new(BuiltinParser(read)))
	}
}
