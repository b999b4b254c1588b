//! Contains the errors that can arise within tagweave
//!
//! The primary error is [`MetadataError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::resolve::ParserId;
use crate::tag::TagFormat;

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, MetadataError>`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Detection
	/// No content type, extension, or signature could be resolved to a format
	UnknownFormat,
	/// The stream's signature was recognized, but no parser exists for its MIME type
	UnsupportedMimeType(String),
	/// A format was resolved, but no parser implementation could be loaded for it
	ParserLoad(ParserLoadError),

	// Normalization
	/// A parser produced tags for a [`TagFormat`] that has no registered mapper
	///
	/// This indicates a mismatch between a parser and the [`MapperRegistry`](crate::mapping::MapperRegistry),
	/// not malformed input.
	UnmappedFormat(TagFormat),

	// File data related errors
	/// Attempting to read an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	SizeMismatch,
	/// Errors that occur while decoding a file
	FileDecoding(FileDecodingError),
	/// Provided an invalid picture
	NotAPicture,
	/// Errors that occur while decoding text
	TextDecode(&'static str),

	// Conversions for external errors
	/// Errors that arise while parsing OGG pages
	OggPage(ogg_pager::PageError),
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
}

/// An error that arises while loading a parser implementation
pub struct ParserLoadError {
	id: ParserId,
	custom_loader: bool,
}

impl ParserLoadError {
	/// Create a `ParserLoadError` for a [`ParserId`]
	///
	/// `custom_loader` states whether the failing loader was supplied by the caller.
	#[must_use]
	pub const fn new(id: ParserId, custom_loader: bool) -> Self {
		Self { id, custom_loader }
	}

	/// Returns the [`ParserId`] that failed to load
	pub fn id(&self) -> ParserId {
		self.id
	}

	/// Whether the failing loader was supplied through [`ParseOptions::parser_loader`](crate::config::ParseOptions::parser_loader)
	pub fn is_custom_loader(&self) -> bool {
		self.custom_loader
	}
}

impl Debug for ParserLoadError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?} (custom loader: {})", self.id, self.custom_loader)
	}
}

impl Display for ParserLoadError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.custom_loader {
			write!(f, "Custom loader failed to resolve parser \"{}\"", self.id)
		} else {
			write!(f, "No built-in parser available for \"{}\"", self.id)
		}
	}
}

/// An error that arises while decoding a file
pub struct FileDecodingError {
	format: Option<ParserId>,
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` from a [`ParserId`] and description
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::error::FileDecodingError;
	/// use tagweave::resolve::ParserId;
	///
	/// // This error is bounded to `ParserId::Flac`, which will be displayed when the error is formatted
	/// let flac_error = FileDecodingError::new(ParserId::Flac, "Something went wrong in the FLAC file!");
	/// ```
	#[must_use]
	pub const fn new(format: ParserId, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// Create a `FileDecodingError` without binding it to a [`ParserId`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// Returns the associated [`ParserId`], if one exists
	pub fn format(&self) -> Option<ParserId> {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{}: {}", format, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within tagweave
pub struct MetadataError {
	pub(crate) kind: ErrorKind,
}

impl MetadataError {
	/// Create a `MetadataError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::error::{ErrorKind, MetadataError};
	///
	/// let unknown_format = MetadataError::new(ErrorKind::UnknownFormat);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::error::{ErrorKind, MetadataError};
	///
	/// let unknown_format = MetadataError::new(ErrorKind::UnknownFormat);
	/// if let ErrorKind::UnknownFormat = unknown_format.kind() {
	/// 	println!("What's the format?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for MetadataError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::OggPage(ref err) => Some(err),
			ErrorKind::StringFromUtf8(ref err) => Some(err),
			ErrorKind::Io(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for MetadataError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<ErrorKind> for MetadataError {
	fn from(kind: ErrorKind) -> Self {
		Self { kind }
	}
}

impl From<ParserLoadError> for MetadataError {
	fn from(input: ParserLoadError) -> Self {
		Self {
			kind: ErrorKind::ParserLoad(input),
		}
	}
}

impl From<FileDecodingError> for MetadataError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::FileDecoding(input),
		}
	}
}

impl From<ogg_pager::PageError> for MetadataError {
	fn from(input: ogg_pager::PageError) -> Self {
		Self {
			kind: ErrorKind::OggPage(input),
		}
	}
}

impl From<std::io::Error> for MetadataError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for MetadataError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl Display for MetadataError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::OggPage(ref err) => write!(f, "{err}"),
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::UnknownFormat => write!(f, "Failed to guess MIME-type"),
			ErrorKind::UnsupportedMimeType(ref mime) => {
				write!(f, "Guessed MIME-type not supported: {mime}")
			},
			ErrorKind::ParserLoad(ref err) => write!(f, "{err}"),
			ErrorKind::UnmappedFormat(format) => {
				write!(f, "No generic tag mapper defined for tag-format: {format}")
			},
			ErrorKind::NotAPicture => write!(f, "Picture: Encountered invalid data"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),

			// Files
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::FileDecoding(ref file_decode_err) => write!(f, "{file_decode_err}"),
		}
	}
}
