use crate::resolve::ParserLoader;

use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options to control how tagweave resolves and parses a file
///
/// Built with chained setters, each taking and returning the options by value.
///
/// # Examples
///
/// ```rust
/// use tagweave::config::ParseOptions;
///
/// let options = ParseOptions::new()
/// 	.content_type("audio/mpeg")
/// 	.merge_tag_headers(true)
/// 	.skip_covers(true);
///
/// assert!(options.tag_headers_merged());
/// assert_eq!(options.declared_content_type(), Some("audio/mpeg"));
/// ```
#[derive(Clone, Default)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) path: Option<PathBuf>,
	pub(crate) content_type: Option<String>,
	pub(crate) file_size: Option<u64>,
	pub(crate) include_native: bool,
	pub(crate) merge_tag_headers: bool,
	pub(crate) skip_covers: bool,
	pub(crate) max_junk_bytes: Option<usize>,
	pub(crate) parser_loader: Option<Arc<dyn ParserLoader>>,
}

impl Debug for ParseOptions {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ParseOptions")
			.field("path", &self.path)
			.field("content_type", &self.content_type)
			.field("file_size", &self.file_size)
			.field("include_native", &self.include_native)
			.field("merge_tag_headers", &self.merge_tag_headers)
			.field("skip_covers", &self.skip_covers)
			.field("max_junk_bytes", &self.max_junk_bytes_or_default())
			.field("parser_loader", &self.parser_loader.is_some())
			.finish()
	}
}

impl ParseOptions {
	/// Default number of junk bytes to search for an MPEG frame sync
	pub const DEFAULT_MAX_JUNK_BYTES: usize = 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// Nothing is declared, native tags are not included, tag headers are not merged, and
	/// covers are read.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare the path or file name of the source
	///
	/// Used to resolve the format by extension when no content type is declared.
	#[must_use]
	pub fn path(mut self, path: impl AsRef<Path>) -> Self {
		self.path = Some(path.as_ref().to_path_buf());
		self
	}

	/// Declare the content type (MIME type) of the source
	///
	/// This takes precedence over both the path and the tokenizer's own content type.
	#[must_use]
	pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// Declare the total length of the source
	///
	/// Only used when the tokenizer doesn't know its own length.
	#[must_use]
	pub fn file_size(mut self, file_size: u64) -> Self {
		self.file_size = Some(file_size);
		self
	}

	/// Whether to keep the native tags in the result
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::config::ParseOptions;
	///
	/// // I want to see the raw frames as well
	/// let options = ParseOptions::new().include_native(true);
	/// ```
	#[must_use]
	pub fn include_native(mut self, include_native: bool) -> Self {
		self.include_native = include_native;
		self
	}

	/// Whether lower priority tag formats may fill in fields the higher priority ones left empty
	///
	/// When disabled (the default), only the highest priority format with tags is used.
	#[must_use]
	pub fn merge_tag_headers(mut self, merge_tag_headers: bool) -> Self {
		self.merge_tag_headers = merge_tag_headers;
		self
	}

	/// Whether to skip reading embedded pictures
	#[must_use]
	pub fn skip_covers(mut self, skip_covers: bool) -> Self {
		self.skip_covers = skip_covers;
		self
	}

	/// The maximum number of junk bytes to search before giving up on finding audio
	#[must_use]
	pub fn max_junk_bytes(mut self, max_junk_bytes: usize) -> Self {
		self.max_junk_bytes = Some(max_junk_bytes);
		self
	}

	/// Use a custom loader to resolve format parsers
	///
	/// The loader is asked for a parser once the format has been resolved. Returning `None` fails
	/// the parse with [`ErrorKind::ParserLoad`](crate::error::ErrorKind::ParserLoad). The built-in
	/// parsers can still be reached through [`BuiltinLoader`](crate::resolve::BuiltinLoader).
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::config::ParseOptions;
	/// use tagweave::resolve::{BuiltinLoader, ParserId, ParserLoader};
	///
	/// // Only allow FLAC files
	/// let options = ParseOptions::new().parser_loader(|id: ParserId| match id {
	/// 	ParserId::Flac => BuiltinLoader.load(id),
	/// 	_ => None,
	/// });
	/// ```
	#[must_use]
	pub fn parser_loader(mut self, loader: impl ParserLoader + 'static) -> Self {
		self.parser_loader = Some(Arc::new(loader));
		self
	}

	/// The declared path, if any
	pub fn declared_path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// The declared content type, if any
	pub fn declared_content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}

	/// The declared file size, if any
	pub fn declared_file_size(&self) -> Option<u64> {
		self.file_size
	}

	/// Whether native tags are kept in the result
	pub fn native_included(&self) -> bool {
		self.include_native
	}

	/// Whether tag headers are merged
	pub fn tag_headers_merged(&self) -> bool {
		self.merge_tag_headers
	}

	/// Whether embedded pictures are skipped
	pub fn covers_skipped(&self) -> bool {
		self.skip_covers
	}

	pub(crate) fn max_junk_bytes_or_default(&self) -> usize {
		self.max_junk_bytes.unwrap_or(Self::DEFAULT_MAX_JUNK_BYTES)
	}
}
