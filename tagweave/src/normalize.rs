//! Normalization of native tags into the common schema
//!
//! Tag formats are visited in [`TagFormat::PRIORITY`] order, regardless of where they are stored
//! in the file. Each format is mapped into its own [`TagFragment`], which then fills in whatever
//! the higher priority formats left unset. Without `merge_tag_headers`, only the first format with
//! any tags is used at all.

use crate::common::{CommonTags, TagFragment};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::io::Tokenizer;
use crate::mapping::MapperRegistry;
use crate::probe::parse_native;
use crate::properties::FormatInfo;
use crate::tag::{NativeMetadata, NativeTags, TagFormat};

/// The result of a parse
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct AudioMetadata {
	/// The container and codec information, including every tag format found
	pub format: FormatInfo,
	/// The native tags, only present if requested with [`ParseOptions::include_native`]
	pub native: Option<NativeTags>,
	/// The normalized tags
	pub common: CommonTags,
}

/// Parses and normalizes audio metadata
///
/// A `MetadataParser` only holds its [`MapperRegistry`], so a single instance can be reused
/// for any number of parses.
///
/// # Examples
///
/// ```rust
/// use tagweave::normalize::MetadataParser;
/// use tagweave::tag::{NativeMetadata, NativeTag, TagFormat};
///
/// # fn main() -> tagweave::error::Result<()> {
/// let mut native = NativeMetadata::default();
/// native.native.push(TagFormat::Vorbis, NativeTag::new("TITLE", "Foo"));
///
/// let metadata = MetadataParser::new().parse_native_tags(native, false, false)?;
/// assert_eq!(metadata.common.title(), Some("Foo"));
/// assert!(metadata.native.is_none());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataParser {
	registry: MapperRegistry,
}

impl MetadataParser {
	/// Create a `MetadataParser` with every mapper registered
	pub fn new() -> Self {
		Self::with_registry(MapperRegistry::new())
	}

	/// Create a `MetadataParser` using a custom [`MapperRegistry`]
	pub fn with_registry(registry: MapperRegistry) -> Self {
		Self { registry }
	}

	/// The registry used for mapping
	pub fn registry(&self) -> &MapperRegistry {
		&self.registry
	}

	/// Dispatch a tokenizer to its parser and normalize the result
	///
	/// # Errors
	///
	/// * See [`parse_native`]
	/// * See [`MetadataParser::parse_native_tags`]
	pub fn parse(&self, reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<AudioMetadata> {
		let native = parse_native(reader, options)?;
		self.parse_native_tags(native, options.include_native, options.merge_tag_headers)
	}

	/// Normalize native tags that have already been parsed
	///
	/// # Errors
	///
	/// * A format in `metadata` has no registered mapper ([`ErrorKind::UnmappedFormat`])
	///
	/// [`ErrorKind::UnmappedFormat`]: crate::error::ErrorKind::UnmappedFormat
	pub fn parse_native_tags(
		&self,
		metadata: NativeMetadata,
		include_native: bool,
		merge_tag_headers: bool,
	) -> Result<AudioMetadata> {
		let NativeMetadata { mut format, native } = metadata;

		format.tag_types = native.formats().collect();

		let mut common = TagFragment::new();

		for tag_format in TagFormat::PRIORITY {
			let Some(tags) = native.get(tag_format) else {
				continue;
			};

			if tags.is_empty() {
				log::warn!("Normalize: Found an empty {tag_format} tag, skipping");
				continue;
			}

			let mut fragment = TagFragment::new();
			for tag in tags {
				self.registry.set_generic_tag(&mut fragment, tag_format, tag)?;
			}

			log::debug!("Normalize: Mapped {} {tag_format} tags", tags.len());

			common.merge_absent(fragment);

			if !merge_tag_headers {
				break;
			}
		}

		Ok(AudioMetadata {
			format,
			native: include_native.then_some(native),
			common: common.into_common(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::MetadataParser;
	use crate::common::{CommonKey, Position};
	use crate::error::ErrorKind;
	use crate::mapping::{MapperRegistry, TagMapper};
	use crate::tag::{NativeMetadata, NativeTag, TagFormat};

	fn metadata(tags: &[(TagFormat, &str, &str)]) -> NativeMetadata {
		let mut metadata = NativeMetadata::default();
		for (format, id, value) in tags {
			metadata.native.push(*format, NativeTag::new(*id, *value));
		}

		metadata
	}

	#[test_log::test]
	fn empty_collection() {
		let result = MetadataParser::new()
			.parse_native_tags(NativeMetadata::default(), true, true)
			.unwrap();

		assert_eq!(result.common.track(), Position::default());
		assert_eq!(result.common.disk(), Position::default());
		assert_eq!(result.common.len(), 2);
		assert!(result.format.tag_types.is_empty());
		assert!(result.native.unwrap().is_empty());
	}

	#[test_log::test]
	fn tag_types_keep_file_order() {
		let native = metadata(&[
			(TagFormat::Id3v1, "title", "v1"),
			(TagFormat::Apev2, "Title", "ape"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert_eq!(result.format.tag_types, [TagFormat::Id3v1, TagFormat::Apev2]);
		// But the priority order decides who wins
		assert_eq!(result.common.title(), Some("ape"));
	}

	#[test_log::test]
	fn single_winner() {
		let native = metadata(&[
			(TagFormat::Id3v24, "TIT2", "v24"),
			(TagFormat::Id3v1, "title", "v1"),
			(TagFormat::Id3v1, "album", "v1 album"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert_eq!(result.common.title(), Some("v24"));
		assert!(result.common.album().is_none());
	}

	#[test_log::test]
	fn merge_fills_gaps() {
		let native = metadata(&[
			(TagFormat::Id3v24, "TIT2", "v24"),
			(TagFormat::Id3v1, "title", "v1"),
			(TagFormat::Id3v1, "album", "v1 album"),
			(TagFormat::Id3v1, "track", "3"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, true).unwrap();
		assert_eq!(result.common.title(), Some("v24"));
		assert_eq!(result.common.album(), Some("v1 album"));
		assert_eq!(result.common.track().no, Some(3));
	}

	#[test_log::test]
	fn empty_format_does_not_win() {
		let mut native = metadata(&[(TagFormat::Id3v1, "title", "v1")]);
		native.native.extend(TagFormat::Apev2, Vec::new());

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert_eq!(result.format.tag_types, [TagFormat::Id3v1, TagFormat::Apev2]);
		assert_eq!(result.common.title(), Some("v1"));
	}

	#[test_log::test]
	fn unmapped_tags_still_win() {
		// The highest priority format carries nothing mappable, which still ends the search
		let native = metadata(&[
			(TagFormat::Vorbis, "X_UNKNOWN_FIELD", "x"),
			(TagFormat::Id3v1, "title", "v1"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert!(result.common.title().is_none());
	}

	#[test_log::test]
	fn artists_are_joined() {
		let native = metadata(&[
			(TagFormat::Vorbis, "ARTISTS", "A"),
			(TagFormat::Vorbis, "ARTISTS", "B"),
			(TagFormat::Vorbis, "ARTISTS", "C"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert_eq!(result.common.artist(), Some("A, B & C"));
		assert_eq!(result.common.artists(), ["A", "B", "C"]);
	}

	#[test_log::test]
	fn explicit_artist_wins() {
		let native = metadata(&[
			(TagFormat::Vorbis, "ARTIST", "A feat. B"),
			(TagFormat::Vorbis, "ARTISTS", "A"),
			(TagFormat::Vorbis, "ARTISTS", "B"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert_eq!(result.common.artist(), Some("A feat. B"));
		assert_eq!(result.common.artists(), ["A", "B"]);
	}

	#[test_log::test]
	fn multiple_artist_values_become_artists() {
		let native = metadata(&[
			(TagFormat::Vorbis, "ARTIST", "A"),
			(TagFormat::Vorbis, "ARTIST", "B"),
		]);

		let result = MetadataParser::new().parse_native_tags(native, false, false).unwrap();
		assert_eq!(result.common.artist(), Some("A"));
		assert_eq!(result.common.artists(), ["A", "B"]);
	}

	#[test_log::test]
	fn unmapped_format_is_fatal() {
		let parser = MetadataParser::with_registry(MapperRegistry::from_mappers([TagMapper::Id3v1]));
		let native = metadata(&[(TagFormat::Vorbis, "TITLE", "Foo")]);

		let err = parser.parse_native_tags(native, false, false).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnmappedFormat(TagFormat::Vorbis)));
	}

	#[test_log::test]
	fn native_is_optional() {
		let native = metadata(&[(TagFormat::Vorbis, "TITLE", "Foo")]);

		let result = MetadataParser::new().parse_native_tags(native.clone(), true, false).unwrap();
		assert_eq!(result.native, Some(native.native));
		assert!(result.common.contains(CommonKey::Title));
	}
}
