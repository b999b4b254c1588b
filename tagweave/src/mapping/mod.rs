//! Translation of native tags into the common schema
//!
//! Every [`TagFormat`] is served by one [`TagMapper`]. The [`MapperRegistry`] holds the mappers,
//! keyed by the formats they declare, and is what normalization talks to.

mod convert;
mod maps;

use crate::common::{CommonKey, TagFragment};
use crate::error::{ErrorKind, MetadataError, Result};
use crate::picture::Picture;
use crate::tag::{NativeTag, NativeValue, TagFormat};

use maps::{
	APE_MAP, ASF_MAP, ID3V1_MAP, ID3V2_2_MAP, ID3V2_4_MAP, MP4_MAP, RIFF_INFO_MAP, VORBIS_MAP,
};

use std::collections::HashMap;

/// The per-format translation from native tags to common fields
///
/// A mapper looks at a native tag's identifier and, if it recognizes it, writes the value into a
/// [`TagFragment`]. Unrecognized identifiers are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagMapper {
	/// ID3v1 and ID3v1.1
	Id3v1,
	/// ID3v2.2, with its three character frame IDs
	Id3v22,
	/// ID3v2.3 and ID3v2.4
	Id3v24,
	/// MP4 `ilst` atoms
	Mp4,
	/// Vorbis comments
	Vorbis,
	/// APE tags
	Apev2,
	/// ASF attributes
	Asf,
	/// RIFF INFO chunks
	RiffInfo,
}

impl TagMapper {
	/// Every mapper
	pub const ALL: [TagMapper; 8] = [
		TagMapper::Id3v1,
		TagMapper::Id3v22,
		TagMapper::Id3v24,
		TagMapper::Mp4,
		TagMapper::Vorbis,
		TagMapper::Apev2,
		TagMapper::Asf,
		TagMapper::RiffInfo,
	];

	/// The tag formats this mapper handles
	pub fn formats(self) -> &'static [TagFormat] {
		match self {
			Self::Id3v1 => &[TagFormat::Id3v1],
			Self::Id3v22 => &[TagFormat::Id3v22],
			Self::Id3v24 => &[TagFormat::Id3v23, TagFormat::Id3v24],
			Self::Mp4 => &[TagFormat::Mp4],
			Self::Vorbis => &[TagFormat::Vorbis],
			Self::Apev2 => &[TagFormat::Apev2],
			Self::Asf => &[TagFormat::Asf],
			Self::RiffInfo => &[TagFormat::Exif],
		}
	}

	/// The common field a native identifier maps to, if any
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::common::CommonKey;
	/// use tagweave::mapping::TagMapper;
	///
	/// assert_eq!(TagMapper::Asf.common_key("WM/AlbumTitle"), Some(CommonKey::Album));
	/// assert_eq!(TagMapper::Vorbis.common_key("tracknumber"), Some(CommonKey::Track));
	/// assert_eq!(TagMapper::Id3v24.common_key("PRIV"), None);
	/// ```
	pub fn common_key(self, id: &str) -> Option<CommonKey> {
		match self {
			Self::Id3v1 => ID3V1_MAP.get_common_key(id),
			Self::Id3v22 => ID3V2_2_MAP.get_common_key(id),
			Self::Id3v24 => ID3V2_4_MAP.get_common_key(id),
			Self::Mp4 => MP4_MAP.get_common_key(id),
			Self::Vorbis => VORBIS_MAP.get_common_key(id),
			Self::Apev2 => APE_MAP.get_common_key(id),
			Self::Asf => ASF_MAP.get_common_key(id),
			Self::RiffInfo => RIFF_INFO_MAP.get_common_key(id),
		}
	}

	/// Merge a native tag into `fragment`
	pub fn set_generic_tag(self, fragment: &mut TagFragment, tag: &NativeTag) {
		if self.set_special(fragment, tag) {
			return;
		}

		let Some(key) = self.common_key(&tag.id) else {
			log::trace!("Mapping: No common field for {:?} '{}'", self, tag.id);
			return;
		};

		convert::set_value(fragment, key, &tag.value);
	}

	// Identifiers that need more than a table lookup
	fn set_special(self, fragment: &mut TagFragment, tag: &NativeTag) -> bool {
		let id = tag.id.as_str();
		let value = &tag.value;

		match self {
			Self::Id3v22 | Self::Id3v24 => {
				let (comment, lyrics) = if self == Self::Id3v22 {
					("COM:", "ULT:")
				} else {
					("COMM:", "USLT:")
				};

				if self.common_key(id).is_some() {
					return false;
				}

				// Described comments and lyrics still count, unless the description has its own field
				if id.starts_with(comment) {
					convert::set_value(fragment, CommonKey::Comment, value);
					return true;
				}

				if id.starts_with(lyrics) {
					convert::set_value(fragment, CommonKey::Lyrics, value);
					return true;
				}

				false
			},
			Self::Vorbis => {
				if id.eq_ignore_ascii_case("TRACKTOTAL") || id.eq_ignore_ascii_case("TOTALTRACKS") {
					set_total(fragment, CommonKey::Track, value);
					return true;
				}

				if id.eq_ignore_ascii_case("DISCTOTAL") || id.eq_ignore_ascii_case("TOTALDISCS") {
					set_total(fragment, CommonKey::Disk, value);
					return true;
				}

				if id.eq_ignore_ascii_case("METADATA_BLOCK_PICTURE") {
					match value {
						NativeValue::Text(encoded) => match Picture::from_flac_bytes(encoded.as_bytes(), true) {
							Ok(picture) => {
								fragment.push_picture(picture);
							},
							Err(e) => log::warn!("Mapping: Unable to decode Vorbis picture: {e}"),
						},
						_ => convert::set_value(fragment, CommonKey::Picture, value),
					}

					return true;
				}

				// `RATING` or `RATING:<source>`
				if id.get(..6).is_some_and(|prefix| prefix.eq_ignore_ascii_case("RATING")) {
					let source = id.get(7..).filter(|s| !s.is_empty());
					if id.len() == 6 || id.as_bytes().get(6) == Some(&b':') {
						if let Some(rating) = value.text().and_then(|v| convert::parse_rating(v, source)) {
							fragment.push_rating(rating);
						}

						return true;
					}
				}

				false
			},
			Self::Apev2 => {
				if let (Some(_), NativeValue::Binary(data)) =
					(crate::picture::PictureType::from_ape_key(id), value)
				{
					match Picture::from_ape_bytes(id, data) {
						Ok(picture) => {
							fragment.push_picture(picture);
						},
						Err(e) => log::warn!("Mapping: Unable to decode APE picture: {e}"),
					}

					return true;
				}

				if id.eq_ignore_ascii_case("Rating") {
					if let Some(rating) = value.text().and_then(|v| convert::parse_rating(v, None)) {
						fragment.push_rating(rating);
					}

					return true;
				}

				false
			},
			Self::Mp4 => match (id, value) {
				("trkn" | "disk", NativeValue::Binary(data)) => {
					let key = if id == "trkn" { CommonKey::Track } else { CommonKey::Disk };
					if let Some(position) = convert::mp4_position(data) {
						fragment.set(key, crate::common::CommonValue::Position(position));
					}

					true
				},
				("gnre", _) => {
					if let Some(genre) = convert::mp4_genre(value) {
						fragment.set_text(CommonKey::Genre, genre);
					}

					true
				},
				("rate", _) => {
					if let Some(rating) = convert::scaled_rating(value, 100.0) {
						fragment.push_rating(rating);
					}

					true
				},
				_ => false,
			},
			Self::Asf => match id {
				"WM/Picture" => {
					match value {
						NativeValue::Binary(data) => match convert::asf_picture(data) {
							Some(picture) => {
								fragment.push_picture(picture);
							},
							None => log::warn!("Mapping: Unable to decode ASF picture"),
						},
						_ => convert::set_value(fragment, CommonKey::Picture, value),
					}

					true
				},
				"WM/SharedUserRating" => {
					if let Some(rating) = convert::scaled_rating(value, 99.0) {
						fragment.push_rating(rating);
					}

					true
				},
				_ => false,
			},
			Self::RiffInfo => {
				if id == "IRTD" {
					if let Some(rating) = convert::scaled_rating(value, 100.0) {
						fragment.push_rating(rating);
					}

					return true;
				}

				false
			},
			Self::Id3v1 => false,
		}
	}
}

fn set_total(fragment: &mut TagFragment, key: CommonKey, value: &NativeValue) {
	match value {
		NativeValue::Text(text) => convert::set_total(fragment, key, text),
		NativeValue::Integer(integer) => convert::set_total(fragment, key, &integer.to_string()),
		_ => {},
	}
}

/// A lookup table from [`TagFormat`] to the [`TagMapper`] responsible for it
///
/// Built once and reused for every parse.
#[derive(Debug, Clone)]
pub struct MapperRegistry {
	mappers: HashMap<TagFormat, TagMapper>,
}

impl Default for MapperRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl MapperRegistry {
	/// Create a registry with every [`TagMapper`]
	pub fn new() -> Self {
		Self::from_mappers(TagMapper::ALL)
	}

	/// Create a registry with only the given mappers
	///
	/// Each mapper is registered under every format it declares. If two mappers declare the same
	/// format, the later one wins.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::mapping::{MapperRegistry, TagMapper};
	/// use tagweave::tag::TagFormat;
	///
	/// let registry = MapperRegistry::from_mappers([TagMapper::Vorbis]);
	/// assert!(registry.get(TagFormat::Vorbis).is_some());
	/// assert!(registry.get(TagFormat::Id3v1).is_none());
	/// ```
	pub fn from_mappers(mappers: impl IntoIterator<Item = TagMapper>) -> Self {
		let mut registry = HashMap::new();
		for mapper in mappers {
			for format in mapper.formats() {
				registry.insert(*format, mapper);
			}
		}

		Self { mappers: registry }
	}

	/// Get the mapper registered for `format`
	pub fn get(&self, format: TagFormat) -> Option<TagMapper> {
		self.mappers.get(&format).copied()
	}

	/// Merge a native tag of `format` into `fragment`
	///
	/// # Errors
	///
	/// * No mapper is registered for `format`
	pub fn set_generic_tag(
		&self,
		fragment: &mut TagFragment,
		format: TagFormat,
		tag: &NativeTag,
	) -> Result<()> {
		let Some(mapper) = self.get(format) else {
			return Err(MetadataError::new(ErrorKind::UnmappedFormat(format)));
		};

		mapper.set_generic_tag(fragment, tag);
		Ok(())
	}
}
