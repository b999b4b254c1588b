//! Native, format-specific tags
//!
//! A parser produces [`NativeTags`]: for every [`TagFormat`] it found, the ordered list of
//! [`NativeTag`]s exactly as the container stores them. Nothing here is normalized, that is the job
//! of the [`mapping`](crate::mapping) module.

mod format;

pub use format::TagFormat;

use crate::picture::Picture;
use crate::properties::FormatInfo;

use std::collections::BTreeMap;

/// A POPM/POP rating
///
/// `rating` ranges from 0 (unknown) to 255, `counter` is the play count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Popularimeter {
	/// The email of the user that made the rating
	pub email: Option<String>,
	/// The raw rating, 1-255
	pub rating: u8,
	/// The play counter
	pub counter: u64,
}

/// The value of a [`NativeTag`]
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NativeValue {
	/// A text value
	Text(String),
	/// An integer value, such as an MP4 `tmpo` atom
	Integer(i64),
	/// A floating point value
	Float(f64),
	/// A boolean value, such as an ASF `WM/IsCompilation` attribute
	Bool(bool),
	/// Binary data the mapper has to interpret
	Binary(Vec<u8>),
	/// A decoded picture
	Picture(Picture),
	/// An ID3v2 popularimeter
	Popularimeter(Popularimeter),
}

impl NativeValue {
	/// Returns the text, if this is a [`NativeValue::Text`]
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the binary content, if this is a [`NativeValue::Binary`]
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(bin) => Some(bin),
			_ => None,
		}
	}

	/// Whether the value carries no information
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(text) => text.is_empty(),
			Self::Binary(bin) => bin.is_empty(),
			_ => false,
		}
	}
}

impl From<String> for NativeValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for NativeValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<Picture> for NativeValue {
	fn from(value: Picture) -> Self {
		Self::Picture(value)
	}
}

/// An (identifier, value) pair in a format's own vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct NativeTag {
	/// The identifier, such as `TIT2`, `ARTIST`, or `WM/AlbumTitle`
	pub id: String,
	/// The value
	pub value: NativeValue,
}

impl NativeTag {
	/// Create a new `NativeTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::tag::{NativeTag, NativeValue};
	///
	/// let tag = NativeTag::new("TIT2", "Foo title");
	/// assert_eq!(tag.value, NativeValue::Text(String::from("Foo title")));
	/// ```
	pub fn new(id: impl Into<String>, value: impl Into<NativeValue>) -> Self {
		Self {
			id: id.into(),
			value: value.into(),
		}
	}
}

/// The native tags of a file, grouped by [`TagFormat`]
///
/// Formats are kept in the order they were first inserted, which is the order a parser
/// encountered them. Each format holds at most one list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeTags {
	formats: Vec<(TagFormat, Vec<NativeTag>)>,
}

impl NativeTags {
	/// Create an empty collection
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a tag to `format`'s list, creating the list if necessary
	pub fn push(&mut self, format: TagFormat, tag: NativeTag) {
		self.list_mut(format).push(tag);
	}

	/// Append many tags to `format`'s list, creating the list if necessary
	///
	/// An empty `tags` still registers `format` as present.
	pub fn extend(&mut self, format: TagFormat, tags: impl IntoIterator<Item = NativeTag>) {
		self.list_mut(format).extend(tags);
	}

	/// Get the tags stored for `format`
	pub fn get(&self, format: TagFormat) -> Option<&[NativeTag]> {
		self.formats
			.iter()
			.find(|(f, _)| *f == format)
			.map(|(_, tags)| tags.as_slice())
	}

	/// Whether `format` is present, even with an empty list
	pub fn contains(&self, format: TagFormat) -> bool {
		self.formats.iter().any(|(f, _)| *f == format)
	}

	/// The formats present, in insertion order
	pub fn formats(&self) -> impl Iterator<Item = TagFormat> + '_ {
		self.formats.iter().map(|(f, _)| *f)
	}

	/// Iterate over every format and its tags, in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (TagFormat, &[NativeTag])> {
		self.formats.iter().map(|(f, tags)| (*f, tags.as_slice()))
	}

	/// Whether no format is present
	pub fn is_empty(&self) -> bool {
		self.formats.is_empty()
	}

	fn list_mut(&mut self, format: TagFormat) -> &mut Vec<NativeTag> {
		let index = match self.formats.iter().position(|(f, _)| *f == format) {
			Some(index) => index,
			None => {
				self.formats.push((format, Vec::new()));
				self.formats.len() - 1
			},
		};

		&mut self.formats[index].1
	}
}

/// The output of a format parser
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NativeMetadata {
	/// The container and codec information
	pub format: FormatInfo,
	/// Every tag found, grouped by format
	pub native: NativeTags,
}

/// Group a list of native tags by identifier
///
/// Values keep their original relative order, so repeated identifiers (such as multiple
/// comments) can still be told apart by position.
///
/// # Examples
///
/// ```rust
/// use tagweave::tag::{NativeTag, NativeValue, order_tags};
///
/// let tags = [
/// 	NativeTag::new("ARTIST", "A"),
/// 	NativeTag::new("TITLE", "T"),
/// 	NativeTag::new("ARTIST", "B"),
/// ];
///
/// let ordered = order_tags(&tags);
/// assert_eq!(ordered["ARTIST"], [&NativeValue::from("A"), &NativeValue::from("B")]);
/// assert_eq!(ordered["TITLE"].len(), 1);
/// ```
pub fn order_tags(tags: &[NativeTag]) -> BTreeMap<&str, Vec<&NativeValue>> {
	let mut ordered: BTreeMap<&str, Vec<&NativeValue>> = BTreeMap::new();
	for tag in tags {
		ordered.entry(tag.id.as_str()).or_default().push(&tag.value);
	}

	ordered
}

#[cfg(test)]
mod tests {
	use super::{NativeTag, NativeTags, NativeValue, TagFormat, order_tags};

	#[test_log::test]
	fn insertion_order_is_kept() {
		let mut tags = NativeTags::new();
		tags.push(TagFormat::Id3v1, NativeTag::new("title", "v1"));
		tags.push(TagFormat::Id3v24, NativeTag::new("TIT2", "v24"));
		tags.push(TagFormat::Id3v1, NativeTag::new("artist", "v1 artist"));

		assert_eq!(
			tags.formats().collect::<Vec<_>>(),
			[TagFormat::Id3v1, TagFormat::Id3v24]
		);
		assert_eq!(tags.get(TagFormat::Id3v1).unwrap().len(), 2);
		assert!(tags.get(TagFormat::Vorbis).is_none());
	}

	#[test_log::test]
	fn empty_list_is_present() {
		let mut tags = NativeTags::new();
		tags.extend(TagFormat::Apev2, Vec::new());

		assert!(tags.contains(TagFormat::Apev2));
		assert_eq!(tags.get(TagFormat::Apev2), Some(&[][..]));
	}

	#[test_log::test]
	fn order_tags_keeps_duplicates_in_order() {
		let tags = [
			NativeTag::new("COMM", "first"),
			NativeTag::new("TIT2", "title"),
			NativeTag::new("COMM", "second"),
			NativeTag::new("COMM", "third"),
		];

		let ordered = order_tags(&tags);
		assert_eq!(ordered.len(), 2);
		assert_eq!(
			ordered["COMM"]
				.iter()
				.filter_map(|v| v.text())
				.collect::<Vec<_>>(),
			["first", "second", "third"]
		);
		assert_eq!(ordered["TIT2"], [&NativeValue::from("title")]);
	}
}
