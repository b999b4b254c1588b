use super::{CommonKey, CommonValue, Position, Rating};
use crate::picture::Picture;

use std::collections::BTreeMap;

/// The normalized, format-agnostic tags of a file
///
/// Produced by [`TagFragment::into_common`](super::TagFragment::into_common). `track` and
/// `disk` are always present, every other field only when some tag set it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonTags {
	pub(crate) items: BTreeMap<CommonKey, CommonValue>,
}

impl CommonTags {
	/// Get the value of a field
	pub fn get(&self, key: CommonKey) -> Option<&CommonValue> {
		self.items.get(&key)
	}

	/// Whether a field is present
	pub fn contains(&self, key: CommonKey) -> bool {
		self.items.contains_key(&key)
	}

	/// Iterate over every present field
	pub fn iter(&self) -> impl Iterator<Item = (CommonKey, &CommonValue)> {
		self.items.iter().map(|(k, v)| (*k, v))
	}

	/// The number of present fields, including `track` and `disk`
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether only the mandatory `track` and `disk` fields are present, and both are empty
	pub fn is_empty(&self) -> bool {
		self.items.values().all(CommonValue::is_empty)
	}

	/// Get a [`FieldKind::Text`](super::FieldKind::Text) field
	pub fn text(&self, key: CommonKey) -> Option<&str> {
		self.get(key).and_then(CommonValue::text)
	}

	/// Get a [`FieldKind::Texts`](super::FieldKind::Texts) field, empty if absent
	pub fn texts(&self, key: CommonKey) -> &[String] {
		self.get(key).and_then(CommonValue::texts).unwrap_or_default()
	}

	/// Get a [`FieldKind::Integer`](super::FieldKind::Integer) field
	pub fn integer(&self, key: CommonKey) -> Option<i64> {
		match self.get(key) {
			Some(CommonValue::Integer(integer)) => Some(*integer),
			_ => None,
		}
	}

	/// Get a [`FieldKind::Float`](super::FieldKind::Float) field
	pub fn float(&self, key: CommonKey) -> Option<f64> {
		match self.get(key) {
			Some(CommonValue::Float(float)) => Some(*float),
			_ => None,
		}
	}

	/// Get a [`FieldKind::Flag`](super::FieldKind::Flag) field
	pub fn flag(&self, key: CommonKey) -> Option<bool> {
		match self.get(key) {
			Some(CommonValue::Flag(flag)) => Some(*flag),
			_ => None,
		}
	}

	fn position(&self, key: CommonKey) -> Position {
		match self.get(key) {
			Some(CommonValue::Position(position)) => *position,
			_ => Position::default(),
		}
	}

	/// The track title
	pub fn title(&self) -> Option<&str> {
		self.text(CommonKey::Title)
	}

	/// The display artist
	pub fn artist(&self) -> Option<&str> {
		self.text(CommonKey::Artist)
	}

	/// The individual artists
	pub fn artists(&self) -> &[String] {
		self.texts(CommonKey::Artists)
	}

	/// The album artist
	pub fn album_artist(&self) -> Option<&str> {
		self.text(CommonKey::AlbumArtist)
	}

	/// The album title
	pub fn album(&self) -> Option<&str> {
		self.text(CommonKey::Album)
	}

	/// The track number and total
	pub fn track(&self) -> Position {
		self.position(CommonKey::Track)
	}

	/// The disk number and total
	pub fn disk(&self) -> Position {
		self.position(CommonKey::Disk)
	}

	/// The release year
	pub fn year(&self) -> Option<i64> {
		self.integer(CommonKey::Year)
	}

	/// The release date
	pub fn date(&self) -> Option<&str> {
		self.text(CommonKey::Date)
	}

	/// The genres
	pub fn genre(&self) -> &[String] {
		self.texts(CommonKey::Genre)
	}

	/// The comments
	pub fn comment(&self) -> &[String] {
		self.texts(CommonKey::Comment)
	}

	/// The composers
	pub fn composer(&self) -> &[String] {
		self.texts(CommonKey::Composer)
	}

	/// The embedded pictures
	pub fn pictures(&self) -> &[Picture] {
		match self.get(CommonKey::Picture) {
			Some(CommonValue::Pictures(pictures)) => pictures,
			_ => &[],
		}
	}

	/// The normalized ratings
	pub fn ratings(&self) -> &[Rating] {
		match self.get(CommonKey::Rating) {
			Some(CommonValue::Ratings(ratings)) => ratings,
			_ => &[],
		}
	}
}
