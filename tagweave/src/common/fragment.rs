use super::{CommonKey, CommonTags, CommonValue, FieldKind, Position, Rating, join_artists};
use crate::picture::Picture;

use std::collections::BTreeMap;

/// A common record under construction
///
/// Mappers write into a fragment one native tag at a time. Within a fragment, scalar fields
/// are first-writer-wins, list fields append (skipping exact duplicates), and positions fill
/// their `no`/`of` halves independently.
///
/// The `artist` field is special: it collects every value written to it, so that a
/// multi-valued artist can be reconciled with `artists` in [`TagFragment::into_common`].
#[derive(Debug, Clone, PartialEq)]
pub struct TagFragment {
	items: BTreeMap<CommonKey, CommonValue>,
	artist: Vec<String>,
}

impl Default for TagFragment {
	fn default() -> Self {
		Self::new()
	}
}

impl TagFragment {
	/// Create a fragment holding only the empty `track` and `disk` defaults
	pub fn new() -> Self {
		let mut items = BTreeMap::new();
		items.insert(CommonKey::Track, CommonValue::Position(Position::default()));
		items.insert(CommonKey::Disk, CommonValue::Position(Position::default()));

		Self {
			items,
			artist: Vec::new(),
		}
	}

	/// Get the value of a field
	///
	/// `artist` is not stored here until [`TagFragment::into_common`], see [`TagFragment::artist`].
	pub fn get(&self, key: CommonKey) -> Option<&CommonValue> {
		self.items.get(&key)
	}

	/// Every value written to `artist` so far
	pub fn artist(&self) -> &[String] {
		&self.artist
	}

	/// Whether a field carries a value
	///
	/// Empty positions, such as the `track`/`disk` defaults, are not considered set.
	pub fn is_set(&self, key: CommonKey) -> bool {
		if key == CommonKey::Artist {
			return !self.artist.is_empty();
		}

		self.items.get(&key).is_some_and(|value| !value.is_empty())
	}

	/// Whether no field other than the defaults has been set
	pub fn is_empty(&self) -> bool {
		self.artist.is_empty() && self.items.values().all(CommonValue::is_empty)
	}

	/// Write a text value to a field of any kind
	///
	/// The text is converted according to the field's [`FieldKind`]. Values that fail to
	/// convert, and empty values, are dropped. Returns whether the fragment changed.
	pub fn set_text(&mut self, key: CommonKey, value: &str) -> bool {
		let value = value.trim_end_matches('\0');
		if value.trim().is_empty() {
			return false;
		}

		if key == CommonKey::Artist {
			return push_unique(&mut self.artist, value);
		}

		let converted = match key.kind() {
			FieldKind::Text => CommonValue::Text(value.to_owned()),
			FieldKind::Texts => CommonValue::Texts(vec![value.to_owned()]),
			FieldKind::Integer => match parse_integer(value) {
				Some(integer) => CommonValue::Integer(integer),
				None => {
					log::debug!("Common: Dropping non-numeric value for '{}'", key.name());
					return false;
				},
			},
			FieldKind::Float => match parse_float(value) {
				Some(float) => CommonValue::Float(float),
				None => {
					log::debug!("Common: Dropping non-numeric value for '{}'", key.name());
					return false;
				},
			},
			FieldKind::Flag => match parse_flag(value) {
				Some(flag) => CommonValue::Flag(flag),
				None => return false,
			},
			FieldKind::Position => CommonValue::Position(Position::parse(value)),
			FieldKind::Ratings => match parse_float(value) {
				Some(rating) => CommonValue::Ratings(vec![Rating::new(None, rating)]),
				None => return false,
			},
			FieldKind::Pictures => {
				log::warn!("Common: Attempted to store text in a picture field");
				return false;
			},
		};

		self.set(key, converted)
	}

	/// Merge a value into a field
	///
	/// The value is dropped if its shape doesn't match the field's [`FieldKind`].
	/// Returns whether the fragment changed.
	pub fn set(&mut self, key: CommonKey, value: CommonValue) -> bool {
		if value.is_empty() {
			return false;
		}

		if key == CommonKey::Artist {
			return match value {
				CommonValue::Text(text) => self.set_text(key, &text),
				CommonValue::Texts(texts) => {
					let mut changed = false;
					for text in texts {
						changed |= self.set_text(key, &text);
					}
					changed
				},
				_ => false,
			};
		}

		if !kind_matches(key.kind(), &value) {
			log::warn!(
				"Common: Value {:?} doesn't fit field '{}'",
				value,
				key.name()
			);
			return false;
		}

		if !self.items.contains_key(&key) {
			self.items.insert(key, value);
			return true;
		}

		let Some(existing) = self.items.get_mut(&key) else {
			return false;
		};

		match (existing, value) {
			(CommonValue::Texts(existing), CommonValue::Texts(new)) => {
				let mut changed = false;
				for text in new {
					changed |= push_unique(existing, &text);
				}
				changed
			},
			(CommonValue::Pictures(existing), CommonValue::Pictures(new)) => {
				for picture in new {
					if !existing.contains(&picture) {
						existing.push(picture);
					}
				}
				true
			},
			(CommonValue::Ratings(existing), CommonValue::Ratings(new)) => {
				existing.extend(new);
				true
			},
			(CommonValue::Position(existing), CommonValue::Position(new)) => {
				let before = *existing;
				existing.fill(new);
				before != *existing
			},
			// Scalars, first writer wins
			_ => false,
		}
	}

	/// Add a picture
	pub fn push_picture(&mut self, picture: Picture) -> bool {
		self.set(CommonKey::Picture, CommonValue::Pictures(vec![picture]))
	}

	/// Add a rating
	pub fn push_rating(&mut self, rating: Rating) -> bool {
		self.set(CommonKey::Rating, CommonValue::Ratings(vec![rating]))
	}

	/// Copy every field of `other` that is not yet set in `self`
	///
	/// Unlike [`TagFragment::set`], a field that is set is never touched, even if it is a list
	/// or a partially filled position.
	pub fn merge_absent(&mut self, other: TagFragment) {
		if self.artist.is_empty() {
			self.artist = other.artist;
		}

		for (key, value) in other.items {
			if value.is_empty() || self.is_set(key) {
				continue;
			}

			self.items.insert(key, value);
		}
	}

	/// Freeze the fragment, reconciling `artist` with `artists`
	///
	/// * If `artists` has entries, `artist` becomes the first explicitly written artist, or if
	///   there is none, the [`join_artists`] of `artists`.
	/// * Otherwise, if `artist` was written, its values become `artists` and the first one
	///   remains as `artist`. This holds even when there are several values.
	pub fn into_common(self) -> CommonTags {
		let Self {
			mut items,
			mut artist,
		} = self;

		let artists = match items.get(&CommonKey::Artists) {
			Some(CommonValue::Texts(artists)) if !artists.is_empty() => Some(artists.clone()),
			_ => None,
		};

		let display_artist = match artists {
			Some(artists) => {
				if artist.is_empty() {
					Some(join_artists(&artists))
				} else {
					Some(artist.swap_remove(0))
				}
			},
			None if !artist.is_empty() => {
				let first = artist[0].clone();
				items.insert(CommonKey::Artists, CommonValue::Texts(artist));
				Some(first)
			},
			None => None,
		};

		if let Some(display_artist) = display_artist {
			items.insert(CommonKey::Artist, CommonValue::Text(display_artist));
		}

		CommonTags { items }
	}
}

fn kind_matches(kind: FieldKind, value: &CommonValue) -> bool {
	matches!(
		(kind, value),
		(FieldKind::Text, CommonValue::Text(_))
			| (FieldKind::Integer, CommonValue::Integer(_))
			| (FieldKind::Float, CommonValue::Float(_))
			| (FieldKind::Flag, CommonValue::Flag(_))
			| (FieldKind::Texts, CommonValue::Texts(_))
			| (FieldKind::Position, CommonValue::Position(_))
			| (FieldKind::Pictures, CommonValue::Pictures(_))
			| (FieldKind::Ratings, CommonValue::Ratings(_))
	)
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
	if value.is_empty() || list.iter().any(|v| v == value) {
		return false;
	}

	list.push(value.to_owned());
	true
}

fn parse_integer(value: &str) -> Option<i64> {
	let value = value.trim();
	if let Ok(integer) = value.parse::<i64>() {
		return Some(integer);
	}

	// Dates such as `2004-05-03`, keep the leading year
	let digits = value
		.find(|c: char| !c.is_ascii_digit())
		.map_or(value, |end| &value[..end]);
	digits.parse::<i64>().ok()
}

fn parse_float(value: &str) -> Option<f64> {
	let value = value.trim();
	// ReplayGain values carry a unit, such as `-6.54 dB`
	let value = value
		.strip_suffix("dB")
		.or_else(|| value.strip_suffix("db"))
		.unwrap_or(value)
		.trim();

	value.parse::<f64>().ok().filter(|f| f.is_finite())
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" => Some(true),
		"0" | "false" | "no" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::TagFragment;
	use crate::common::{CommonKey, CommonValue, Position};

	#[test_log::test]
	fn defaults() {
		let fragment = TagFragment::new();
		assert_eq!(
			fragment.get(CommonKey::Track),
			Some(&CommonValue::Position(Position::default()))
		);
		assert_eq!(
			fragment.get(CommonKey::Disk),
			Some(&CommonValue::Position(Position::default()))
		);
		assert!(!fragment.is_set(CommonKey::Track));
		assert!(fragment.is_empty());
	}

	#[test_log::test]
	fn scalar_first_writer_wins() {
		let mut fragment = TagFragment::new();
		assert!(fragment.set_text(CommonKey::Title, "First"));
		assert!(!fragment.set_text(CommonKey::Title, "Second"));

		assert_eq!(fragment.get(CommonKey::Title).and_then(CommonValue::text), Some("First"));
	}

	#[test_log::test]
	fn list_appends_unique() {
		let mut fragment = TagFragment::new();
		fragment.set_text(CommonKey::Genre, "Rock");
		fragment.set_text(CommonKey::Genre, "Pop");
		fragment.set_text(CommonKey::Genre, "Rock");

		assert_eq!(
			fragment.get(CommonKey::Genre).and_then(CommonValue::texts),
			Some(&[String::from("Rock"), String::from("Pop")][..])
		);
	}

	#[test_log::test]
	fn position_halves() {
		let mut fragment = TagFragment::new();
		fragment.set_text(CommonKey::Track, "3");
		fragment.set_text(CommonKey::Track, "/10");
		fragment.set_text(CommonKey::Track, "4/11");

		assert_eq!(
			fragment.get(CommonKey::Track),
			Some(&CommonValue::Position(Position::new(Some(3), Some(10))))
		);
	}

	#[test_log::test]
	fn empty_and_invalid_values_are_dropped() {
		let mut fragment = TagFragment::new();
		assert!(!fragment.set_text(CommonKey::Title, ""));
		assert!(!fragment.set_text(CommonKey::Title, " \0"));
		assert!(!fragment.set_text(CommonKey::Bpm, "fast"));
		assert!(!fragment.set(CommonKey::Title, CommonValue::Integer(5)));
		assert!(fragment.is_empty());
	}

	#[test_log::test]
	fn numeric_conversions() {
		let mut fragment = TagFragment::new();
		fragment.set_text(CommonKey::Year, "2004-05-03");
		fragment.set_text(CommonKey::ReplayGainTrackGain, "-6.54 dB");
		fragment.set_text(CommonKey::Compilation, "1");

		assert_eq!(fragment.get(CommonKey::Year), Some(&CommonValue::Integer(2004)));
		assert_eq!(
			fragment.get(CommonKey::ReplayGainTrackGain),
			Some(&CommonValue::Float(-6.54))
		);
		assert_eq!(fragment.get(CommonKey::Compilation), Some(&CommonValue::Flag(true)));
	}

	#[test_log::test]
	fn merge_absent_never_overwrites() {
		let mut high = TagFragment::new();
		high.set_text(CommonKey::Title, "High");
		high.set_text(CommonKey::Genre, "Rock");

		let mut low = TagFragment::new();
		low.set_text(CommonKey::Title, "Low");
		low.set_text(CommonKey::Genre, "Jazz");
		low.set_text(CommonKey::Album, "Low album");
		low.set_text(CommonKey::Track, "1/2");

		high.merge_absent(low);

		assert_eq!(high.get(CommonKey::Title).and_then(CommonValue::text), Some("High"));
		assert_eq!(
			high.get(CommonKey::Genre).and_then(CommonValue::texts),
			Some(&[String::from("Rock")][..])
		);
		assert_eq!(high.get(CommonKey::Album).and_then(CommonValue::text), Some("Low album"));
		assert_eq!(
			high.get(CommonKey::Track),
			Some(&CommonValue::Position(Position::new(Some(1), Some(2))))
		);
	}

	#[test_log::test]
	fn artist_from_artists() {
		let mut fragment = TagFragment::new();
		for artist in ["A", "B", "C"] {
			fragment.set_text(CommonKey::Artists, artist);
		}

		let common = fragment.into_common();
		assert_eq!(common.artist(), Some("A, B & C"));
		assert_eq!(common.artists(), ["A", "B", "C"]);
	}

	#[test_log::test]
	fn explicit_artist_wins() {
		let mut fragment = TagFragment::new();
		fragment.set_text(CommonKey::Artist, "A feat. B");
		fragment.set_text(CommonKey::Artists, "A");
		fragment.set_text(CommonKey::Artists, "B");

		let common = fragment.into_common();
		assert_eq!(common.artist(), Some("A feat. B"));
		assert_eq!(common.artists(), ["A", "B"]);
	}

	#[test_log::test]
	fn artists_from_multi_valued_artist() {
		let mut fragment = TagFragment::new();
		fragment.set_text(CommonKey::Artist, "A");
		fragment.set_text(CommonKey::Artist, "B");

		let common = fragment.into_common();
		assert_eq!(common.artist(), Some("A"));
		assert_eq!(common.artists(), ["A", "B"]);

		let mut fragment = TagFragment::new();
		fragment.set_text(CommonKey::Artist, "Solo");

		let common = fragment.into_common();
		assert_eq!(common.artist(), Some("Solo"));
		assert_eq!(common.artists(), ["Solo"]);
	}

	#[test_log::test]
	fn no_artist_at_all() {
		let common = TagFragment::new().into_common();
		assert_eq!(common.artist(), None);
		assert!(common.artists().is_empty());
	}
}
