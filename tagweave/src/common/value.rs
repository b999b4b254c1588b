use crate::picture::Picture;

/// A `{no, of}` pair, used for track and disk numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
	/// The number
	pub no: Option<u32>,
	/// The total
	pub of: Option<u32>,
}

impl Position {
	/// Create a new `Position`
	pub const fn new(no: Option<u32>, of: Option<u32>) -> Self {
		Self { no, of }
	}

	/// Parse an `n`, `n/m`, or `/m` string
	///
	/// Unparsable halves are `None`.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::common::Position;
	///
	/// assert_eq!(Position::parse("3/12"), Position::new(Some(3), Some(12)));
	/// assert_eq!(Position::parse(" 7 "), Position::new(Some(7), None));
	/// assert_eq!(Position::parse("x/12"), Position::new(None, Some(12)));
	/// ```
	pub fn parse(value: &str) -> Self {
		let mut split = value.splitn(2, '/');
		let no = split.next().and_then(parse_u32);
		let of = split.next().and_then(parse_u32);

		Self { no, of }
	}

	/// Whether neither half is known
	pub fn is_empty(&self) -> bool {
		self.no.is_none() && self.of.is_none()
	}

	/// Fill in whichever halves are unknown from `other`
	pub(crate) fn fill(&mut self, other: Position) {
		if self.no.is_none() {
			self.no = other.no;
		}

		if self.of.is_none() {
			self.of = other.of;
		}
	}
}

fn parse_u32(value: &str) -> Option<u32> {
	// `0` is written by some taggers for unknown
	value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// A rating normalized to [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
	/// Who made the rating, such as the email of an ID3v2 popularimeter
	pub source: Option<String>,
	/// The rating, from 0 (worst) to 1 (best)
	pub rating: f64,
}

impl Rating {
	/// Create a new `Rating`, clamping `rating` to [0, 1]
	pub fn new(source: Option<String>, rating: f64) -> Self {
		Self {
			source,
			rating: rating.clamp(0.0, 1.0),
		}
	}
}

/// The value of a canonical field
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CommonValue {
	/// A [`FieldKind::Text`](super::FieldKind::Text) value
	Text(String),
	/// A [`FieldKind::Integer`](super::FieldKind::Integer) value
	Integer(i64),
	/// A [`FieldKind::Float`](super::FieldKind::Float) value
	Float(f64),
	/// A [`FieldKind::Flag`](super::FieldKind::Flag) value
	Flag(bool),
	/// A [`FieldKind::Texts`](super::FieldKind::Texts) value
	Texts(Vec<String>),
	/// A [`FieldKind::Position`](super::FieldKind::Position) value
	Position(Position),
	/// A [`FieldKind::Pictures`](super::FieldKind::Pictures) value
	Pictures(Vec<Picture>),
	/// A [`FieldKind::Ratings`](super::FieldKind::Ratings) value
	Ratings(Vec<Rating>),
}

impl CommonValue {
	/// Whether the value carries nothing
	///
	/// Empty positions and lists never count as "set" during merging.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Text(text) => text.is_empty(),
			Self::Texts(texts) => texts.is_empty(),
			Self::Position(position) => position.is_empty(),
			Self::Pictures(pictures) => pictures.is_empty(),
			Self::Ratings(ratings) => ratings.is_empty(),
			Self::Integer(_) | Self::Float(_) | Self::Flag(_) => false,
		}
	}

	/// Returns the text, if this is a [`CommonValue::Text`]
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the texts, if this is a [`CommonValue::Texts`]
	pub fn texts(&self) -> Option<&[String]> {
		match self {
			Self::Texts(texts) => Some(texts),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Position, Rating};

	#[test_log::test]
	fn position_parse() {
		assert_eq!(Position::parse("1"), Position::new(Some(1), None));
		assert_eq!(Position::parse("01/09"), Position::new(Some(1), Some(9)));
		assert_eq!(Position::parse("/9"), Position::new(None, Some(9)));
		assert_eq!(Position::parse("0/0"), Position::default());
		assert!(Position::parse("").is_empty());
	}

	#[test_log::test]
	fn position_fill() {
		let mut position = Position::new(Some(2), None);
		position.fill(Position::new(Some(5), Some(10)));
		assert_eq!(position, Position::new(Some(2), Some(10)));
	}

	#[test_log::test]
	fn rating_is_clamped() {
		assert_eq!(Rating::new(None, 1.5).rating, 1.0);
		assert_eq!(Rating::new(None, -0.2).rating, 0.0);
	}
}
