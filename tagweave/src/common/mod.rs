//! The common, format-agnostic schema
//!
//! All native tags are normalized into [`CommonKey`] fields. Mappers write into a
//! [`TagFragment`], which is frozen into a [`CommonTags`] once normalization is done.

mod fragment;
mod key;
mod record;
mod value;

pub use fragment::TagFragment;
pub use key::{CommonKey, FieldKind};
pub use record::CommonTags;
pub use value::{CommonValue, Position, Rating};

/// Join artist names into a single display string
///
/// All but the last are joined by `", "`, the last one by `" & "`.
///
/// # Examples
///
/// ```rust
/// use tagweave::common::join_artists;
///
/// assert_eq!(join_artists(&["A"]), "A");
/// assert_eq!(join_artists(&["A", "B"]), "A & B");
/// assert_eq!(join_artists(&["A", "B", "C"]), "A, B & C");
/// ```
pub fn join_artists<S: AsRef<str>>(artists: &[S]) -> String {
	match artists {
		[] => String::new(),
		[only] => only.as_ref().to_owned(),
		[rest @ .., last] => {
			let rest = rest.iter().map(AsRef::as_ref).collect::<Vec<&str>>();
			format!("{} & {}", rest.join(", "), last.as_ref())
		},
	}
}

/// Convert a normalized rating to a number of stars
///
/// A known rating maps to 1-5 stars, while no rating at all is 0 stars.
///
/// # Examples
///
/// ```rust
/// use tagweave::common::rating_to_stars;
///
/// assert_eq!(rating_to_stars(None), 0);
/// assert_eq!(rating_to_stars(Some(0.0)), 1);
/// assert_eq!(rating_to_stars(Some(0.5)), 3);
/// assert_eq!(rating_to_stars(Some(1.0)), 5);
/// ```
pub fn rating_to_stars(rating: Option<f64>) -> u8 {
	let Some(rating) = rating else {
		return 0;
	};

	let rating = if rating.is_nan() { 0.0 } else { rating.clamp(0.0, 1.0) };

	// Always in 0..=4
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	let steps = (rating * 4.0).round() as u8;
	steps + 1
}
