//! Conventions shared between mappers

use crate::common::{CommonKey, CommonValue, FieldKind, Position, Rating, TagFragment};
use crate::id3::v1::GENRES;
use crate::picture::{MimeType, Picture, PictureType};
use crate::tag::NativeValue;
use crate::util::text::{TextEncoding, decode_terminated};

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

/// Write a native value into a fragment, converting it to the field's [`FieldKind`]
pub(super) fn set_value(fragment: &mut TagFragment, key: CommonKey, value: &NativeValue) {
	match value {
		NativeValue::Text(text) => set_text(fragment, key, text),
		NativeValue::Integer(integer) => match key.kind() {
			FieldKind::Integer => {
				fragment.set(key, CommonValue::Integer(*integer));
			},
			FieldKind::Float => {
				#[allow(clippy::cast_precision_loss)]
				fragment.set(key, CommonValue::Float(*integer as f64));
			},
			FieldKind::Flag => {
				fragment.set(key, CommonValue::Flag(*integer != 0));
			},
			_ => set_text(fragment, key, &integer.to_string()),
		},
		NativeValue::Float(float) => match key.kind() {
			FieldKind::Float => {
				fragment.set(key, CommonValue::Float(*float));
			},
			_ => set_text(fragment, key, &float.to_string()),
		},
		NativeValue::Bool(flag) => match key.kind() {
			FieldKind::Flag => {
				fragment.set(key, CommonValue::Flag(*flag));
			},
			_ => set_text(fragment, key, if *flag { "1" } else { "0" }),
		},
		NativeValue::Picture(picture) => {
			if key.kind() == FieldKind::Pictures {
				fragment.push_picture(picture.clone());
			}
		},
		NativeValue::Binary(data) => {
			if key.kind() != FieldKind::Pictures {
				log::debug!("Mapping: Ignoring binary value for '{}'", key.name());
				return;
			}

			// Raw image data, such as an MP4 `covr` atom
			match MimeType::from_magic(data) {
				Some(mime_type) => {
					fragment.push_picture(Picture::new(
						PictureType::CoverFront,
						Some(mime_type),
						None,
						data.clone(),
					));
				},
				None => log::warn!("Mapping: Unable to determine the format of a binary picture"),
			}
		},
		NativeValue::Popularimeter(popm) => {
			if key.kind() == FieldKind::Ratings && popm.rating > 0 {
				fragment.push_rating(Rating::new(
					popm.email.clone().filter(|e| !e.is_empty()),
					f64::from(popm.rating) / 255.0,
				));
			}
		},
	}
}

/// Write a text value, applying the conventions shared by every format
///
/// * Dates also fill in the matching year field
/// * Genres are resolved against the ID3v1 genre list
pub(super) fn set_text(fragment: &mut TagFragment, key: CommonKey, text: &str) {
	match key {
		CommonKey::Genre => {
			for genre in parse_genre(text) {
				fragment.set_text(key, &genre);
			}
		},
		CommonKey::Date => {
			if fragment.set_text(key, text) {
				fragment.set_text(CommonKey::Year, text);
			}
		},
		CommonKey::OriginalDate => {
			if fragment.set_text(key, text) {
				fragment.set_text(CommonKey::OriginalYear, text);
			}
		},
		_ => {
			fragment.set_text(key, text);
		},
	}
}

/// Set the total half of a position, for fields such as Vorbis `TRACKTOTAL`
pub(super) fn set_total(fragment: &mut TagFragment, key: CommonKey, total: &str) {
	let position = Position::parse(total);
	fragment.set(key, CommonValue::Position(Position::new(None, position.no)));
}

/// Resolve a genre string
///
/// Handles plain names, ID3v1 indices (`17`), ID3v2.3 references (`(17)`, `(17)(18)`), the
/// special `RX`/`CR` references, and references followed by a refinement (`(17)Rock 'n' Roll`),
/// where the refinement wins.
pub(crate) fn parse_genre(value: &str) -> Vec<String> {
	let mut genres = Vec::new();
	let mut rest = value.trim();

	while let Some(stripped) = rest.strip_prefix('(') {
		// `((` escapes a literal parenthesis
		if stripped.starts_with('(') {
			rest = stripped;
			break;
		}

		let Some(end) = stripped.find(')') else {
			break;
		};

		if let Some(genre) = genre_reference(&stripped[..end]) {
			genres.push(genre.to_owned());
		}

		rest = &stripped[end + 1..];
	}

	let rest = rest.trim();
	if !rest.is_empty() {
		genres.clear();
		genres.push(genre_reference(rest).map_or_else(|| rest.to_owned(), str::to_owned));
	}

	genres
}

fn genre_reference(reference: &str) -> Option<&'static str> {
	match reference {
		"RX" => Some("Remix"),
		"CR" => Some("Cover"),
		_ => reference
			.parse::<usize>()
			.ok()
			.and_then(|index| GENRES.get(index))
			.copied(),
	}
}

/// Parse a text rating
///
/// Values above 1 are treated as percentages.
pub(super) fn parse_rating(value: &str, source: Option<&str>) -> Option<Rating> {
	let rating = value.trim().parse::<f64>().ok().filter(|r| r.is_finite())?;
	let rating = if rating > 1.0 { rating / 100.0 } else { rating };

	Some(Rating::new(source.map(str::to_owned), rating))
}

/// Scale a rating from `0..=max` to [0, 1]
pub(super) fn scaled_rating(value: &NativeValue, max: f64) -> Option<Rating> {
	#[allow(clippy::cast_precision_loss)]
	let raw = match value {
		NativeValue::Integer(integer) => *integer as f64,
		NativeValue::Float(float) => *float,
		NativeValue::Text(text) => text.trim().parse::<f64>().ok()?,
		_ => return None,
	};

	raw.is_finite().then(|| Rating::new(None, raw / max))
}

/// Decode an MP4 `trkn`/`disk` atom body
///
/// The body is `[0, 0, no (u16 BE), of (u16 BE), ...]`.
pub(super) fn mp4_position(data: &[u8]) -> Option<Position> {
	if data.len() < 6 {
		return None;
	}

	let no = u16::from_be_bytes([data[2], data[3]]);
	let of = u16::from_be_bytes([data[4], data[5]]);

	Some(Position::new(
		(no > 0).then_some(u32::from(no)),
		(of > 0).then_some(u32::from(of)),
	))
}

/// Resolve an MP4 `gnre` atom, which stores an ID3v1 genre index plus one
pub(super) fn mp4_genre(value: &NativeValue) -> Option<&'static str> {
	let index = match value {
		NativeValue::Integer(integer) => usize::try_from(*integer).ok()?,
		NativeValue::Binary(data) if data.len() >= 2 => usize::from(u16::from_be_bytes([data[0], data[1]])),
		NativeValue::Text(text) => text.trim().parse::<usize>().ok()?,
		_ => return None,
	};

	index.checked_sub(1).and_then(|index| GENRES.get(index)).copied()
}

/// Decode an ASF `WM/Picture` attribute
///
/// Layout: picture type (u8), data length (u32 LE), MIME type and description as null
/// terminated UTF-16 LE strings, then the picture data.
pub(super) fn asf_picture(data: &[u8]) -> Option<Picture> {
	let mut reader = Cursor::new(data);
	let pic_type = reader.read_u8().ok()?;
	let data_len = reader.read_u32::<LittleEndian>().ok()? as usize;

	let rest = data.get(5..)?;
	let (mime_type, rest) = decode_terminated(rest, TextEncoding::UTF16).ok()?;
	let (description, rest) = decode_terminated(rest, TextEncoding::UTF16).ok()?;

	let mut picture_data = vec![0; data_len.min(rest.len())];
	Cursor::new(rest).read_exact(&mut picture_data).ok()?;
	if picture_data.is_empty() {
		return None;
	}

	let mime_type = if mime_type.is_empty() {
		None
	} else {
		Some(MimeType::from_str(&mime_type))
	};

	Some(Picture::new(
		PictureType::from_u8(pic_type),
		mime_type,
		Some(description).filter(|d| !d.is_empty()),
		picture_data,
	))
}
