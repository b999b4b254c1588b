use super::constants::{GENRES, ID3V1_TAG_MARKER};
use crate::tag::NativeTag;
use crate::util::text::latin1_decode;

/// Read the fields of an ID3v1 tag
///
/// Field identifiers are `title`, `artist`, `album`, `year`, `comment`, `track` and `genre`.
/// Empty fields are left out, so a blank tag produces no tags at all.
pub(crate) fn parse_id3v1(reader: [u8; 128]) -> Vec<NativeTag> {
	let mut tags = Vec::new();

	if reader[..3] != ID3V1_TAG_MARKER {
		return tags;
	}

	let reader = &reader[3..];

	let mut push = |id: &str, value: Option<String>| {
		if let Some(value) = value {
			tags.push(NativeTag::new(id, value));
		}
	};

	push("title", decode_text(&reader[..30]));
	push("artist", decode_text(&reader[30..60]));
	push("album", decode_text(&reader[60..90]));
	push("year", decode_year(&reader[90..94]));

	// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
	// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
	let range = if reader[122] == 0 && reader[123] != 0 {
		94_usize..122
	} else {
		94..124
	};

	push("comment", decode_text(&reader[range.clone()]));

	if range.end == 122 {
		push("track", Some(reader[123].to_string()));
	}

	push(
		"genre",
		GENRES
			.get(usize::from(reader[124]))
			.map(|genre| (*genre).to_owned()),
	);

	tags
}

fn decode_text(data: &[u8]) -> Option<String> {
	let mut first_null_pos = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return None;
		}

		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1: Text field contains trailing junk, skipping");
		}

		first_null_pos = null_pos;
	}

	let text = latin1_decode(&data[..first_null_pos]);
	let trimmed = text.trim_end();
	if trimmed.is_empty() {
		return None;
	}

	Some(trimmed.to_owned())
}

// Most writers use "\0\0\0\0" for an empty year rather than "0000"
fn decode_year(input: &[u8]) -> Option<String> {
	if !input.iter().all(u8::is_ascii_digit) {
		return None;
	}

	Some(latin1_decode(input))
}
