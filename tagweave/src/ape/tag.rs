use super::header::{APE_FOOTER_SIZE, APE_PREAMBLE, ApeHeader, read_ape_header};
use crate::error::Result;
use crate::macros::{decode_err, try_vec};
use crate::tag::{NativeTag, NativeValue};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

/// Look for an APE tag ending at the current position
///
/// On return, the reader is positioned at the start of the tag (header included), or where it
/// started if no tag was found.
pub(crate) fn find_ape_tag_before<R>(
	reader: &mut R,
	skip_covers: bool,
) -> Result<Option<Vec<NativeTag>>>
where
	R: Read + Seek + ?Sized,
{
	let end = reader.stream_position()?;
	if end < u64::from(APE_FOOTER_SIZE) {
		return Ok(None);
	}

	reader.seek(SeekFrom::Current(-i64::from(APE_FOOTER_SIZE)))?;

	let mut preamble = [0; 8];
	reader.read_exact(&mut preamble)?;

	if &preamble != APE_PREAMBLE {
		reader.seek(SeekFrom::Start(end))?;
		return Ok(None);
	}

	log::debug!("APE: Found a tag footer at offset {}", end - u64::from(APE_FOOTER_SIZE));

	let header = read_ape_header(reader, true)?;
	let Some(tag_start) = end.checked_sub(header.full_size()) else {
		decode_err!(@BAIL Apev2, "APE tag is larger than the stream");
	};

	let items_start = end - u64::from(header.size);
	reader.seek(SeekFrom::Start(items_start))?;

	let mut items = try_vec![0; header.items_size() as usize];
	reader.read_exact(&mut items)?;

	let tags = parse_ape_items(&items, header, skip_covers)?;

	reader.seek(SeekFrom::Start(tag_start))?;
	Ok(Some(tags))
}

/// Read the items of an APE tag
///
/// Invalid keys and unknown item types are skipped, a truncated item ends the tag.
pub(crate) fn parse_ape_items(
	mut content: &[u8],
	header: ApeHeader,
	skip_covers: bool,
) -> Result<Vec<NativeTag>> {
	let mut tags = Vec::new();

	for _ in 0..header.item_count {
		if content.len() < 11 {
			break;
		}

		let value_size = content.read_u32::<LittleEndian>()? as usize;
		let flags = content.read_u32::<LittleEndian>()?;

		let Some(key_end) = content.iter().position(|b| *b == 0) else {
			decode_err!(@BAIL Apev2, "APE tag item key is missing its terminator");
		};

		let (key, rest) = content.split_at(key_end);
		let rest = &rest[1..];

		let Some((value, rest)) = rest.split_at_checked(value_size) else {
			log::warn!("APE: Item value extends past the end of the tag, stopping");
			break;
		};

		content = rest;

		let Some(key) = validate_key(key) else {
			log::warn!("APE: Encountered an invalid item key, skipping");
			continue;
		};

		if value.is_empty() {
			continue;
		}

		let item_type = (flags >> 1) & 3;
		match item_type {
			// Text, and external locators, which are text as well
			0 | 2 => {
				let Ok(text) = std::str::from_utf8(value) else {
					log::warn!("APE: Item \"{key}\" is not valid UTF-8, skipping");
					continue;
				};

				// Multiple values are NUL separated
				for text in text.split('\0').filter(|t| !t.is_empty()) {
					tags.push(NativeTag::new(key.clone(), text));
				}
			},
			1 => {
				if skip_covers && key.to_ascii_lowercase().starts_with("cover art") {
					continue;
				}

				tags.push(NativeTag::new(key, NativeValue::Binary(value.to_vec())));
			},
			_ => log::warn!("APE: Item \"{key}\" has a reserved item type, skipping"),
		}
	}

	Ok(tags)
}

fn validate_key(key: &[u8]) -> Option<String> {
	if !(2..=255).contains(&key.len()) || !key.iter().all(|b| (0x20..=0x7E).contains(b)) {
		return None;
	}

	let key = String::from_utf8(key.to_vec()).ok()?;
	if INVALID_KEYS.contains(&key.to_uppercase().as_str()) {
		return None;
	}

	Some(key)
}
