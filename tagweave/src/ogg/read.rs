use super::constants::{MAX_PAGE_SIZE, OPUSHEAD, OPUSTAGS, VORBIS_COMMENT_HEAD, VORBIS_IDENT_HEAD};
use super::{opus, verify_signature, vorbis};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::io::{Tokenizer, stream_len};
use crate::macros::{decode_err, err, try_vec};
use crate::picture::{MimeType, Picture, PictureType};
use crate::properties::FormatInfo;
use crate::tag::{NativeMetadata, NativeTag, NativeTags, NativeValue, TagFormat};

use std::io::{Read, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use data_encoding::BASE64;
use ogg_pager::Packets;

/// The contents of a Vorbis comment block
pub(crate) struct VorbisComments {
	pub(crate) vendor: String,
	pub(crate) tags: Vec<NativeTag>,
}

/// Read a Vorbis comment block, without any codec signature
///
/// Fields are emitted in stored order under their stored key. The deprecated `COVERART` field is
/// converted to a `METADATA_BLOCK_PICTURE` picture.
pub(crate) fn read_comments(mut data: &[u8], skip_covers: bool) -> Result<VorbisComments> {
	let mut len = data.len() as u64;

	let vendor_len = data.read_u32::<LittleEndian>()?;
	if u64::from(vendor_len) > len {
		err!(SizeMismatch);
	}

	let mut vendor_bytes = try_vec![0; vendor_len as usize];
	data.read_exact(&mut vendor_bytes)?;

	len -= u64::from(vendor_len);

	let vendor = String::from_utf8(vendor_bytes).unwrap_or_else(|e| {
		log::warn!("OGG: Vendor string is not valid UTF-8, recovering what is possible");
		String::from_utf8_lossy(e.as_bytes()).into_owned()
	});

	let number_of_items = data.read_u32::<LittleEndian>()?;
	if u64::from(number_of_items) > (len >> 2) {
		err!(SizeMismatch);
	}

	let mut tags = Vec::with_capacity(number_of_items as usize);

	for _ in 0..number_of_items {
		let comment_len = data.read_u32::<LittleEndian>()?;
		if u64::from(comment_len) > len {
			err!(SizeMismatch);
		}

		let mut comment_bytes = try_vec![0; comment_len as usize];
		data.read_exact(&mut comment_bytes)?;

		len -= u64::from(comment_len);

		// KEY=VALUE
		let Some(separator) = comment_bytes.iter().position(|b| *b == b'=') else {
			log::warn!("OGG: No separator found in field, discarding");
			continue;
		};

		let (key, value) = (&comment_bytes[..separator], &comment_bytes[separator + 1..]);

		if !valid_vorbis_comments_key(key) {
			log::warn!("OGG: Vorbis comments contain an invalid key, discarding");
			continue;
		}

		// Valid keys are ASCII
		let key = String::from_utf8_lossy(key).into_owned();

		if key.eq_ignore_ascii_case("METADATA_BLOCK_PICTURE") && skip_covers {
			continue;
		}

		if key.eq_ignore_ascii_case("COVERART") {
			if skip_covers {
				continue;
			}

			// `COVERART` is an old deprecated image storage format, holding just the image
			//
			// <https://wiki.xiph.org/VorbisComment#Conversion_to_METADATA_BLOCK_PICTURE>
			log::warn!("OGG: Found deprecated `COVERART` field, converting to `METADATA_BLOCK_PICTURE`");

			let Ok(picture_data) = BASE64.decode(value) else {
				log::warn!("OGG: Failed to decode `COVERART`, discarding field");
				continue;
			};

			let picture = Picture::new(
				PictureType::Other,
				MimeType::from_magic(&picture_data),
				None,
				picture_data,
			);

			tags.push(NativeTag::new("METADATA_BLOCK_PICTURE", picture));
			continue;
		}

		match std::str::from_utf8(value) {
			Ok(value) => tags.push(NativeTag::new(key, NativeValue::Text(value.to_owned()))),
			Err(_) => log::warn!("OGG: Non UTF-8 value found, discarding field {key:?}"),
		}
	}

	Ok(VorbisComments { vendor, tags })
}

fn valid_vorbis_comments_key(key: &[u8]) -> bool {
	// The valid range is 0x20..=0x7D not including 0x3D
	!key.is_empty() && key.iter().all(|c| (b' '..=b'}').contains(c) && *c != b'=')
}

/// Read an Ogg Vorbis or Ogg Opus stream
pub(crate) fn read_from(mut reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
	reader.rewind()?;

	// Read the header packets
	let packets = Packets::read_count(&mut reader, 2)?;

	let Some(identification_packet) = packets.get(0) else {
		decode_err!(@BAIL Ogg, "Expected identification packet");
	};

	let Some(comment_packet) = packets.get(1) else {
		decode_err!(@BAIL Ogg, "Expected comment packet");
	};

	let header_size = (identification_packet.len() + comment_packet.len()) as u64;

	let mut format = FormatInfo::with_container("Ogg");
	format.lossless = Some(false);

	let comment_sig = if identification_packet.starts_with(VORBIS_IDENT_HEAD) {
		vorbis::read_identification(identification_packet, &mut format)?;
		VORBIS_COMMENT_HEAD
	} else if identification_packet.starts_with(OPUSHEAD) {
		opus::read_identification(identification_packet, &mut format)?;
		OPUSTAGS
	} else {
		decode_err!(@BAIL Ogg, "Unsupported codec, expected Vorbis or Opus");
	};

	verify_signature(comment_packet, comment_sig)?;

	let comments = read_comments(&comment_packet[comment_sig.len()..], options.skip_covers)?;
	format.encoder = Some(comments.vendor).filter(|vendor| !vendor.is_empty());

	let mut native = NativeTags::new();
	native.extend(TagFormat::Vorbis, comments.tags);

	match last_granule_position(reader)? {
		Some(granule_position) => {
			let file_length = stream_len(reader)?;

			if identification_packet.starts_with(OPUSHEAD) {
				let stream_len = file_length.saturating_sub(header_size);
				opus::set_duration(&mut format, identification_packet, granule_position, stream_len);
			} else {
				vorbis::set_duration(&mut format, granule_position);
			}
		},
		None => log::warn!("OGG: Unable to find the last page, no duration will be read"),
	}

	Ok(NativeMetadata { format, native })
}

// Scan backwards from the end of the stream for the last page with a known granule position
fn last_granule_position(reader: &mut dyn Tokenizer) -> Result<Option<u64>> {
	let end = reader.seek(SeekFrom::End(0))?;
	let start = end.saturating_sub(MAX_PAGE_SIZE);

	reader.seek(SeekFrom::Start(start))?;

	let mut tail = try_vec![0; (end - start) as usize];
	reader.read_exact(&mut tail)?;

	let mut search_end = tail.len();
	while let Some(pos) = tail[..search_end].windows(4).rposition(|w| w == b"OggS") {
		search_end = pos;

		// Version (1), header type (1), granule position (8)
		let Some(header) = tail.get(pos + 4..pos + 14) else {
			continue;
		};

		if header[0] != 0 {
			continue;
		}

		let granule_position = (&header[2..]).read_u64::<LittleEndian>()?;

		// -1 marks a page with no packet ending on it
		if granule_position == u64::MAX {
			continue;
		}

		return Ok(Some(granule_position));
	}

	Ok(None)
}
