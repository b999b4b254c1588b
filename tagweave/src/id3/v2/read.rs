use super::frame::{FrameHeader, decode_frame};
use super::header::{Id3v2Header, Id3v2Version, resynchronise, unsynch_u32};
use crate::error::Result;
use crate::macros::decode_err;
use crate::tag::NativeTag;

use std::borrow::Cow;

/// Read every frame of an ID3v2 tag body
///
/// Frames that can't be decoded (compressed, encrypted, malformed) are skipped, only a
/// malformed extended header fails the whole tag.
pub(crate) fn parse_id3v2(
	tag: &[u8],
	header: Id3v2Header,
	skip_covers: bool,
) -> Result<Vec<NativeTag>> {
	log::debug!(
		"ID3v2: Parsing tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	if header.compression {
		log::warn!("ID3v2: Encountered a compressed ID3v2.2 tag, skipping");
		return Ok(Vec::new());
	}

	// ID3v2.4 unsynchronises frame by frame, with frame sizes referring to the unsynchronised data
	let mut content = if header.unsynchronisation && header.version != Id3v2Version::V4 {
		Cow::Owned(resynchronise(tag))
	} else {
		Cow::Borrowed(tag)
	};

	if header.extended_header {
		let extended_size = extended_header_size(&content, header.version)?;
		content = match content {
			Cow::Borrowed(content) => Cow::Borrowed(&content[extended_size..]),
			Cow::Owned(mut content) => {
				content.drain(..extended_size);
				Cow::Owned(content)
			},
		};
	}

	let mut tags = Vec::new();
	let mut remaining = &content[..];

	while let Some((frame, header_len)) = FrameHeader::parse(remaining, header.version) {
		let end = header_len + frame.size as usize;
		let Some(frame_content) = remaining.get(header_len..end) else {
			log::warn!("ID3v2: Frame \"{}\" extends past the end of the tag, stopping", frame.id);
			break;
		};

		remaining = &remaining[end..];

		if frame.size == 0 {
			log::debug!("ID3v2: Skipping empty frame \"{}\"", frame.id);
			continue;
		}

		let Some(frame_content) = frame_body(&frame, frame_content, header) else {
			continue;
		};

		match decode_frame(&frame.id, &frame_content, header.version, skip_covers) {
			Ok(frame_tags) => tags.extend(frame_tags),
			Err(e) => log::warn!("ID3v2: Failed to read frame \"{}\": {e}", frame.id),
		}
	}

	Ok(tags)
}

fn extended_header_size(content: &[u8], version: Id3v2Version) -> Result<usize> {
	let Some(size) = content.get(..4) else {
		decode_err!(@BAIL "ID3v2: Extended header is too short");
	};

	let size = u32::from_be_bytes([size[0], size[1], size[2], size[3]]);
	let size = match version {
		// The ID3v2.3 size excludes itself
		Id3v2Version::V3 => size as usize + 4,
		_ => unsynch_u32(size) as usize,
	};

	if size < 6 || size > content.len() {
		decode_err!(@BAIL "ID3v2: Found an invalid extended header size");
	}

	Ok(size)
}

// Strip the extra data the frame flags add before the frame content
fn frame_body<'a>(frame: &FrameHeader, content: &'a [u8], header: Id3v2Header) -> Option<Cow<'a, [u8]>> {
	let flags = frame.flags;

	if flags.compression || flags.encryption {
		log::warn!(
			"ID3v2: Skipping frame \"{}\", compressed and encrypted frames are not supported",
			frame.id
		);
		return None;
	}

	let mut skip = 0;
	if flags.grouping_identity {
		skip += 1;
	}

	if flags.data_length_indicator {
		skip += 4;
	}

	let content = content.get(skip..)?;

	if header.version == Id3v2Version::V4 && (flags.unsynchronisation || header.unsynchronisation) {
		return Some(Cow::Owned(resynchronise(content)));
	}

	Some(Cow::Borrowed(content))
}
