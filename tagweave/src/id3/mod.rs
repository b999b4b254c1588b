//! ID3v1 and ID3v2 readers
//!
//! ID3 tags show up in several containers (MPEG, FLAC, RIFF), so locating them is shared here.
//! The readers only produce native tags, mapping them is left to [`TagMapper`](crate::mapping::TagMapper).

pub(crate) mod v1;
pub(crate) mod v2;

use crate::error::{ErrorKind, MetadataError, Result};
use crate::macros::try_vec;
use v1::constants::ID3V1_TAG_MARKER;
use v2::Id3v2Header;

use std::io::{Read, Seek, SeekFrom};
use std::ops::Neg;

pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Skip a Lyrics3v2 tag ending at the current position
///
/// On return, the reader is positioned at the start of the Lyrics3v2 tag, or where it started if
/// none was found.
pub(crate) fn find_lyrics3v2<R>(data: &mut R) -> Result<ID3FindResults<(), u32>>
where
	R: Read + Seek + ?Sized,
{
	log::debug!("ID3: Searching for a Lyrics3v2 tag");

	let mut header = None;
	let mut size = 0_u32;

	if data.seek(SeekFrom::Current(-15)).is_err() {
		return Ok(ID3FindResults(header, size));
	}

	let mut lyrics3v2 = [0; 15];
	data.read_exact(&mut lyrics3v2)?;

	if &lyrics3v2[6..] == b"LYRICS200" {
		log::warn!("ID3: Encountered a Lyrics3v2 tag, skipping");

		header = Some(());

		let lyrics_size = std::str::from_utf8(&lyrics3v2[..6])
			.ok()
			.and_then(|size| size.parse::<u32>().ok())
			.ok_or_else(|| {
				MetadataError::new(ErrorKind::TextDecode(
					"Lyrics3v2 tag has an invalid size string",
				))
			})?;

		size += lyrics_size;

		data.seek(SeekFrom::Current(i64::from(lyrics_size + 15).neg()))?;
	} else {
		data.seek(SeekFrom::Current(-15))?;
	}

	Ok(ID3FindResults(header, size))
}

/// Look for an ID3v1 tag in the last 128 bytes of the stream
///
/// On return, the reader is positioned at the start of the ID3v1 tag, or at the end of the stream
/// if none was found.
pub(crate) fn find_id3v1<R>(data: &mut R) -> Result<ID3FindResults<(), Option<[u8; 128]>>>
where
	R: Read + Seek + ?Sized,
{
	log::debug!("ID3: Searching for an ID3v1 tag");

	// Reader is too small to contain an ID3v1 tag
	if data.seek(SeekFrom::End(-128)).is_err() {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(None, None));
	}

	let mut id3v1_tag = [0; 128];
	data.read_exact(&mut id3v1_tag)?;

	if id3v1_tag[..3] != ID3V1_TAG_MARKER {
		return Ok(ID3FindResults(None, None));
	}

	log::debug!("ID3: Found an ID3v1 tag");

	data.seek(SeekFrom::End(-128))?;
	Ok(ID3FindResults(Some(()), Some(id3v1_tag)))
}

/// Look for an ID3v2 tag at the current position
///
/// If `read` is set, the tag body is returned. Otherwise it is skipped. Either way, the reader ends
/// up after the tag, or where it started if no tag was found.
pub(crate) fn find_id3v2<R>(
	data: &mut R,
	read: bool,
) -> Result<ID3FindResults<Id3v2Header, Option<Vec<u8>>>>
where
	R: Read + Seek + ?Sized,
{
	log::debug!(
		"ID3: Searching for an ID3v2 tag at offset: {}",
		data.stream_position()?
	);

	let start = data.stream_position()?;

	let Ok(header) = Id3v2Header::parse(data) else {
		data.seek(SeekFrom::Start(start))?;
		return Ok(ID3FindResults(None, None));
	};

	log::debug!("ID3: Found an ID3v2 tag, version: {:?}", header.version);

	let mut id3v2 = None;
	if read {
		let mut tag = try_vec![0; header.size as usize];
		data.read_exact(&mut tag)?;

		id3v2 = Some(tag);
	} else {
		data.seek(SeekFrom::Current(i64::from(header.size)))?;
	}

	if header.footer {
		data.seek(SeekFrom::Current(10))?;
	}

	Ok(ID3FindResults(Some(header), id3v2))
}
