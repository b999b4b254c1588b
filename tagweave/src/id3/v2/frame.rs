//! Frame headers and frame content
//!
//! Every frame is turned into zero or more [`NativeTag`]s. The identifier is the frame ID, with
//! the description appended for frames that carry one (`TXXX:<description>`, `COMM:<description>`,
//! `UFID:<owner>`, `TIPL:<role>`), so that mappers can match on a single string.

use super::header::{Id3v2Version, unsynch_u32};
use crate::error::Result;
use crate::macros::{decode_err, err};
use crate::picture::{MimeType, Picture, PictureType};
use crate::tag::{NativeTag, NativeValue, Popularimeter};
use crate::util::text::{TextEncoding, decode_terminated, decode_text, latin1_decode};

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub(super) struct FrameFlags {
	pub grouping_identity: bool,
	pub compression: bool,
	pub encryption: bool,
	pub unsynchronisation: bool,
	pub data_length_indicator: bool,
}

impl FrameFlags {
	fn parse_id3v23(flags: u16) -> Self {
		Self {
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			grouping_identity: flags & 0x0020 == 0x0020,
			..Self::default()
		}
	}

	fn parse_id3v24(flags: u16) -> Self {
		Self {
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FrameHeader {
	pub id: String,
	pub size: u32,
	pub flags: FrameFlags,
}

impl FrameHeader {
	/// Parse a frame header from the front of `content`
	///
	/// Returns `None` once padding (or anything too short to be a frame) is reached.
	pub(super) fn parse(content: &[u8], version: Id3v2Version) -> Option<(Self, usize)> {
		let header_len = if version == Id3v2Version::V2 { 6 } else { 10 };
		let header = content.get(..header_len)?;

		// Assume we just started reading padding
		if header[0] == 0 {
			return None;
		}

		let id_len = if version == Id3v2Version::V2 { 3 } else { 4 };
		let id_bytes = match &header[..id_len] {
			// Some taggers write ID3v2.2 IDs in v2.3 tags, with a null fourth byte
			[id @ .., 0] if version == Id3v2Version::V3 => id,
			id => id,
		};

		if !id_bytes
			.iter()
			.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
		{
			log::warn!("ID3v2: Encountered an invalid frame ID, stopping");
			return None;
		}

		let id = latin1_decode(id_bytes);

		let (size, flags) = match version {
			Id3v2Version::V2 => (
				u32::from_be_bytes([0, header[3], header[4], header[5]]),
				FrameFlags::default(),
			),
			Id3v2Version::V3 => (
				u32::from_be_bytes([header[4], header[5], header[6], header[7]]),
				FrameFlags::parse_id3v23(u16::from_be_bytes([header[8], header[9]])),
			),
			Id3v2Version::V4 => (
				unsynch_u32(u32::from_be_bytes([header[4], header[5], header[6], header[7]])),
				FrameFlags::parse_id3v24(u16::from_be_bytes([header[8], header[9]])),
			),
		};

		Some((Self { id, size, flags }, header_len))
	}
}

/// Decode the content of a single frame
pub(super) fn decode_frame(
	id: &str,
	content: &[u8],
	version: Id3v2Version,
	skip_covers: bool,
) -> Result<Vec<NativeTag>> {
	let v2 = version == Id3v2Version::V2;

	match id {
		"TXXX" | "TXX" => decode_user_text(id, content),
		"TIPL" | "TMCL" | "IPLS" | "IPL" => decode_involved_people(id, content),
		"COMM" | "COM" | "USLT" | "ULT" => decode_language_frame(id, content),
		"APIC" | "PIC" => {
			if skip_covers {
				return Ok(Vec::new());
			}

			let picture = decode_picture(content, v2)?;
			Ok(vec![NativeTag::new(id, picture)])
		},
		"POPM" | "POP" => Ok(vec![NativeTag::new(
			id,
			NativeValue::Popularimeter(decode_popularimeter(content)?),
		)]),
		"UFID" | "UFI" => {
			let (owner, identifier) = decode_terminated(content, TextEncoding::Latin1)?;
			Ok(vec![NativeTag::new(
				format!("{id}:{owner}"),
				latin1_decode(identifier),
			)])
		},
		"WXXX" | "WXX" => {
			let (encoding, content) = split_encoding(content)?;
			let (description, url) = decode_terminated(content, encoding)?;
			Ok(vec![NativeTag::new(
				format!("{id}:{description}"),
				latin1_decode(url),
			)])
		},
		_ if id.starts_with('T') => {
			let (encoding, content) = split_encoding(content)?;
			Ok(split_values(&decode_text(content, encoding)?)
				.map(|value| NativeTag::new(id, value))
				.collect())
		},
		_ if id.starts_with('W') => Ok(vec![NativeTag::new(id, latin1_decode(content))]),
		_ => Ok(vec![NativeTag::new(id, NativeValue::Binary(content.to_vec()))]),
	}
}

fn split_encoding(content: &[u8]) -> Result<(TextEncoding, &[u8])> {
	let Some((&encoding, rest)) = content.split_first() else {
		decode_err!(@BAIL "ID3v2: Frame is empty");
	};

	let Some(encoding) = TextEncoding::from_u8(encoding) else {
		decode_err!(@BAIL "ID3v2: Found invalid encoding");
	};

	Ok((encoding, rest))
}

// ID3v2.4 separates multiple values with a null
fn split_values(text: &str) -> impl Iterator<Item = &str> {
	text.split('\0').filter(|value| !value.is_empty())
}

fn decode_user_text(id: &str, content: &[u8]) -> Result<Vec<NativeTag>> {
	let (encoding, content) = split_encoding(content)?;
	let (description, content) = decode_terminated(content, encoding)?;
	let value = decode_text(content, encoding)?;

	let id = format!("{id}:{description}");
	Ok(split_values(&value)
		.map(|value| NativeTag::new(id.clone(), value))
		.collect())
}

// Pairs of (role, name), stored as alternating values
fn decode_involved_people(id: &str, content: &[u8]) -> Result<Vec<NativeTag>> {
	let (encoding, content) = split_encoding(content)?;
	let text = decode_text(content, encoding)?;

	let id = if id == "TMCL" { "TMCL" } else { "TIPL" };

	let values = text.split('\0').collect::<Vec<_>>();
	Ok(values
		.chunks_exact(2)
		.filter(|pair| !pair[1].is_empty())
		.map(|pair| NativeTag::new(format!("{id}:{}", pair[0]), pair[1]))
		.collect())
}

// COMM and USLT: encoding, language, description, text
fn decode_language_frame(id: &str, content: &[u8]) -> Result<Vec<NativeTag>> {
	let (encoding, content) = split_encoding(content)?;
	let Some(content) = content.get(3..) else {
		decode_err!(@BAIL "ID3v2: Frame is too short to contain a language");
	};

	let (description, content) = decode_terminated(content, encoding)?;
	let text = decode_text(content, encoding)?;
	if text.is_empty() {
		return Ok(Vec::new());
	}

	let id = if description.is_empty() {
		id.to_owned()
	} else {
		format!("{id}:{description}")
	};

	Ok(vec![NativeTag::new(id, text)])
}

fn decode_picture(content: &[u8], v2: bool) -> Result<Picture> {
	let (encoding, content) = split_encoding(content)?;

	let (mime_type, content) = if v2 {
		// ID3v2.2 stores a three character image format rather than a MIME type
		let Some((format, rest)) = content.split_at_checked(3) else {
			decode_err!(@BAIL "ID3v2: PIC frame is too short");
		};

		let mime_type = match format {
			b"PNG" => Some(MimeType::Png),
			b"JPG" => Some(MimeType::Jpeg),
			b"BMP" => Some(MimeType::Bmp),
			b"GIF" => Some(MimeType::Gif),
			_ => None,
		};

		(mime_type, rest)
	} else {
		let (mime_type, rest) = decode_terminated(content, TextEncoding::Latin1)?;
		let mime_type = (!mime_type.is_empty()).then(|| MimeType::from_str(&mime_type));
		(mime_type, rest)
	};

	let Some((&pic_type, content)) = content.split_first() else {
		decode_err!(@BAIL "ID3v2: Picture frame is missing a picture type");
	};

	let (description, data) = decode_terminated(content, encoding)?;
	if data.is_empty() {
		err!(NotAPicture);
	}

	Ok(Picture::new(
		PictureType::from_u8(pic_type),
		mime_type,
		(!description.is_empty()).then_some(description),
		data.to_vec(),
	))
}

fn decode_popularimeter(content: &[u8]) -> Result<Popularimeter> {
	let (email, rest) = decode_terminated(content, TextEncoding::Latin1)?;
	let Some((&rating, counter)) = rest.split_first() else {
		decode_err!(@BAIL "ID3v2: Popularimeter is missing a rating");
	};

	// The counter may be omitted, and can grow past 4 bytes
	let counter = counter
		.iter()
		.take(8)
		.fold(0_u64, |acc, b| (acc << 8) | u64::from(*b));

	Ok(Popularimeter {
		email: (!email.is_empty()).then_some(email),
		rating,
		counter,
	})
}
