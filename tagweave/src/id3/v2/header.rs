use crate::error::Result;
use crate::macros::decode_err;
use crate::tag::TagFormat;

use std::io::Read;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(crate) enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	pub(crate) fn tag_format(self) -> TagFormat {
		match self {
			Self::V2 => TagFormat::Id3v22,
			Self::V3 => TagFormat::Id3v23,
			Self::V4 => TagFormat::Id3v24,
		}
	}
}

#[derive(Copy, Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub unsynchronisation: bool,
	pub extended_header: bool,
	pub footer: bool,
	/// ID3v2.2 only. No compression scheme was ever defined, so these tags can't be read.
	pub compression: bool,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read + ?Sized,
	{
		let mut header = [0; 10];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			decode_err!(@BAIL "ID3v2: Missing the \"ID3\" identifier");
		}

		// Version is stored as [major, minor], the minor revision doesn't matter here
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			_ => decode_err!(@BAIL "ID3v2: Unsupported major version"),
		};

		let flags = header[5];
		let size_bytes = [header[6], header[7], header[8], header[9]];
		if size_bytes.iter().any(|b| b & 0x80 != 0) {
			decode_err!(@BAIL "ID3v2: Tag size is not synchsafe");
		}

		Ok(Self {
			version,
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: version != Id3v2Version::V2 && flags & 0x40 == 0x40,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
			compression: version == Id3v2Version::V2 && flags & 0x40 == 0x40,
			size: unsynch_u32(u32::from_be_bytes(size_bytes)),
		})
	}
}

/// Decode a synchsafe integer, where the high bit of every byte is unused
pub(crate) fn unsynch_u32(n: u32) -> u32 {
	(n & 0xFF) | ((n & 0xFF00) >> 1) | ((n & 0xFF_0000) >> 2) | ((n & 0xFF00_0000) >> 3)
}

/// Reverse the unsynchronisation scheme, where every `0xFF 0x00` had its `0x00` inserted
pub(crate) fn resynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut previous = 0;
	for &byte in content {
		if previous == 0xFF && byte == 0x00 {
			previous = byte;
			continue;
		}

		out.push(byte);
		previous = byte;
	}

	out
}

#[cfg(test)]
mod tests {
	use super::{Id3v2Header, Id3v2Version, resynchronise, unsynch_u32};

	#[test_log::test]
	fn synchsafe() {
		assert_eq!(unsynch_u32(0x7F), 0x7F);
		assert_eq!(unsynch_u32(0x0100), 0x80);
		assert_eq!(unsynch_u32(0x7F7F_7F7F), 0x0FFF_FFFF);
	}

	#[test_log::test]
	fn resynchronised() {
		assert_eq!(resynchronise(&[0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15]), [0xFF, 0x1A, 0xFF, 0x15]);
		// Only the first null after 0xFF is an insertion
		assert_eq!(resynchronise(&[0xFF, 0x00, 0x00]), [0xFF, 0x00]);
	}

	#[test_log::test]
	fn header() {
		let header = Id3v2Header::parse(&mut &b"ID3\x03\x00\xC0\x00\x00\x01\x00"[..]).unwrap();
		assert_eq!(header.version, Id3v2Version::V3);
		assert!(header.unsynchronisation);
		assert!(header.extended_header);
		assert!(!header.footer);
		assert_eq!(header.size, 128);

		let header = Id3v2Header::parse(&mut &b"ID3\x02\x00\x40\x00\x00\x00\x10"[..]).unwrap();
		assert!(header.compression);
		assert!(!header.extended_header);

		assert!(Id3v2Header::parse(&mut &b"ID3\x05\x00\x00\x00\x00\x00\x00"[..]).is_err());
		assert!(Id3v2Header::parse(&mut &b"ID3\x04\x00\x00\x00\x00\x00\x80"[..]).is_err());
	}
}
