use crate::error::Result;
use crate::macros::decode_err;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

/// Size of both the header and the footer, including the preamble
pub(crate) const APE_FOOTER_SIZE: u32 = 32;

const FLAG_HAS_HEADER: u32 = 1 << 31;
const FLAG_IS_HEADER: u32 = 1 << 29;

// Smallest possible item: value size (4), flags (4), a 2 byte key, its terminator, and 1 byte of value
const MIN_ITEM_SIZE: u32 = 11;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApeHeader {
	/// Items + footer, excluding the header
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	pub(crate) has_header: bool,
}

impl ApeHeader {
	/// The size of the items alone
	pub(crate) fn items_size(&self) -> u32 {
		self.size - APE_FOOTER_SIZE
	}

	/// The size of the whole tag, header included
	pub(crate) fn full_size(&self) -> u64 {
		let header = if self.has_header { APE_FOOTER_SIZE } else { 0 };
		u64::from(self.size) + u64::from(header)
	}
}

/// Read the 24 bytes following an `APETAGEX` preamble
pub(crate) fn read_ape_header<R>(data: &mut R, footer: bool) -> Result<ApeHeader>
where
	R: Read + ?Sized,
{
	let version = data.read_u32::<LittleEndian>()?;
	let size = data.read_u32::<LittleEndian>()?;

	if size < APE_FOOTER_SIZE {
		decode_err!(@BAIL Apev2, "APE tag has an invalid size (< 32)");
	}

	let item_count = data.read_u32::<LittleEndian>()?;

	if item_count > (size - APE_FOOTER_SIZE) / MIN_ITEM_SIZE {
		decode_err!(@BAIL Apev2, "APE tag has an invalid item count");
	}

	let flags = data.read_u32::<LittleEndian>()?;

	// Reserved
	let mut _reserved = [0; 8];
	data.read_exact(&mut _reserved)?;

	if footer && flags & FLAG_IS_HEADER == FLAG_IS_HEADER {
		log::warn!("APE: Expected a footer, found a header");
	}

	// APEv1 has no header at all, the flags are reserved
	let has_header = version >= 2000 && flags & FLAG_HAS_HEADER == FLAG_HAS_HEADER;

	Ok(ApeHeader {
		size,
		item_count,
		has_header,
	})
}
