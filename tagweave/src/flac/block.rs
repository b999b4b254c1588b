use crate::error::Result;
use crate::macros::try_vec;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(super) const BLOCK_ID_STREAMINFO: u8 = 0;
pub(super) const BLOCK_ID_VORBIS_COMMENTS: u8 = 4;
pub(super) const BLOCK_ID_PICTURE: u8 = 6;

pub(super) struct Block {
	pub(super) ty: u8,
	pub(super) last: bool,
	pub(super) content: Vec<u8>,
}

impl Block {
	/// Read a metadata block, keeping its content only if `predicate` accepts its type
	pub(super) fn read<R, P>(data: &mut R, mut predicate: P) -> Result<Self>
	where
		R: Read + Seek + ?Sized,
		P: FnMut(u8) -> bool,
	{
		let byte = data.read_u8()?;
		let last = (byte & 0x80) != 0;
		let ty = byte & 0x7F;

		let size = data.read_u24::<BigEndian>()?;
		log::trace!("FLAC: Reading block, type: {ty}, size: {size}");

		let mut content;
		if predicate(ty) {
			content = try_vec![0; size as usize];
			data.read_exact(&mut content)?;
		} else {
			content = Vec::new();
			data.seek(SeekFrom::Current(i64::from(size)))?;
		}

		Ok(Self { ty, last, content })
	}
}
