use crate::error::Result;
use crate::macros::{err, try_vec};

use std::io::{Read, Seek, SeekFrom};
use std::marker::PhantomData;

use byteorder::{ByteOrder, ReadBytesExt};

const CHUNK_HEADER_SIZE: u64 = 8;

/// Walks the chunks of an IFF container
///
/// `B` is the byte order of the chunk sizes, little endian for RIFF and big endian for AIFF.
pub(crate) struct Chunks<B>
where
	B: ByteOrder,
{
	pub fourcc: [u8; 4],
	pub size: u32,
	remaining_size: u64,
	_phantom: PhantomData<B>,
}

impl<B: ByteOrder> Chunks<B> {
	#[must_use]
	pub const fn new(file_size: u64) -> Self {
		Self {
			fourcc: [0; 4],
			size: 0,
			remaining_size: file_size,
			_phantom: PhantomData,
		}
	}

	pub fn next<R>(&mut self, data: &mut R) -> Result<bool>
	where
		R: Read + ?Sized,
	{
		if self.remaining_size < CHUNK_HEADER_SIZE {
			return Ok(false);
		}

		data.read_exact(&mut self.fourcc)?;
		self.size = data.read_u32::<B>()?;

		self.remaining_size = self.remaining_size.saturating_sub(CHUNK_HEADER_SIZE);

		Ok(true)
	}

	/// Read the whole chunk, including its padding byte
	pub fn content<R>(&mut self, data: &mut R) -> Result<Vec<u8>>
	where
		R: Read + Seek + ?Sized,
	{
		let size = u64::from(self.size);
		if size > self.remaining_size {
			err!(SizeMismatch);
		}

		let mut content = try_vec![0; size as usize];
		data.read_exact(&mut content)?;

		self.remaining_size = self.remaining_size.saturating_sub(size);
		self.correct_position(data)?;

		Ok(content)
	}

	pub fn skip<R>(&mut self, data: &mut R) -> Result<()>
	where
		R: Read + Seek + ?Sized,
	{
		data.seek(SeekFrom::Current(i64::from(self.size)))?;
		self.remaining_size = self.remaining_size.saturating_sub(u64::from(self.size));
		self.correct_position(data)?;

		Ok(())
	}

	/// Account for `len` bytes of the current chunk read by the caller
	pub fn consume(&mut self, len: u64) {
		self.remaining_size = self.remaining_size.saturating_sub(len);
	}

	fn correct_position<R>(&mut self, data: &mut R) -> Result<()>
	where
		R: Read + Seek + ?Sized,
	{
		// Chunks are expected to start on even boundaries, and are padded
		// with a 0 if necessary. This is NOT the null terminator of the value,
		// and it is NOT included in the chunk's size
		if self.size % 2 != 0 {
			data.seek(SeekFrom::Current(1))?;
			self.remaining_size = self.remaining_size.saturating_sub(1);
		}

		Ok(())
	}
}
