use crate::error::Result;
use crate::properties::FormatInfo;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// Read the STREAMINFO block
pub(super) fn read_stream_info(
	mut stream_info: &[u8],
	stream_length: u64,
	format: &mut FormatInfo,
) -> Result<()> {
	// Skip 4 bytes
	// Minimum block size (2)
	// Maximum block size (2)
	stream_info.read_u32::<BigEndian>()?;

	// Skip 6 bytes
	// Minimum frame size (3)
	// Maximum frame size (3)
	stream_info.read_uint::<BigEndian>(6)?;

	// Read 4 bytes
	// Sample rate (20 bits)
	// Number of channels (3 bits)
	// Bits per sample (5 bits)
	// Total samples (first 4 bits)
	let info = stream_info.read_u32::<BigEndian>()?;

	let sample_rate = info >> 12;
	let bits_per_sample = ((info >> 4) & 0b11111) + 1;
	let channels = ((info >> 9) & 7) + 1;

	// Read the remaining 32 bits of the total samples
	let total_samples =
		(u64::from(info & 0xF) << 32) | u64::from(stream_info.read_u32::<BigEndian>()?);

	let mut signature = [0; 16];
	stream_info.read_exact(&mut signature)?;

	format.codec = Some(String::from("FLAC"));
	format.lossless = Some(true);
	format.sample_rate = Some(sample_rate).filter(|rate| *rate > 0);
	format.bits_per_sample = Some(bits_per_sample as u8);
	format.channels = Some(channels as u8);

	// An all zero signature means the encoder didn't compute one
	if signature != [0; 16] {
		format.audio_md5 = Some(signature);
	}

	if total_samples > 0 {
		format.number_of_samples = Some(total_samples);
		format.duration_from_samples();
	}

	if let Some(length) = format.duration.map(|d| d.as_millis()).filter(|l| *l > 0) {
		format.bitrate = u32::try_from(u128::from(stream_length) * 8 * 1000 / length).ok();
	}

	Ok(())
}
