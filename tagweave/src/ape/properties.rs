use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::FormatInfo;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

/// Read the properties of a Monkey's Audio stream, positioned right after `MAC `
pub(super) fn read_mac_properties<R>(data: &mut R, format: &mut FormatInfo) -> Result<()>
where
	R: Read + Seek + ?Sized,
{
	let version = data
		.read_u16::<LittleEndian>()
		.map_err(|_| decode_err!(Apev2, "Unable to read the MAC version"))?;

	format.codec = Some(String::from("Monkey's Audio"));
	format.lossless = Some(true);
	format.codec_profile = Some(format!("v{}", f64::from(version) / 1000.0));

	// Property reading differs between versions
	let (total_frames, final_frame_blocks, blocks_per_frame) = if version >= 3980 {
		mac_header_gt_3980(data, format)?
	} else {
		mac_header_lt_3980(data, version, format)?
	};

	if !(1..=32).contains(&format.channels.unwrap_or(0)) {
		log::warn!("APE: Stream has an invalid channel count, ignoring the properties");
		return Ok(());
	}

	if total_frames == 0 {
		log::warn!("APE: Stream contains no frames");
		return Ok(());
	}

	let total_samples = u64::from(blocks_per_frame) * u64::from(total_frames - 1)
		+ u64::from(final_frame_blocks);

	format.number_of_samples = Some(total_samples);
	format.duration_from_samples();

	Ok(())
}

fn mac_header_gt_3980<R>(data: &mut R, format: &mut FormatInfo) -> Result<(u32, u32, u32)>
where
	R: Read + Seek + ?Sized,
{
	let mut descriptor = [0; 46];
	data.read_exact(&mut descriptor).map_err(|_| {
		decode_err!(
			Apev2,
			"Not enough data left in reader to finish file descriptor"
		)
	})?;

	// Padding (2), then the descriptor length
	let descriptor_len = (&descriptor[2..6]).read_u32::<LittleEndian>()?;

	// The descriptor should be 52 bytes long (including "MAC " and the version)
	if descriptor_len > 52 {
		data.seek(SeekFrom::Current(i64::from(descriptor_len - 52)))?;
	}

	let mut header = [0; 24];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Apev2, "Not enough data left in reader to finish MAC header"))?;

	// Compression type (2), format flags (2)
	let header_read = &mut &header[4..];

	let blocks_per_frame = header_read.read_u32::<LittleEndian>()?;
	let final_frame_blocks = header_read.read_u32::<LittleEndian>()?;
	let total_frames = header_read.read_u32::<LittleEndian>()?;

	format.bits_per_sample = Some(header_read.read_u16::<LittleEndian>()? as u8);
	format.channels = Some(header_read.read_u16::<LittleEndian>()? as u8);
	format.sample_rate = Some(header_read.read_u32::<LittleEndian>()?);

	Ok((total_frames, final_frame_blocks, blocks_per_frame))
}

fn mac_header_lt_3980<R>(data: &mut R, version: u16, format: &mut FormatInfo) -> Result<(u32, u32, u32)>
where
	R: Read + ?Sized,
{
	// Versions < 3980 don't have a descriptor
	let mut header = [0; 26];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(Apev2, "Not enough data left in reader to finish MAC header"))?;

	let header_reader = &mut &header[..];

	let compression_level = header_reader.read_u16::<LittleEndian>()?;
	let format_flags = header_reader.read_u16::<LittleEndian>()?;

	let bits_per_sample = if format_flags & 0b1 == 1 {
		8
	} else if format_flags & 0b1000 == 8 {
		24
	} else {
		16
	};
	format.bits_per_sample = Some(bits_per_sample);

	let blocks_per_frame = match version {
		_ if version >= 3950 => 73728 * 4,
		_ if version >= 3900 || (version >= 3800 && compression_level >= 4000) => 73728,
		_ => 9216,
	};

	format.channels = Some(header_reader.read_u16::<LittleEndian>()? as u8);
	format.sample_rate = Some(header_reader.read_u32::<LittleEndian>()?);

	// WAV header length (4), WAV tail length (4)
	let mut _skip = [0; 8];
	header_reader.read_exact(&mut _skip)?;

	let total_frames = header_reader.read_u32::<LittleEndian>()?;
	let final_frame_blocks = header_reader.read_u32::<LittleEndian>()?;

	Ok((total_frames, final_frame_blocks, blocks_per_frame))
}

const WV_BYTES_PER_SAMPLE_MASK: u32 = 3;
const WV_FLAG_MONO: u32 = 0x0004;
const WV_FLAG_HYBRID_COMPRESSION: u32 = 8;

const WV_SAMPLE_RATES: [u32; 16] = [
	6000, 8000, 9600, 11025, 12000, 16000, 22050, 24000, 32000, 44100, 48000, 64000, 88200, 96000,
	192_000, 0,
];

/// Read the properties of a WavPack stream from its first block header, positioned at `wvpk`
pub(super) fn read_wavpack_properties<R>(data: &mut R, format: &mut FormatInfo) -> Result<()>
where
	R: Read + ?Sized,
{
	let mut header = [0; 32];
	data.read_exact(&mut header)
		.map_err(|_| decode_err!(WavPack, "Not enough data left in reader to finish block header"))?;

	// "wvpk" (4), block size (4)
	let header_read = &mut &header[8..];

	let version = header_read.read_u16::<LittleEndian>()?;
	// Track number (1), index number (1)
	let _track_index = header_read.read_u16::<LittleEndian>()?;
	let total_samples = header_read.read_u32::<LittleEndian>()?;
	let _block_index = header_read.read_u32::<LittleEndian>()?;
	let _block_samples = header_read.read_u32::<LittleEndian>()?;
	let flags = header_read.read_u32::<LittleEndian>()?;

	format.codec = Some(String::from("WavPack"));
	format.codec_profile = Some(format!("v{version:x}"));
	format.lossless = Some(flags & WV_FLAG_HYBRID_COMPRESSION == 0);
	format.bits_per_sample = Some((((flags & WV_BYTES_PER_SAMPLE_MASK) + 1) * 8) as u8);
	format.channels = Some(if flags & WV_FLAG_MONO > 0 { 1 } else { 2 });

	let sample_rate = WV_SAMPLE_RATES[((flags >> 23) & 0xF) as usize];
	if sample_rate > 0 {
		format.sample_rate = Some(sample_rate);
	}

	// All bits set is an unknown sample count
	if total_samples != !0 {
		format.number_of_samples = Some(u64::from(total_samples));
		format.duration_from_samples();
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{read_mac_properties, read_wavpack_properties};
	use crate::properties::FormatInfo;

	use std::io::Cursor;
	use std::time::Duration;

	#[test_log::test]
	fn mac_3990() {
		let mut data = 3990_u16.to_le_bytes().to_vec();
		// Descriptor, with its length at offset 2
		let mut descriptor = [0; 46];
		descriptor[2..6].copy_from_slice(&52_u32.to_le_bytes());
		data.extend(descriptor);

		// Compression type, format flags
		data.extend([0; 4]);
		data.extend(73728_u32.to_le_bytes());
		data.extend(44100_u32.to_le_bytes());
		data.extend(11_u32.to_le_bytes());
		data.extend(16_u16.to_le_bytes());
		data.extend(2_u16.to_le_bytes());
		data.extend(44100_u32.to_le_bytes());

		let mut format = FormatInfo::with_container("Monkey's Audio");
		read_mac_properties(&mut Cursor::new(data), &mut format).unwrap();

		assert_eq!(format.channels, Some(2));
		assert_eq!(format.bits_per_sample, Some(16));
		assert_eq!(format.number_of_samples, Some(73728 * 10 + 44100));
		assert_eq!(format.lossless, Some(true));
	}

	#[test_log::test]
	fn wavpack_block() {
		let mut data = b"wvpk".to_vec();
		data.extend(100_u32.to_le_bytes());
		data.extend(0x410_u16.to_le_bytes());
		data.extend([0, 0]);
		data.extend(441_000_u32.to_le_bytes());
		data.extend(0_u32.to_le_bytes());
		data.extend(22050_u32.to_le_bytes());
		// 16 bit, mono, 44.1 kHz
		data.extend((1_u32 | 0x4 | (9 << 23)).to_le_bytes());
		data.extend([0; 4]);

		let mut format = FormatInfo::with_container("WavPack");
		read_wavpack_properties(&mut &data[..], &mut format).unwrap();

		assert_eq!(format.sample_rate, Some(44100));
		assert_eq!(format.channels, Some(1));
		assert_eq!(format.bits_per_sample, Some(16));
		assert_eq!(format.duration, Some(Duration::from_secs(10)));
		assert_eq!(format.lossless, Some(true));
	}
}
