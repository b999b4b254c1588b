use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::FormatInfo;

use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};

const PCM: u16 = 0x0001;
const IEEE_FLOAT: u16 = 0x0003;
const EXTENSIBLE: u16 = 0xFFFE;

struct FmtChunk {
	format_tag: u16,
	channels: u16,
	sample_rate: u32,
	bytes_per_second: u32,
	bits_per_sample: u16,
	valid_bits_per_sample: Option<u16>,
}

fn read_fmt_chunk(mut reader: &[u8]) -> Result<FmtChunk> {
	let mut format_tag = reader.read_u16::<LittleEndian>()?;
	let channels = reader.read_u16::<LittleEndian>()?;
	let sample_rate = reader.read_u32::<LittleEndian>()?;
	let bytes_per_second = reader.read_u32::<LittleEndian>()?;
	let _block_align = reader.read_u16::<LittleEndian>()?;
	let bits_per_sample = reader.read_u16::<LittleEndian>()?;

	let mut valid_bits_per_sample = None;

	// cbSize (2), valid bits per sample (2), channel mask (4), then the sub format GUID whose
	// first two bytes are the real format tag
	if format_tag == EXTENSIBLE && reader.len() >= 10 {
		let _cb_size = reader.read_u16::<LittleEndian>()?;
		valid_bits_per_sample = Some(reader.read_u16::<LittleEndian>()?).filter(|bits| *bits > 0);
		let _channel_mask = reader.read_u32::<LittleEndian>()?;
		format_tag = reader.read_u16::<LittleEndian>()?;
	}

	Ok(FmtChunk {
		format_tag,
		channels,
		sample_rate,
		bytes_per_second,
		bits_per_sample,
		valid_bits_per_sample,
	})
}

pub(super) fn read_properties(
	fmt: &[u8],
	total_samples: u32,
	stream_len: u32,
	format: &mut FormatInfo,
) -> Result<()> {
	if fmt.len() < 16 {
		decode_err!(@BAIL Riff, "File does not contain a valid \"fmt \" chunk");
	}

	let FmtChunk {
		format_tag,
		channels,
		sample_rate,
		bytes_per_second,
		bits_per_sample,
		valid_bits_per_sample,
	} = read_fmt_chunk(fmt)?;

	if channels == 0 {
		decode_err!(@BAIL Riff, "File contains 0 channels");
	}

	let pcm = format_tag == PCM || format_tag == IEEE_FLOAT;

	format.codec = Some(match format_tag {
		PCM => String::from("PCM"),
		IEEE_FLOAT => String::from("IEEE Float"),
		other => format!("0x{other:04X}"),
	});
	format.lossless = Some(pcm);
	format.channels = Some(channels as u8);
	format.sample_rate = Some(sample_rate).filter(|rate| *rate > 0);
	format.bits_per_sample = valid_bits_per_sample
		.or(Some(bits_per_sample))
		.filter(|bits| *bits > 0)
		.map(|bits| bits as u8);

	if bytes_per_second > 0 {
		format.bitrate = Some(bytes_per_second.saturating_mul(8));
	}

	let mut total_samples = u64::from(total_samples);
	if pcm && bits_per_sample >= 8 {
		total_samples = u64::from(stream_len) / (u64::from(channels) * u64::from(bits_per_sample / 8));
	}

	if total_samples > 0 && sample_rate > 0 {
		log::debug!("RIFF: Calculating duration from total samples");

		format.number_of_samples = Some(total_samples);
		format.duration_from_samples();
	} else if stream_len > 0 && bytes_per_second > 0 {
		log::debug!("RIFF: Calculating duration from stream length/byte rate");

		let length = u64::from(stream_len) * 1000 / u64::from(bytes_per_second);
		format.duration = Some(Duration::from_millis(length));
	} else {
		log::warn!("RIFF: Unable to calculate duration");
	}

	Ok(())
}
