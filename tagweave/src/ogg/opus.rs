use super::constants::OPUS_DECODE_SAMPLE_RATE;
use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::FormatInfo;

use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};

/// Read the `OpusHead` identification header
pub(super) fn read_identification(packet: &[u8], format: &mut FormatInfo) -> Result<()> {
	if packet.len() < 19 {
		decode_err!(@BAIL Ogg, "Opus identification header is too short");
	}

	// Skip "OpusHead"
	let reader = &mut &packet[8..];

	let _version = reader.read_u8()?;
	let channels = reader.read_u8()?;
	let _pre_skip = reader.read_u16::<LittleEndian>()?;
	let input_sample_rate = reader.read_u32::<LittleEndian>()?;
	let _output_gain = reader.read_i16::<LittleEndian>()?;
	let channel_mapping_family = reader.read_u8()?;

	// https://datatracker.ietf.org/doc/html/rfc7845.html#section-5.1.1
	if (channel_mapping_family == 0 && channels > 2)
		|| (channel_mapping_family == 1 && channels > 8)
	{
		decode_err!(@BAIL Ogg, "Invalid channel count for mapping family");
	}

	format.codec = Some(String::from("Opus"));
	format.channels = Some(channels);
	format.sample_rate = Some(if input_sample_rate > 0 {
		input_sample_rate
	} else {
		OPUS_DECODE_SAMPLE_RATE
	});

	Ok(())
}

/// Derive the duration and bitrate from the last granule position
///
/// Opus granule positions always count 48 kHz samples, and include the pre-skip.
pub(super) fn set_duration(
	format: &mut FormatInfo,
	identification_packet: &[u8],
	last_granule_position: u64,
	stream_len: u64,
) {
	let pre_skip = identification_packet
		.get(10..12)
		.map_or(0, |pre_skip| u16::from_le_bytes([pre_skip[0], pre_skip[1]]));

	let total_samples = last_granule_position.saturating_sub(u64::from(pre_skip));
	if total_samples == 0 {
		log::warn!("Opus: The file contains invalid PCM values, unable to calculate length");
		return;
	}

	let length = total_samples * 1000 / u64::from(OPUS_DECODE_SAMPLE_RATE);
	format.number_of_samples = Some(total_samples);
	format.duration = Some(Duration::from_millis(length));

	if length > 0 {
		format.bitrate = u32::try_from(stream_len * 8 * 1000 / length).ok();
	}
}
