use crate::error::Result;
use crate::macros::decode_err;
use crate::properties::FormatInfo;

use byteorder::{LittleEndian, ReadBytesExt};

/// Read the Vorbis identification header
pub(super) fn read_identification(packet: &[u8], format: &mut FormatInfo) -> Result<()> {
	if packet.len() < 30 {
		decode_err!(@BAIL Ogg, "Vorbis identification header is too short");
	}

	// Skip the packet type and "vorbis"
	let reader = &mut &packet[7..];

	let version = reader.read_u32::<LittleEndian>()?;
	if version != 0 {
		log::warn!("Vorbis: Unexpected version {version}");
	}

	let channels = reader.read_u8()?;
	let sample_rate = reader.read_u32::<LittleEndian>()?;

	let _bitrate_max = reader.read_i32::<LittleEndian>()?;
	let bitrate_nominal = reader.read_i32::<LittleEndian>()?;

	format.codec = Some(String::from("Vorbis"));
	format.channels = Some(channels);
	format.sample_rate = Some(sample_rate).filter(|rate| *rate > 0);
	format.bitrate = u32::try_from(bitrate_nominal).ok().filter(|bitrate| *bitrate > 0);

	Ok(())
}

pub(super) fn set_duration(format: &mut FormatInfo, last_granule_position: u64) {
	format.number_of_samples = Some(last_granule_position);
	format.duration_from_samples();
}
