use crate::error::Result;
use crate::macros::decode_err;

use std::fmt::{Display, Formatter};
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

// [version index][layer index][bitrate index], in kbps
const BITRATES: [[[u32; 16]; 3]; 2] = [
	[
		[0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
		[0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
	],
	[
		[0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
		[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
		[0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
	],
];

// [version][sample rate index]
const SAMPLE_RATES: [[u32; 3]; 3] = [[44100, 48000, 32000], [22050, 24000, 16000], [11025, 12000, 8000]];

// [layer index][version index]
const SAMPLES: [[u16; 2]; 3] = [[384, 384], [1152, 1152], [1152, 576]];

// [layer index]
const PADDING_SIZES: [u8; 3] = [4, 1, 1];

// [version index][channel mode]
const SIDE_INFORMATION_SIZES: [[u32; 4]; 2] = [[32, 32, 32, 17], [17, 17, 17, 9]];

pub(crate) fn verify_frame_sync(frame_sync: [u8; 2]) -> bool {
	frame_sync[0] == 0xFF && frame_sync[1] >> 5 == 0b111
}

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

impl Display for MpegVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::V1 => f.write_str("1"),
			Self::V2 => f.write_str("2"),
			Self::V2_5 => f.write_str("2.5"),
		}
	}
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	#[default]
	Layer3 = 3,
}

/// Channel mode
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ChannelMode {
	#[default]
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	SingleChannel = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Header {
	pub(crate) sample_rate: u32,
	pub(crate) len: u32,
	pub(crate) data_start: u32,
	pub(crate) samples: u16,
	pub(crate) bitrate: u32,
	pub(crate) version: MpegVersion,
	pub(crate) layer: Layer,
	pub(crate) channel_mode: ChannelMode,
}

impl Header {
	pub(crate) fn read(data: u32) -> Option<Self> {
		if !verify_frame_sync([(data >> 24) as u8, (data >> 16) as u8]) {
			return None;
		}

		let version = match (data >> 19) & 0b11 {
			0b00 => MpegVersion::V2_5,
			0b10 => MpegVersion::V2,
			0b11 => MpegVersion::V1,
			_ => return None,
		};

		let version_index = usize::from(version != MpegVersion::V1);

		let layer = match (data >> 17) & 0b11 {
			0b01 => Layer::Layer3,
			0b10 => Layer::Layer2,
			0b11 => Layer::Layer1,
			_ => {
				log::debug!("MPEG: Frame header uses a reserved layer");
				return None;
			},
		};

		let layer_index = (layer as usize).saturating_sub(1);

		let bitrate = BITRATES[version_index][layer_index][((data >> 12) & 0xF) as usize];
		if bitrate == 0 {
			return None;
		}

		let sample_rate = match (data >> 10) & 0b11 {
			// This is invalid
			0b11 => return None,
			index => SAMPLE_RATES[version as usize][index as usize],
		};

		let padding = if (data >> 9) & 1 == 1 {
			u32::from(PADDING_SIZES[layer_index])
		} else {
			0
		};

		let channel_mode = match (data >> 6) & 0b11 {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		};

		let samples = SAMPLES[layer_index][version_index];

		Some(Self {
			sample_rate,
			len: (u32::from(samples) * bitrate * 125 / sample_rate) + padding,
			data_start: SIDE_INFORMATION_SIZES[version_index][channel_mode as usize] + 4,
			samples,
			bitrate,
			version,
			layer,
			channel_mode,
		})
	}

	pub(crate) fn channels(&self) -> u8 {
		if self.channel_mode == ChannelMode::SingleChannel {
			1
		} else {
			2
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum VbrHeaderType {
	Xing,
	Info,
	Vbri,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct VbrHeader {
	pub ty: VbrHeaderType,
	pub frames: u32,
	pub size: u32,
}

impl VbrHeader {
	pub(crate) fn read(reader: &mut &[u8]) -> Result<Option<Self>> {
		let reader_len = reader.len();

		let mut header = [0; 4];
		if reader.read_exact(&mut header).is_err() {
			return Ok(None);
		}

		match &header {
			b"Xing" | b"Info" => {
				if reader_len < 16 {
					decode_err!(@BAIL Mpeg, "Xing header has an invalid size (< 16)");
				}

				let flags = reader.read_u32::<BigEndian>()?;
				if flags & 0x03 != 0x03 {
					log::debug!("MPEG: Xing header doesn't have the frame and size flags set");
					return Ok(None);
				}

				let frames = reader.read_u32::<BigEndian>()?;
				let size = reader.read_u32::<BigEndian>()?;

				let ty = if &header == b"Xing" {
					VbrHeaderType::Xing
				} else {
					VbrHeaderType::Info
				};

				Ok(Some(Self { ty, frames, size }))
			},
			b"VBRI" => {
				if reader_len < 32 {
					decode_err!(@BAIL Mpeg, "VBRI header has an invalid size (< 32)");
				}

				// Version ID (2), delay (2), quality indicator (2)
				let _info = reader.read_uint::<BigEndian>(6)?;

				let size = reader.read_u32::<BigEndian>()?;
				let frames = reader.read_u32::<BigEndian>()?;

				Ok(Some(Self {
					ty: VbrHeaderType::Vbri,
					frames,
					size,
				}))
			},
			_ => Ok(None),
		}
	}

	pub(crate) fn is_valid(&self) -> bool {
		self.frames > 0 && self.size > 0
	}
}
