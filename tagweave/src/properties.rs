//! Container and codec information

use crate::tag::TagFormat;

use std::time::Duration;

/// Audio container/codec facts reported by a parser
///
/// Parsers fill in whatever they can determine. `tag_types` is owned by normalization: it is
/// overwritten with the formats present in the native collection.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use tagweave::properties::FormatInfo;
///
/// let mut format = FormatInfo::default();
/// format.container = Some(String::from("FLAC"));
/// format.duration = Some(Duration::from_secs(180));
/// format.lossless = Some(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct FormatInfo {
	/// The container, such as `MPEG`, `FLAC`, or `Ogg`
	pub container: Option<String>,
	/// The codec, such as `MPEG 1 Layer 3` or `Opus`
	pub codec: Option<String>,
	/// The tag formats present in the file
	pub tag_types: Vec<TagFormat>,
	/// Duration of the audio
	pub duration: Option<Duration>,
	/// Bitrate (bps)
	pub bitrate: Option<u32>,
	/// Sample rate (Hz)
	pub sample_rate: Option<u32>,
	/// Bits per sample
	pub bits_per_sample: Option<u8>,
	/// Channel count
	pub channels: Option<u8>,
	/// Whether the codec is lossless
	pub lossless: Option<bool>,
	/// The encoder, such as the Vorbis vendor string or the MP3 encoder tag
	pub encoder: Option<String>,
	/// The codec profile, such as `CBR` or `V2`
	pub codec_profile: Option<String>,
	/// The total number of samples per channel
	pub number_of_samples: Option<u64>,
	/// MD5 of the unencoded audio, as stored by FLAC
	pub audio_md5: Option<[u8; 16]>,
}

impl FormatInfo {
	/// Create an empty `FormatInfo` for a container
	pub fn with_container(container: &str) -> Self {
		Self {
			container: Some(container.to_owned()),
			..Self::default()
		}
	}

	/// Derive the duration from the sample count, if both it and the sample rate are known
	pub(crate) fn duration_from_samples(&mut self) {
		if let (Some(samples), Some(sample_rate)) = (self.number_of_samples, self.sample_rate) {
			if sample_rate > 0 {
				let millis = samples.saturating_mul(1000) / u64::from(sample_rate);
				self.duration = Some(Duration::from_millis(millis));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::FormatInfo;

	use std::time::Duration;

	#[test_log::test]
	fn duration_from_samples() {
		let mut format = FormatInfo::with_container("FLAC");
		format.number_of_samples = Some(441_000);
		format.sample_rate = Some(44100);
		format.duration_from_samples();

		assert_eq!(format.duration, Some(Duration::from_secs(10)));

		let mut unknown = FormatInfo::default();
		unknown.number_of_samples = Some(441_000);
		unknown.duration_from_samples();
		assert_eq!(unknown.duration, None);
	}
}
