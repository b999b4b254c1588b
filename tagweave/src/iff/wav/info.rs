use crate::error::Result;
use crate::iff::chunk::Chunks;
use crate::macros::decode_err;
use crate::tag::NativeTag;
use crate::util::text::latin1_decode;

use std::io::{Read, Seek};

use byteorder::LittleEndian;

/// Read the items of a `LIST/INFO` chunk, up to `end`
///
/// Item values are null terminated. They have no declared encoding, UTF-8 is tried first with a
/// fallback to Latin-1.
pub(super) fn parse_riff_info<R>(
	data: &mut R,
	chunks: &mut Chunks<LittleEndian>,
	end: u64,
	tags: &mut Vec<NativeTag>,
) -> Result<()>
where
	R: Read + Seek + ?Sized,
{
	while data.stream_position()? < end && matches!(chunks.next(data), Ok(true)) {
		if !verify_key(&chunks.fourcc) {
			decode_err!(@BAIL Riff, "RIFF INFO item key contains invalid characters");
		}

		// Verified to be ASCII
		let key = String::from_utf8_lossy(&chunks.fourcc).into_owned();
		let content = chunks.content(data)?;

		let value_end = content.iter().position(|b| *b == 0).unwrap_or(content.len());
		let value = &content[..value_end];

		let value = match std::str::from_utf8(value) {
			Ok(value) => value.to_owned(),
			Err(_) => {
				log::debug!("RIFF: INFO item \"{key}\" is not UTF-8, decoding as Latin-1");
				latin1_decode(value)
			},
		};

		let value = value.trim_end();
		if value.is_empty() {
			continue;
		}

		tags.push(NativeTag::new(key, value));
	}

	Ok(())
}

fn verify_key(key: &[u8; 4]) -> bool {
	key.iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
