//! Ogg Vorbis and Ogg Opus
//!
//! Both codecs store their tags as Vorbis comments in the second packet of the stream. The same
//! comment reader is used for the FLAC `VORBIS_COMMENT` block.

mod constants;
mod opus;
pub(crate) mod read;
mod vorbis;

pub(crate) use read::read_from;

use crate::error::Result;
use crate::macros::decode_err;

fn verify_signature(content: &[u8], sig: &[u8]) -> Result<()> {
	if !content.starts_with(sig) {
		decode_err!(@BAIL Ogg, "File missing magic signature");
	}

	Ok(())
}
