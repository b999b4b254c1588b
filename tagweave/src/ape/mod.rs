//! APEv1/v2 tags, Monkey's Audio and WavPack
//!
//! APE tags are found at the end of a stream, after the audio and before any ID3v1 tag. Both
//! Monkey's Audio and WavPack use them as their primary tag format, MPEG streams may carry one too.

mod header;
mod properties;
mod read;
mod tag;

pub(crate) use read::read_from;
pub(crate) use tag::find_ape_tag_before;
