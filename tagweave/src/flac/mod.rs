//! FLAC
//!
//! Tags live in the `VORBIS_COMMENT` metadata block, pictures in `PICTURE` blocks. An ID3v2 tag
//! may precede the stream marker.

mod block;
mod properties;
mod read;

pub(crate) use read::read_from;
