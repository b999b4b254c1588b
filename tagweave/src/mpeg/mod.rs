//! MPEG audio (MP1, MP2, MP3)
//!
//! Tags are gathered from both ends of the stream: ID3v2 at the front, APEv2 and ID3v1 at the back.

pub(crate) mod header;
mod read;

pub(crate) use read::read_from;
