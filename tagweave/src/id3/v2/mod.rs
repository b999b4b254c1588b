//! ID3v2 items
//!
//! Covers ID3v2.2, ID3v2.3 and ID3v2.4 tags. Frames are read into native tags, see
//! `frame` for the identifiers produced.

mod frame;
mod header;
mod read;

pub(crate) use header::Id3v2Header;
pub(crate) use read::parse_id3v2;
