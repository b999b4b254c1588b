//! ID3v1 items
//!
//! ID3v1 is a fixed 128 byte structure at the end of a file, holding a handful of Latin-1
//! fields and a genre index.

pub(crate) mod constants;
mod read;

pub use constants::GENRES;
pub(crate) use read::parse_id3v1;
