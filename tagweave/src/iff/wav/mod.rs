//! RIFF WAVE
//!
//! Tags come from the `LIST/INFO` chunk (reported as `exif`) and `id3 `/`ID3 ` chunks.

mod info;
mod properties;
mod read;

pub(crate) use read::read_from;
