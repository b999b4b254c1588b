//! Interchange File Format containers
//!
//! Only RIFF WAVE has a built-in parser. AIFF files are resolved, but need a custom parser.

mod chunk;
pub(crate) mod wav;
