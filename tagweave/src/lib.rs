//! Read audio metadata from any supported format into one normalized record.
//!
//! Every container stores its tags in its own vocabulary: ID3v1, ID3v2, APEv2, Vorbis comments,
//! MP4 atoms, ASF attributes and RIFF INFO chunks all name and encode "the artist" differently.
//! tagweave reads those native tags and maps them onto a single set of [`CommonKey`] fields.
//!
//! [`CommonKey`]: common::CommonKey
//!
//! # Supported Formats
//!
//! | Container      | Built-in parser | Tags read                 |
//! |----------------|-----------------|---------------------------|
//! | MP3/MP2        | yes             | ID3v2, APEv2, ID3v1       |
//! | FLAC           | yes             | Vorbis comments, ID3v2    |
//! | Ogg Vorbis     | yes             | Vorbis comments           |
//! | Ogg Opus       | yes             | Vorbis comments           |
//! | Monkey's Audio | yes             | APEv2, ID3v1              |
//! | WavPack        | yes             | APEv2, ID3v1              |
//! | WAV            | yes             | RIFF INFO, ID3v2          |
//! | MP4/M4A        | no              | iTunes MP4 (mapping only) |
//! | ASF/WMA        | no              | ASF (mapping only)        |
//! | AIFF           | no              | ID3v2 (mapping only)      |
//!
//! Formats without a built-in parser can still be read by supplying a
//! [`ParserLoader`](resolve::ParserLoader) through
//! [`ParseOptions::parser_loader`](config::ParseOptions::parser_loader).
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> tagweave::error::Result<()> {
//! use tagweave::config::ParseOptions;
//!
//! // The format is taken from the extension, or from the content if that fails
//! let metadata = tagweave::parse_file("track.mp3", &ParseOptions::new())?;
//!
//! println!("Title: {:?}", metadata.common.title());
//! println!("Artist: {:?}", metadata.common.artist());
//! println!("Track: {:?}", metadata.common.track());
//! # Ok(())
//! # }
//! ```
//!
//! ## Merging tag headers
//!
//! A file may carry several tag formats at once, such as an MP3 with both ID3v2 and ID3v1. By
//! default only the highest priority format is used (see [`TagFormat::PRIORITY`]). With
//! `merge_tag_headers`, lower priority formats fill in the fields the others left empty.
//!
//! [`TagFormat::PRIORITY`]: tag::TagFormat::PRIORITY
//!
//! ```rust
//! # fn main() -> tagweave::error::Result<()> {
//! use tagweave::normalize::MetadataParser;
//! use tagweave::tag::{NativeMetadata, NativeTag, TagFormat};
//!
//! let mut native = NativeMetadata::default();
//! native.native.push(TagFormat::Id3v24, NativeTag::new("TIT2", "Title"));
//! native.native.push(TagFormat::Id3v1, NativeTag::new("album", "Album"));
//!
//! let parser = MetadataParser::new();
//!
//! let single = parser.parse_native_tags(native.clone(), false, false)?;
//! assert_eq!(single.common.album(), None);
//!
//! let merged = parser.parse_native_tags(native, false, true)?;
//! assert_eq!(merged.common.title(), Some("Title"));
//! assert_eq!(merged.common.album(), Some("Album"));
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod io;
pub(crate) mod macros;
pub mod mapping;
pub mod normalize;
pub mod picture;
pub mod probe;
pub mod properties;
pub mod resolve;
pub mod sniff;
pub mod tag;
mod util;

mod ape;
mod flac;
mod id3;
mod iff;
mod mpeg;
mod ogg;

pub use crate::common::{join_artists, rating_to_stars};
pub use crate::normalize::{AudioMetadata, MetadataParser};
pub use crate::probe::{parse_file, parse_native, parse_stream};
pub use crate::tag::order_tags;
