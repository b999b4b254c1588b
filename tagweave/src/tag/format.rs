use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The tag formats a parser can produce
///
/// Each variant corresponds to one native vocabulary with its own mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum TagFormat {
	/// APE tags, versions 1 and 2
	Apev2,
	/// Vorbis comments, used by FLAC, OGG Vorbis, and Opus
	Vorbis,
	/// ID3v2.4
	Id3v24,
	/// ID3v2.3
	Id3v23,
	/// ID3v2.2
	Id3v22,
	/// RIFF INFO chunks
	Exif,
	/// ASF content description and extended content description objects
	Asf,
	/// MP4 `ilst` atoms
	Mp4,
	/// ID3v1 and ID3v1.1
	Id3v1,
}

impl TagFormat {
	/// The fixed precedence among tag formats
	///
	/// When a file carries more than one format, the first one in this list populates the common
	/// record first, and without merging, exclusively.
	pub const PRIORITY: [TagFormat; 9] = [
		TagFormat::Apev2,
		TagFormat::Vorbis,
		TagFormat::Id3v24,
		TagFormat::Id3v23,
		TagFormat::Id3v22,
		TagFormat::Exif,
		TagFormat::Asf,
		TagFormat::Mp4,
		TagFormat::Id3v1,
	];

	/// The canonical identifier of the format
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::tag::TagFormat;
	///
	/// assert_eq!(TagFormat::Mp4.as_str(), "iTunes MP4");
	/// assert_eq!("ID3v2.3".parse::<TagFormat>(), Ok(TagFormat::Id3v23));
	/// ```
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Apev2 => "APEv2",
			Self::Vorbis => "vorbis",
			Self::Id3v24 => "ID3v2.4",
			Self::Id3v23 => "ID3v2.3",
			Self::Id3v22 => "ID3v2.2",
			Self::Exif => "exif",
			Self::Asf => "asf",
			Self::Mp4 => "iTunes MP4",
			Self::Id3v1 => "ID3v1",
		}
	}

	/// Get the ID3v2 format for a major version
	pub fn id3v2(major_version: u8) -> Option<Self> {
		match major_version {
			2 => Some(Self::Id3v22),
			3 => Some(Self::Id3v23),
			4 => Some(Self::Id3v24),
			_ => None,
		}
	}
}

impl Display for TagFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TagFormat {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::PRIORITY
			.into_iter()
			.find(|format| format.as_str() == s)
			.ok_or(())
	}
}
