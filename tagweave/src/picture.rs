//! Format-agnostic picture handling

use crate::error::{ErrorKind, MetadataError, Result};
use crate::macros::err;

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use data_encoding::BASE64;

/// The APE item keys that hold pictures
pub const APE_PICTURE_TYPES: [&str; 21] = [
	"Cover Art (Other)",
	"Cover Art (Png Icon)",
	"Cover Art (Icon)",
	"Cover Art (Front)",
	"Cover Art (Back)",
	"Cover Art (Leaflet)",
	"Cover Art (Media)",
	"Cover Art (Lead Artist)",
	"Cover Art (Artist)",
	"Cover Art (Conductor)",
	"Cover Art (Band)",
	"Cover Art (Composer)",
	"Cover Art (Lyricist)",
	"Cover Art (Recording Location)",
	"Cover Art (During Recording)",
	"Cover Art (During Performance)",
	"Cover Art (Video Capture)",
	"Cover Art (Fish)",
	"Cover Art (Illustration)",
	"Cover Art (Band Logotype)",
	"Cover Art (Publisher Logotype)",
];

/// Mime types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/jpeg"), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_str("PNG"), MimeType::Png);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" | "jpg" | "jpeg" => Self::Jpeg,
			"image/png" | "png" => Self::Png,
			"image/tiff" | "tiff" => Self::Tiff,
			"image/bmp" | "bmp" => Self::Bmp,
			"image/gif" | "gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Guess the `MimeType` from the magic bytes of the image data
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_magic(b"\x89PNG\r\n\x1a\n"), Some(MimeType::Png));
	/// assert_eq!(MimeType::from_magic(b"nothing"), None);
	/// ```
	pub fn from_magic(data: &[u8]) -> Option<Self> {
		match data {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
			[0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
			[b'G', b'I', b'F', b'8', ..] => Some(Self::Gif),
			[b'B', b'M', ..] => Some(Self::Bmp),
			[b'I', b'I', b'*', 0, ..] | [b'M', b'M', 0, b'*', ..] => Some(Self::Tiff),
			_ => None,
		}
	}

	/// Get a &str from a `MimeType`
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}

	/// Get a `PictureType` from an APEv2 item key, ignoring case
	pub fn from_ape_key(key: &str) -> Option<Self> {
		APE_PICTURE_TYPES
			.iter()
			.position(|k| k.eq_ignore_ascii_case(key))
			.and_then(|index| u8::try_from(index).ok())
			.map(Self::from_u8)
	}

	/// A human readable description of the picture type
	pub fn as_str(&self) -> Cow<'static, str> {
		let name = match self {
			Self::Other => "Other",
			Self::Icon => "32x32 pixels 'file icon' (PNG only)",
			Self::OtherIcon => "Other file icon",
			Self::CoverFront => "Cover (front)",
			Self::CoverBack => "Cover (back)",
			Self::Leaflet => "Leaflet page",
			Self::Media => "Media (e.g. label side of CD)",
			Self::LeadArtist => "Lead artist/lead performer/soloist",
			Self::Artist => "Artist/performer",
			Self::Conductor => "Conductor",
			Self::Band => "Band/Orchestra",
			Self::Composer => "Composer",
			Self::Lyricist => "Lyricist/text writer",
			Self::RecordingLocation => "Recording Location",
			Self::DuringRecording => "During recording",
			Self::DuringPerformance => "During performance",
			Self::ScreenCapture => "Movie/video screen capture",
			Self::BrightFish => "A bright coloured fish",
			Self::Illustration => "Illustration",
			Self::BandLogo => "Band/artist logotype",
			Self::PublisherLogo => "Publisher/Studio logotype",
			Self::Undefined(i) => return Cow::Owned(format!("Undefined ({i})")),
		};

		Cow::Borrowed(name)
	}
}

/// A picture embedded in a tag
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	pub(crate) pic_type: PictureType,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
}

impl Picture {
	/// Create a new `Picture`
	///
	/// If `mime_type` is `None`, it is guessed from the magic bytes of `data`.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagweave::picture::{MimeType, Picture, PictureType};
	///
	/// let picture = Picture::new(PictureType::CoverFront, None, None, vec![0xFF, 0xD8, 0xFF, 0xE0]);
	/// assert_eq!(picture.mime_type(), Some(&MimeType::Jpeg));
	/// ```
	pub fn new(
		pic_type: PictureType,
		mime_type: Option<MimeType>,
		description: Option<String>,
		data: Vec<u8>,
	) -> Self {
		let mime_type = mime_type.or_else(|| MimeType::from_magic(&data));
		Self {
			pic_type,
			mime_type,
			description,
			data,
		}
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Returns the [`MimeType`], if known
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Returns the picture data
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Get a `Picture` from FLAC `METADATA_BLOCK_PICTURE` bytes
	///
	/// NOTE: If `encoded` is true, the content will be decoded from base64 first, as is the case
	/// for Vorbis comments.
	///
	/// # Errors
	///
	/// This function will return [`NotAPicture`](ErrorKind::NotAPicture) if at any point it's unable
	/// to parse the data
	pub fn from_flac_bytes(bytes: &[u8], encoded: bool) -> Result<Self> {
		if encoded {
			let data = BASE64
				.decode(bytes)
				.map_err(|_| MetadataError::new(ErrorKind::NotAPicture))?;
			Self::from_flac_bytes_inner(&data)
		} else {
			Self::from_flac_bytes_inner(bytes)
		}
	}

	fn from_flac_bytes_inner(content: &[u8]) -> Result<Self> {
		use crate::macros::try_vec;

		if content.len() < 32 {
			err!(NotAPicture);
		}

		let mut reader = Cursor::new(content);

		let pic_ty = reader.read_u32::<BigEndian>()?;
		let Ok(pic_ty) = u8::try_from(pic_ty) else {
			// APIC uses a single byte for the picture type, anything larger is garbage
			err!(NotAPicture);
		};

		let mime_len = reader.read_u32::<BigEndian>()? as usize;
		let mut mime_bytes = try_vec![0; mime_len];
		reader
			.read_exact(&mut mime_bytes)
			.map_err(|_| MetadataError::new(ErrorKind::SizeMismatch))?;
		let mime_type = String::from_utf8(mime_bytes)?;

		let desc_len = reader.read_u32::<BigEndian>()? as usize;
		let mut desc_bytes = try_vec![0; desc_len];
		reader
			.read_exact(&mut desc_bytes)
			.map_err(|_| MetadataError::new(ErrorKind::SizeMismatch))?;
		let description = String::from_utf8(desc_bytes).ok().filter(|d| !d.is_empty());

		// width, height, color depth, number of colors
		let mut dimensions = [0; 16];
		reader.read_exact(&mut dimensions)?;

		let data_len = reader.read_u32::<BigEndian>()? as usize;
		let mut data = try_vec![0; data_len];
		if reader.read_exact(&mut data).is_err() {
			err!(NotAPicture);
		}

		let mime_type = if mime_type.is_empty() {
			None
		} else {
			Some(MimeType::from_str(&mime_type))
		};

		Ok(Self::new(
			PictureType::from_u8(pic_ty),
			mime_type,
			description,
			data,
		))
	}

	/// Get a `Picture` from an APEv2 binary item
	///
	/// APE pictures are stored as `description\0data`, with no MIME type.
	///
	/// # Errors
	///
	/// * The value doesn't contain any data after the description
	pub fn from_ape_bytes(key: &str, bytes: &[u8]) -> Result<Self> {
		if bytes.is_empty() {
			err!(NotAPicture);
		}

		let pic_type = PictureType::from_ape_key(key).unwrap_or(PictureType::Other);

		let (description, data) = match bytes.iter().position(|b| *b == 0) {
			Some(pos) => (
				String::from_utf8(bytes[..pos].to_vec()).ok().filter(|d| !d.is_empty()),
				&bytes[pos + 1..],
			),
			None => (None, bytes),
		};

		if data.is_empty() {
			err!(NotAPicture);
		}

		Ok(Self::new(pic_type, None, description, data.to_vec()))
	}
}
