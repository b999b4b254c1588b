/// The shape of a canonical field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// A single string, first writer wins
	Text,
	/// A single integer, first writer wins
	Integer,
	/// A single floating point number, first writer wins
	Float,
	/// A single boolean, first writer wins
	Flag,
	/// A list of strings, values are appended
	Texts,
	/// A `{no, of}` pair, each half is filled independently
	Position,
	/// A list of [`Picture`](crate::picture::Picture)s
	Pictures,
	/// A list of [`Rating`](super::Rating)s
	Ratings,
}

macro_rules! common_keys {
	(
		$(
			$(#[$meta:meta])*
			$variant:ident => $name:literal, $kind:ident
		);+ $(;)?
	) => {
		/// The canonical, format-independent fields
		///
		/// Every key has exactly one [`FieldKind`], which decides how values merge.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		#[non_exhaustive]
		pub enum CommonKey {
			$(
				$(#[$meta])*
				$variant,
			)+
		}

		impl CommonKey {
			/// Every canonical key, in declaration order
			pub const ALL: &'static [CommonKey] = &[$(CommonKey::$variant,)+];

			/// The canonical field name
			pub fn name(self) -> &'static str {
				match self {
					$(Self::$variant => $name,)+
				}
			}

			/// The [`FieldKind`] of the field
			pub fn kind(self) -> FieldKind {
				match self {
					$(Self::$variant => FieldKind::$kind,)+
				}
			}

			/// Get a key from its canonical field name
			///
			/// # Examples
			///
			/// ```rust
			/// use tagweave::common::CommonKey;
			///
			/// assert_eq!(CommonKey::from_name("albumartist"), Some(CommonKey::AlbumArtist));
			/// assert_eq!(CommonKey::from_name("Album Artist"), None);
			/// ```
			pub fn from_name(name: &str) -> Option<Self> {
				match name {
					$($name => Some(Self::$variant),)+
					_ => None,
				}
			}
		}
	};
}

common_keys! {
	/// Track number and total
	Track => "track", Position;
	/// Disk number and total
	Disk => "disk", Position;
	/// Release year
	Year => "year", Integer;
	/// Track title
	Title => "title", Text;
	/// The display artist, derived during normalization when only `artists` is known
	Artist => "artist", Text;
	/// Individual track artists
	Artists => "artists", Texts;
	/// Release artist
	AlbumArtist => "albumartist", Text;
	/// Release title
	Album => "album", Text;
	/// Release date, as stored in the tag
	Date => "date", Text;
	/// Date of the original release
	OriginalDate => "originaldate", Text;
	/// Year of the original release
	OriginalYear => "originalyear", Integer;
	/// Free-form comments
	Comment => "comment", Texts;
	/// Genres, with ID3v1 genre references resolved
	Genre => "genre", Texts;
	/// Embedded pictures
	Picture => "picture", Pictures;
	/// Composers
	Composer => "composer", Texts;
	/// Unsynchronised lyrics
	Lyrics => "lyrics", Texts;
	/// Release title for sorting
	AlbumSort => "albumsort", Text;
	/// Track title for sorting
	TitleSort => "titlesort", Text;
	/// Title of the musical work
	Work => "work", Text;
	/// Track artist for sorting
	ArtistSort => "artistsort", Text;
	/// Release artist for sorting
	AlbumArtistSort => "albumartistsort", Text;
	/// Composer for sorting
	ComposerSort => "composersort", Text;
	/// Lyricists
	Lyricist => "lyricist", Texts;
	/// Writers
	Writer => "writer", Texts;
	/// Conductors
	Conductor => "conductor", Texts;
	/// Remixers
	Remixer => "remixer", Texts;
	/// Arrangers
	Arranger => "arranger", Texts;
	/// Engineers
	Engineer => "engineer", Texts;
	/// Producers
	Producer => "producer", Texts;
	/// DJ mixers
	DjMixer => "djmixer", Texts;
	/// Mix engineers
	Mixer => "mixer", Texts;
	/// Technicians
	Technician => "technician", Texts;
	/// Record labels
	Label => "label", Texts;
	/// Content group
	Grouping => "grouping", Text;
	/// Track subtitles
	Subtitle => "subtitle", Texts;
	/// Disc subtitles
	DiscSubtitle => "discsubtitle", Texts;
	/// Whether the release is a compilation
	Compilation => "compilation", Flag;
	/// Normalized ratings, see [`Rating`](super::Rating)
	Rating => "rating", Ratings;
	/// Beats per minute
	Bpm => "bpm", Float;
	/// Mood
	Mood => "mood", Text;
	/// Release medium, such as `CD`
	Media => "media", Text;
	/// Label catalog numbers
	CatalogNumber => "catalognumber", Texts;
	/// MusicBrainz release status
	ReleaseStatus => "releasestatus", Text;
	/// MusicBrainz release types
	ReleaseType => "releasetype", Texts;
	/// Country of release
	ReleaseCountry => "releasecountry", Text;
	/// Script of the track listing
	Script => "script", Text;
	/// Language of the lyrics
	Language => "language", Text;
	/// Copyright message
	Copyright => "copyright", Text;
	/// License or terms of use
	License => "license", Text;
	/// Person or organization that encoded the file
	EncodedBy => "encodedby", Text;
	/// Software and settings used for encoding
	EncoderSettings => "encodersettings", Text;
	/// Whether the track is part of a gapless album
	Gapless => "gapless", Flag;
	/// Release barcode
	Barcode => "barcode", Text;
	/// International Standard Recording Codes
	Isrc => "isrc", Texts;
	/// Amazon Standard Identification Number
	Asin => "asin", Text;
	/// MusicBrainz recording ID
	MusicBrainzRecordingId => "musicbrainz_recordingid", Text;
	/// MusicBrainz release track ID
	MusicBrainzTrackId => "musicbrainz_trackid", Text;
	/// MusicBrainz release ID
	MusicBrainzAlbumId => "musicbrainz_albumid", Text;
	/// MusicBrainz artist IDs
	MusicBrainzArtistId => "musicbrainz_artistid", Texts;
	/// MusicBrainz release artist IDs
	MusicBrainzAlbumArtistId => "musicbrainz_albumartistid", Texts;
	/// MusicBrainz release group ID
	MusicBrainzReleaseGroupId => "musicbrainz_releasegroupid", Text;
	/// MusicBrainz work ID
	MusicBrainzWorkId => "musicbrainz_workid", Text;
	/// MusicBrainz TRM ID
	MusicBrainzTrmId => "musicbrainz_trmid", Text;
	/// MusicBrainz disc ID
	MusicBrainzDiscId => "musicbrainz_discid", Text;
	/// AcoustID
	AcoustIdId => "acoustid_id", Text;
	/// AcoustID fingerprint
	AcoustIdFingerprint => "acoustid_fingerprint", Text;
	/// MusicIP PUID
	MusicIpPuid => "musicip_puid", Text;
	/// MusicIP fingerprint
	MusicIpFingerprint => "musicip_fingerprint", Text;
	/// Artist or release website
	Website => "website", Text;
	/// Musical key, such as `Am`
	Key => "key", Text;
	/// Descriptions
	Description => "description", Texts;
	/// Title of the original release
	OriginalAlbum => "originalalbum", Text;
	/// Artist of the original release
	OriginalArtist => "originalartist", Text;
	/// ReplayGain track gain, in dB
	ReplayGainTrackGain => "replaygain_track_gain", Float;
	/// ReplayGain track peak
	ReplayGainTrackPeak => "replaygain_track_peak", Float;
	/// ReplayGain album gain, in dB
	ReplayGainAlbumGain => "replaygain_album_gain", Float;
	/// ReplayGain album peak
	ReplayGainAlbumPeak => "replaygain_album_peak", Float;
}

#[cfg(test)]
mod tests {
	use super::{CommonKey, FieldKind};

	#[test_log::test]
	fn names_round_trip() {
		for key in CommonKey::ALL {
			assert_eq!(CommonKey::from_name(key.name()), Some(*key));
		}
	}

	#[test_log::test]
	fn kinds() {
		assert_eq!(CommonKey::Track.kind(), FieldKind::Position);
		assert_eq!(CommonKey::Disk.kind(), FieldKind::Position);
		assert_eq!(CommonKey::Artists.kind(), FieldKind::Texts);
		assert_eq!(CommonKey::Picture.kind(), FieldKind::Pictures);
		assert_eq!(CommonKey::Rating.kind(), FieldKind::Ratings);
		assert_eq!(CommonKey::Compilation.kind(), FieldKind::Flag);
	}
}
