use crate::common::CommonKey;

use std::collections::HashMap;

// Generates a lookup table from native identifiers to `CommonKey`s
//
// Lookups try an exact match first, then fall back to ignoring ASCII case, since many
// taggers are inconsistent about the case of free-form keys (TXXX descriptions, Vorbis
// field names, APE keys).
macro_rules! gen_map {
	(
		$(#[$meta:meta])?
		$NAME:ident;

		$(
			$($key:literal)|+ => $variant:ident
		),+ $(,)?
	) => {
		paste::paste! {
			$(#[$meta])?
			pub(crate) static [<$NAME _ENTRIES>]: &[(&str, CommonKey)] = &[
				$(
					$(
						($key, CommonKey::$variant),
					)+
				)+
			];

			$(#[$meta])?
			#[allow(non_camel_case_types)]
			pub(crate) struct $NAME;

			$(#[$meta])?
			impl $NAME {
				pub(crate) fn get_common_key(&self, key: &str) -> Option<CommonKey> {
					static INSTANCE: std::sync::OnceLock<HashMap<&'static str, CommonKey>> = std::sync::OnceLock::new();
					let map = INSTANCE.get_or_init(|| [<$NAME _ENTRIES>].iter().copied().collect());

					map.get(key)
						.or_else(|| {
							map.iter()
								.find(|(k, _)| k.eq_ignore_ascii_case(key))
								.map(|(_, v)| v)
						})
						.copied()
				}
			}
		}
	};
}

gen_map!(
	ID3V1_MAP;

	"title"   => Title,
	"artist"  => Artist,
	"album"   => Album,
	"year"    => Year,
	"comment" => Comment,
	"track"   => Track,
	"genre"   => Genre
);

gen_map!(
	ID3V2_2_MAP;

	"TT1"                                  => Grouping,
	"TT2"                                  => Title,
	"TT3"                                  => Subtitle,
	"TP1"                                  => Artist,
	"TP2"                                  => AlbumArtist,
	"TP3"                                  => Conductor,
	"TP4"                                  => Remixer,
	"TAL"                                  => Album,
	"TYE"                                  => Year,
	"TOR"                                  => OriginalYear,
	"TOT"                                  => OriginalAlbum,
	"TOA"                                  => OriginalArtist,
	"COM"                                  => Comment,
	"TRK"                                  => Track,
	"TPA"                                  => Disk,
	"TCO"                                  => Genre,
	"PIC"                                  => Picture,
	"TCM"                                  => Composer,
	"TXT"                                  => Lyricist,
	"ULT"                                  => Lyrics,
	"TBP"                                  => Bpm,
	"TKE"                                  => Key,
	"TLA"                                  => Language,
	"TCR"                                  => Copyright,
	"TPB"                                  => Label,
	"TEN"                                  => EncodedBy,
	"TSS"                                  => EncoderSettings,
	"TRC"                                  => Isrc,
	"TCP"                                  => Compilation,
	"TST"                                  => TitleSort,
	"TSA"                                  => AlbumSort,
	"TSP"                                  => ArtistSort,
	"TS2"                                  => AlbumArtistSort,
	"TSC"                                  => ComposerSort,
	"WAR"                                  => Website,
	"WCP"                                  => License,
	"POP"                                  => Rating,
	"COM:iTunPGAP"                         => Gapless,
	"UFI:http://musicbrainz.org"           => MusicBrainzRecordingId,
	"TXX:Artists"                          => Artists,
	"TXX:MusicBrainz Album Id"             => MusicBrainzAlbumId,
	"TXX:MusicBrainz Artist Id"            => MusicBrainzArtistId,
	"TXX:MusicBrainz Album Artist Id"      => MusicBrainzAlbumArtistId,
	"TXX:MusicBrainz Release Track Id"     => MusicBrainzTrackId,
	"TXX:MusicBrainz Release Group Id"     => MusicBrainzReleaseGroupId,
	"TXX:replaygain_track_gain"            => ReplayGainTrackGain,
	"TXX:replaygain_track_peak"            => ReplayGainTrackPeak,
	"TXX:replaygain_album_gain"            => ReplayGainAlbumGain,
	"TXX:replaygain_album_peak"            => ReplayGainAlbumPeak
);

gen_map!(
	ID3V2_4_MAP;

	"TIT1"                                    => Grouping,
	"TIT2"                                    => Title,
	"TIT3"                                    => Subtitle,
	"TSST"                                    => DiscSubtitle,
	"TPE1"                                    => Artist,
	"TPE2"                                    => AlbumArtist,
	"TPE3"                                    => Conductor,
	"TPE4"                                    => Remixer,
	"TALB"                                    => Album,
	"TDRC"                                    => Date,
	"TYER"                                    => Year,
	"TDOR"                                    => OriginalDate,
	"TORY"                                    => OriginalYear,
	"TOAL"                                    => OriginalAlbum,
	"TOPE"                                    => OriginalArtist,
	"COMM"                                    => Comment,
	"TRCK"                                    => Track,
	"TPOS"                                    => Disk,
	"TCON"                                    => Genre,
	"APIC"                                    => Picture,
	"TCOM"                                    => Composer,
	"TEXT"                                    => Lyricist,
	"USLT"                                    => Lyrics,
	"TSOA"                                    => AlbumSort,
	"TSOT"                                    => TitleSort,
	"TSOP"                                    => ArtistSort,
	"TSO2"                                    => AlbumArtistSort,
	"TSOC"                                    => ComposerSort,
	"TIPL:arranger"                           => Arranger,
	"TIPL:engineer"                           => Engineer,
	"TIPL:producer"                           => Producer,
	"TIPL:DJ-mix"                             => DjMixer,
	"TIPL:mix"                                => Mixer,
	"TPUB"                                    => Label,
	"TCMP"                                    => Compilation,
	"POPM"                                    => Rating,
	"TBPM"                                    => Bpm,
	"TKEY"                                    => Key,
	"TMOO"                                    => Mood,
	"TMED"                                    => Media,
	"TLAN"                                    => Language,
	"TCOP"                                    => Copyright,
	"WCOP"                                    => License,
	"TENC"                                    => EncodedBy,
	"TSSE"                                    => EncoderSettings,
	"TSRC"                                    => Isrc,
	"WOAR"                                    => Website,
	"COMM:iTunPGAP"                           => Gapless,
	"UFID:http://musicbrainz.org"             => MusicBrainzRecordingId,
	"TXXX:Artists"                            => Artists,
	"TXXX:Writer"                             => Writer,
	"TXXX:CATALOGNUMBER"                      => CatalogNumber,
	"TXXX:BARCODE"                            => Barcode,
	"TXXX:ASIN"                               => Asin,
	"TXXX:SCRIPT"                             => Script,
	"TXXX:LICENSE"                            => License,
	"TXXX:Work"                               => Work,
	"TXXX:MusicBrainz Album Status"           => ReleaseStatus,
	"TXXX:MusicBrainz Album Type"             => ReleaseType,
	"TXXX:MusicBrainz Album Release Country"  => ReleaseCountry,
	"TXXX:MusicBrainz Release Track Id"       => MusicBrainzTrackId,
	"TXXX:MusicBrainz Album Id"               => MusicBrainzAlbumId,
	"TXXX:MusicBrainz Artist Id"              => MusicBrainzArtistId,
	"TXXX:MusicBrainz Album Artist Id"        => MusicBrainzAlbumArtistId,
	"TXXX:MusicBrainz Release Group Id"       => MusicBrainzReleaseGroupId,
	"TXXX:MusicBrainz Work Id"                => MusicBrainzWorkId,
	"TXXX:MusicBrainz TRM Id"                 => MusicBrainzTrmId,
	"TXXX:MusicBrainz Disc Id"                => MusicBrainzDiscId,
	"TXXX:Acoustid Id"                        => AcoustIdId,
	"TXXX:Acoustid Fingerprint"               => AcoustIdFingerprint,
	"TXXX:MusicIP PUID"                       => MusicIpPuid,
	"TXXX:MusicMagic Fingerprint"             => MusicIpFingerprint,
	"TXXX:REPLAYGAIN_TRACK_GAIN"              => ReplayGainTrackGain,
	"TXXX:REPLAYGAIN_TRACK_PEAK"              => ReplayGainTrackPeak,
	"TXXX:REPLAYGAIN_ALBUM_GAIN"              => ReplayGainAlbumGain,
	"TXXX:REPLAYGAIN_ALBUM_PEAK"              => ReplayGainAlbumPeak
);

gen_map!(
	MP4_MAP;

	"\u{a9}nam"                                       => Title,
	"\u{a9}ART"                                       => Artist,
	"aART"                                            => AlbumArtist,
	"\u{a9}alb"                                       => Album,
	"\u{a9}day"                                       => Date,
	"\u{a9}cmt"                                       => Comment,
	"trkn"                                            => Track,
	"disk"                                            => Disk,
	"\u{a9}gen" | "gnre"                              => Genre,
	"covr"                                            => Picture,
	"\u{a9}wrt"                                       => Composer,
	"\u{a9}lyr"                                       => Lyrics,
	"\u{a9}grp"                                       => Grouping,
	"\u{a9}wrk"                                       => Work,
	"\u{a9}too"                                       => EncoderSettings,
	"\u{a9}enc"                                       => EncodedBy,
	"soal"                                            => AlbumSort,
	"sonm"                                            => TitleSort,
	"soar"                                            => ArtistSort,
	"soaa"                                            => AlbumArtistSort,
	"soco"                                            => ComposerSort,
	"cprt"                                            => Copyright,
	"cpil"                                            => Compilation,
	"pgap"                                            => Gapless,
	"tmpo"                                            => Bpm,
	"rate"                                            => Rating,
	"desc"                                            => Description,
	"----:com.apple.iTunes:ARTISTS"                   => Artists,
	"----:com.apple.iTunes:LYRICIST"                  => Lyricist,
	"----:com.apple.iTunes:CONDUCTOR"                 => Conductor,
	"----:com.apple.iTunes:REMIXER"                   => Remixer,
	"----:com.apple.iTunes:ENGINEER"                  => Engineer,
	"----:com.apple.iTunes:PRODUCER"                  => Producer,
	"----:com.apple.iTunes:DJMIXER"                   => DjMixer,
	"----:com.apple.iTunes:MIXER"                     => Mixer,
	"----:com.apple.iTunes:LABEL"                     => Label,
	"----:com.apple.iTunes:SUBTITLE"                  => Subtitle,
	"----:com.apple.iTunes:DISCSUBTITLE"              => DiscSubtitle,
	"----:com.apple.iTunes:MOOD"                      => Mood,
	"----:com.apple.iTunes:MEDIA"                     => Media,
	"----:com.apple.iTunes:CATALOGNUMBER"             => CatalogNumber,
	"----:com.apple.iTunes:MusicBrainz Album Status"  => ReleaseStatus,
	"----:com.apple.iTunes:MusicBrainz Album Type"    => ReleaseType,
	"----:com.apple.iTunes:MusicBrainz Album Release Country" => ReleaseCountry,
	"----:com.apple.iTunes:SCRIPT"                    => Script,
	"----:com.apple.iTunes:LANGUAGE"                  => Language,
	"----:com.apple.iTunes:LICENSE"                   => License,
	"----:com.apple.iTunes:BARCODE"                   => Barcode,
	"----:com.apple.iTunes:ISRC"                      => Isrc,
	"----:com.apple.iTunes:ASIN"                      => Asin,
	"----:com.apple.iTunes:ORIGINALDATE"              => OriginalDate,
	"----:com.apple.iTunes:MusicBrainz Track Id"      => MusicBrainzRecordingId,
	"----:com.apple.iTunes:MusicBrainz Release Track Id" => MusicBrainzTrackId,
	"----:com.apple.iTunes:MusicBrainz Album Id"      => MusicBrainzAlbumId,
	"----:com.apple.iTunes:MusicBrainz Artist Id"     => MusicBrainzArtistId,
	"----:com.apple.iTunes:MusicBrainz Album Artist Id" => MusicBrainzAlbumArtistId,
	"----:com.apple.iTunes:MusicBrainz Release Group Id" => MusicBrainzReleaseGroupId,
	"----:com.apple.iTunes:MusicBrainz Work Id"       => MusicBrainzWorkId,
	"----:com.apple.iTunes:MusicBrainz TRM Id"        => MusicBrainzTrmId,
	"----:com.apple.iTunes:MusicBrainz Disc Id"       => MusicBrainzDiscId,
	"----:com.apple.iTunes:Acoustid Id"               => AcoustIdId,
	"----:com.apple.iTunes:Acoustid Fingerprint"      => AcoustIdFingerprint,
	"----:com.apple.iTunes:MusicIP PUID"              => MusicIpPuid,
	"----:com.apple.iTunes:fingerprint"               => MusicIpFingerprint,
	"----:com.apple.iTunes:initialkey"                => Key,
	"----:com.apple.iTunes:replaygain_track_gain"     => ReplayGainTrackGain,
	"----:com.apple.iTunes:replaygain_track_peak"     => ReplayGainTrackPeak,
	"----:com.apple.iTunes:replaygain_album_gain"     => ReplayGainAlbumGain,
	"----:com.apple.iTunes:replaygain_album_peak"     => ReplayGainAlbumPeak
);

gen_map!(
	VORBIS_MAP;

	"TITLE"                      => Title,
	"ARTIST"                     => Artist,
	"ARTISTS"                    => Artists,
	"ALBUMARTIST"                => AlbumArtist,
	"ALBUM"                      => Album,
	"DATE"                       => Date,
	"ORIGINALDATE"               => OriginalDate,
	"ORIGINALYEAR"               => OriginalYear,
	"COMMENT"                    => Comment,
	"DESCRIPTION"                => Description,
	"TRACKNUMBER"                => Track,
	"DISCNUMBER"                 => Disk,
	"GENRE"                      => Genre,
	"METADATA_BLOCK_PICTURE"     => Picture,
	"COMPOSER"                   => Composer,
	"LYRICS"                     => Lyrics,
	"ALBUMSORT"                  => AlbumSort,
	"TITLESORT"                  => TitleSort,
	"WORK"                       => Work,
	"ARTISTSORT"                 => ArtistSort,
	"ALBUMARTISTSORT"            => AlbumArtistSort,
	"COMPOSERSORT"               => ComposerSort,
	"LYRICIST"                   => Lyricist,
	"WRITER"                     => Writer,
	"CONDUCTOR"                  => Conductor,
	"REMIXER"                    => Remixer,
	"ARRANGER"                   => Arranger,
	"ENGINEER"                   => Engineer,
	"PRODUCER"                   => Producer,
	"DJMIXER"                    => DjMixer,
	"MIXER"                      => Mixer,
	"LABEL" | "ORGANIZATION"     => Label,
	"GROUPING"                   => Grouping,
	"SUBTITLE"                   => Subtitle,
	"DISCSUBTITLE"               => DiscSubtitle,
	"COMPILATION"                => Compilation,
	"RATING"                     => Rating,
	"BPM"                        => Bpm,
	"KEY"                        => Key,
	"MOOD"                       => Mood,
	"MEDIA"                      => Media,
	"CATALOGNUMBER"              => CatalogNumber,
	"RELEASESTATUS"              => ReleaseStatus,
	"RELEASETYPE"                => ReleaseType,
	"RELEASECOUNTRY"             => ReleaseCountry,
	"SCRIPT"                     => Script,
	"LANGUAGE"                   => Language,
	"COPYRIGHT"                  => Copyright,
	"LICENSE"                    => License,
	"ENCODEDBY"                  => EncodedBy,
	"ENCODERSETTINGS"            => EncoderSettings,
	"BARCODE"                    => Barcode,
	"ISRC"                       => Isrc,
	"ASIN"                       => Asin,
	"MUSICBRAINZ_TRACKID"        => MusicBrainzRecordingId,
	"MUSICBRAINZ_RELEASETRACKID" => MusicBrainzTrackId,
	"MUSICBRAINZ_ALBUMID"        => MusicBrainzAlbumId,
	"MUSICBRAINZ_ARTISTID"       => MusicBrainzArtistId,
	"MUSICBRAINZ_ALBUMARTISTID"  => MusicBrainzAlbumArtistId,
	"MUSICBRAINZ_RELEASEGROUPID" => MusicBrainzReleaseGroupId,
	"MUSICBRAINZ_WORKID"         => MusicBrainzWorkId,
	"MUSICBRAINZ_TRMID"          => MusicBrainzTrmId,
	"MUSICBRAINZ_DISCID"         => MusicBrainzDiscId,
	"ACOUSTID_ID"                => AcoustIdId,
	"ACOUSTID_FINGERPRINT"       => AcoustIdFingerprint,
	"MUSICIP_PUID"               => MusicIpPuid,
	"FINGERPRINT"                => MusicIpFingerprint,
	"WEBSITE"                    => Website,
	"ORIGINALALBUM"              => OriginalAlbum,
	"ORIGINALARTIST"             => OriginalArtist,
	"REPLAYGAIN_TRACK_GAIN"      => ReplayGainTrackGain,
	"REPLAYGAIN_TRACK_PEAK"      => ReplayGainTrackPeak,
	"REPLAYGAIN_ALBUM_GAIN"      => ReplayGainAlbumGain,
	"REPLAYGAIN_ALBUM_PEAK"      => ReplayGainAlbumPeak
);

gen_map!(
	APE_MAP;

	"Title"                         => Title,
	"Artist"                        => Artist,
	"Artists"                       => Artists,
	"Album Artist" | "AlbumArtist"  => AlbumArtist,
	"Album"                         => Album,
	"Year"                          => Date,
	"Originalyear"                  => OriginalYear,
	"Originaldate"                  => OriginalDate,
	"Comment"                       => Comment,
	"Track"                         => Track,
	"Disc"                          => Disk,
	"Genre"                         => Genre,
	"Composer"                      => Composer,
	"Lyrics"                        => Lyrics,
	"AlbumSort"                     => AlbumSort,
	"TitleSort"                     => TitleSort,
	"ArtistSort"                    => ArtistSort,
	"AlbumArtistSort"               => AlbumArtistSort,
	"ComposerSort"                  => ComposerSort,
	"Lyricist"                      => Lyricist,
	"Writer"                        => Writer,
	"Conductor"                     => Conductor,
	"MixArtist"                     => Remixer,
	"Arranger"                      => Arranger,
	"Engineer"                      => Engineer,
	"Producer"                      => Producer,
	"DJMixer"                       => DjMixer,
	"Mixer"                         => Mixer,
	"Label"                         => Label,
	"Grouping"                      => Grouping,
	"Subtitle"                      => Subtitle,
	"DiscSubtitle"                  => DiscSubtitle,
	"Compilation"                   => Compilation,
	"BPM"                           => Bpm,
	"Mood"                          => Mood,
	"Media"                         => Media,
	"CatalogNumber"                 => CatalogNumber,
	"MUSICBRAINZ_ALBUMSTATUS"       => ReleaseStatus,
	"MUSICBRAINZ_ALBUMTYPE"         => ReleaseType,
	"RELEASECOUNTRY"                => ReleaseCountry,
	"Script"                        => Script,
	"Language"                      => Language,
	"Copyright"                     => Copyright,
	"LICENSE"                       => License,
	"EncodedBy"                     => EncodedBy,
	"EncoderSettings"               => EncoderSettings,
	"Barcode"                       => Barcode,
	"ISRC"                          => Isrc,
	"ASIN"                          => Asin,
	"musicbrainz_trackid"           => MusicBrainzRecordingId,
	"musicbrainz_releasetrackid"    => MusicBrainzTrackId,
	"MUSICBRAINZ_ALBUMID"           => MusicBrainzAlbumId,
	"MUSICBRAINZ_ARTISTID"          => MusicBrainzArtistId,
	"MUSICBRAINZ_ALBUMARTISTID"     => MusicBrainzAlbumArtistId,
	"MUSICBRAINZ_RELEASEGROUPID"    => MusicBrainzReleaseGroupId,
	"MUSICBRAINZ_WORKID"            => MusicBrainzWorkId,
	"MUSICBRAINZ_TRMID"             => MusicBrainzTrmId,
	"MUSICBRAINZ_DISCID"            => MusicBrainzDiscId,
	"ACOUSTID_ID"                   => AcoustIdId,
	"ACOUSTID_FINGERPRINT"          => AcoustIdFingerprint,
	"MUSICIP_PUID"                  => MusicIpPuid,
	"Weblink"                       => Website,
	"Key"                           => Key,
	"REPLAYGAIN_TRACK_GAIN"         => ReplayGainTrackGain,
	"REPLAYGAIN_TRACK_PEAK"         => ReplayGainTrackPeak,
	"REPLAYGAIN_ALBUM_GAIN"         => ReplayGainAlbumGain,
	"REPLAYGAIN_ALBUM_PEAK"         => ReplayGainAlbumPeak
);

gen_map!(
	ASF_MAP;

	"Title"                                => Title,
	"Author"                               => Artist,
	"WM/ARTISTS"                           => Artists,
	"WM/AlbumArtist"                       => AlbumArtist,
	"WM/AlbumTitle"                        => Album,
	"WM/Year"                              => Date,
	"WM/OriginalReleaseTime"               => OriginalDate,
	"WM/OriginalReleaseYear"               => OriginalYear,
	"Description"                          => Comment,
	"WM/TrackNumber"                       => Track,
	"WM/PartOfSet"                         => Disk,
	"WM/Genre"                             => Genre,
	"WM/Picture"                           => Picture,
	"WM/Composer"                          => Composer,
	"WM/Lyrics"                            => Lyrics,
	"WM/AlbumSortOrder"                    => AlbumSort,
	"WM/TitleSortOrder"                    => TitleSort,
	"WM/ArtistSortOrder"                   => ArtistSort,
	"WM/AlbumArtistSortOrder"              => AlbumArtistSort,
	"WM/ComposerSortOrder"                 => ComposerSort,
	"WM/Work"                              => Work,
	"WM/Writer"                            => Lyricist,
	"WM/Conductor"                         => Conductor,
	"WM/ModifiedBy"                        => Remixer,
	"WM/Engineer"                          => Engineer,
	"WM/Producer"                          => Producer,
	"WM/DJMixer"                           => DjMixer,
	"WM/Mixer"                             => Mixer,
	"WM/Publisher"                         => Label,
	"WM/ContentGroupDescription"           => Grouping,
	"WM/SubTitle"                          => Subtitle,
	"WM/SetSubTitle"                       => DiscSubtitle,
	"WM/IsCompilation"                     => Compilation,
	"WM/SharedUserRating"                  => Rating,
	"WM/BeatsPerMinute"                    => Bpm,
	"WM/InitialKey"                        => Key,
	"WM/Mood"                              => Mood,
	"WM/Media"                             => Media,
	"WM/CatalogNo"                         => CatalogNumber,
	"MusicBrainz/Album Status"             => ReleaseStatus,
	"MusicBrainz/Album Type"               => ReleaseType,
	"MusicBrainz/Album Release Country"    => ReleaseCountry,
	"WM/Script"                            => Script,
	"WM/Language"                          => Language,
	"Copyright"                            => Copyright,
	"WM/EncodedBy"                         => EncodedBy,
	"WM/EncodingSettings"                  => EncoderSettings,
	"WM/Barcode"                           => Barcode,
	"WM/ISRC"                              => Isrc,
	"ASIN"                                 => Asin,
	"MusicBrainz/Track Id"                 => MusicBrainzRecordingId,
	"MusicBrainz/Release Track Id"         => MusicBrainzTrackId,
	"MusicBrainz/Album Id"                 => MusicBrainzAlbumId,
	"MusicBrainz/Artist Id"                => MusicBrainzArtistId,
	"MusicBrainz/Album Artist Id"          => MusicBrainzAlbumArtistId,
	"MusicBrainz/Release Group Id"         => MusicBrainzReleaseGroupId,
	"MusicBrainz/Work Id"                  => MusicBrainzWorkId,
	"MusicBrainz/TRM Id"                   => MusicBrainzTrmId,
	"MusicBrainz/Disc Id"                  => MusicBrainzDiscId,
	"Acoustid/Id"                          => AcoustIdId,
	"Acoustid/Fingerprint"                 => AcoustIdFingerprint,
	"MusicIP/PUID"                         => MusicIpPuid,
	"WM/AuthorURL"                         => Website,
	"REPLAYGAIN_TRACK_GAIN"                => ReplayGainTrackGain,
	"REPLAYGAIN_TRACK_PEAK"                => ReplayGainTrackPeak,
	"REPLAYGAIN_ALBUM_GAIN"                => ReplayGainAlbumGain,
	"REPLAYGAIN_ALBUM_PEAK"                => ReplayGainAlbumPeak
);

gen_map!(
	RIFF_INFO_MAP;

	"INAM"          => Title,
	"IART"          => Artist,
	"IPRD"          => Album,
	"ICRD"          => Date,
	"ICMT"          => Comment,
	"ITRK" | "IPRT" => Track,
	"IGNR"          => Genre,
	"ICOP"          => Copyright,
	"IENG"          => Engineer,
	"ITCH"          => Technician,
	"ISFT"          => EncoderSettings,
	"IWRI"          => Writer,
	"IMUS"          => Composer,
	"IPRO"          => Producer,
	"ILNG"          => Language,
	"IBPM"          => Bpm,
	"IRTD"          => Rating,
	"IENC"          => EncodedBy,
	"ISRF"          => Media
);

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn lookups_ignore_case() {
		assert_eq!(VORBIS_MAP.get_common_key("title"), Some(CommonKey::Title));
		assert_eq!(VORBIS_MAP.get_common_key("Title"), Some(CommonKey::Title));
		assert_eq!(
			ID3V2_4_MAP.get_common_key("TXXX:musicbrainz album id"),
			Some(CommonKey::MusicBrainzAlbumId)
		);
		assert_eq!(ID3V2_4_MAP.get_common_key("TXXX:unknown"), None);
	}

	#[test_log::test]
	fn no_case_insensitive_collisions() {
		let tables: [&[(&str, CommonKey)]; 8] = [
			ID3V1_MAP_ENTRIES,
			ID3V2_2_MAP_ENTRIES,
			ID3V2_4_MAP_ENTRIES,
			MP4_MAP_ENTRIES,
			VORBIS_MAP_ENTRIES,
			APE_MAP_ENTRIES,
			ASF_MAP_ENTRIES,
			RIFF_INFO_MAP_ENTRIES,
		];

		for table in tables {
			for (i, (key, value)) in table.iter().enumerate() {
				for (other_key, other_value) in &table[i + 1..] {
					if key.eq_ignore_ascii_case(other_key) {
						assert_eq!(value, other_value, "'{key}' and '{other_key}' collide");
					}
				}
			}
		}
	}
}
