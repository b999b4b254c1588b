use super::properties::{read_mac_properties, read_wavpack_properties};
use super::tag::find_ape_tag_before;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::parse_id3v1;
use crate::id3::v2::parse_id3v2;
use crate::id3::{ID3FindResults, find_id3v1, find_id3v2, find_lyrics3v2};
use crate::io::Tokenizer;
use crate::macros::decode_err;
use crate::properties::FormatInfo;
use crate::tag::{NativeMetadata, NativeTags, TagFormat};

use std::io::SeekFrom;

/// Read a Monkey's Audio or WavPack stream
pub(crate) fn read_from(reader: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
	let mut native = NativeTags::new();

	reader.rewind()?;

	// ID3v2 tags are not part of either format, but still show up
	if let ID3FindResults(Some(header), Some(content)) = find_id3v2(reader, true)? {
		log::warn!("APE: Encountered an ID3v2 tag");

		let tags = parse_id3v2(&content, header, options.skip_covers)?;
		native.extend(header.version.tag_format(), tags);
	}

	let mut magic = [0; 4];
	reader.read_exact(&mut magic)?;

	let format = match &magic {
		b"MAC " => {
			let mut format = FormatInfo::with_container("Monkey's Audio");
			read_mac_properties(reader, &mut format)?;
			format
		},
		b"wvpk" => {
			reader.seek(SeekFrom::Current(-4))?;

			let mut format = FormatInfo::with_container("WavPack");
			read_wavpack_properties(reader, &mut format)?;
			format
		},
		_ => decode_err!(@BAIL Apev2, "Invalid data found while reading header, expected any of [\"MAC \", \"wvpk\", \"ID3\"]"),
	};

	reader.seek(SeekFrom::End(0))?;

	let ID3FindResults(_, id3v1) = find_id3v1(reader)?;
	find_lyrics3v2(reader)?;

	if let Some(ape) = find_ape_tag_before(reader, options.skip_covers)? {
		native.extend(TagFormat::Apev2, ape);
	}

	if let Some(id3v1) = id3v1 {
		native.extend(TagFormat::Id3v1, parse_id3v1(id3v1));
	}

	Ok(NativeMetadata { format, native })
}
