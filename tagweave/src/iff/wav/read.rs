use super::info::parse_riff_info;
use super::properties::read_properties;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::{Id3v2Header, parse_id3v2};
use crate::iff::chunk::Chunks;
use crate::io::{self, Tokenizer};
use crate::macros::{decode_err, err};
use crate::properties::FormatInfo;
use crate::tag::{NativeMetadata, NativeTags, TagFormat};

use std::io::SeekFrom;

use byteorder::{LittleEndian, ReadBytesExt};

// Verifies that the stream is a WAV file
fn verify_wav(data: &mut dyn Tokenizer) -> Result<()> {
	let mut id = [0; 12];
	data.read_exact(&mut id)?;

	if &id[..4] != b"RIFF" {
		decode_err!(@BAIL Riff, "WAV file doesn't contain a RIFF chunk");
	}

	if &id[8..] != b"WAVE" {
		decode_err!(@BAIL Riff, "Found RIFF file, format is not WAVE");
	}

	log::debug!("RIFF: File verified to be WAV");
	Ok(())
}

/// Read a RIFF WAVE stream
pub(crate) fn read_from(data: &mut dyn Tokenizer, options: &ParseOptions) -> Result<NativeMetadata> {
	data.rewind()?;
	verify_wav(data)?;

	let current_pos = data.stream_position()?;
	let file_len = io::stream_len(data)?;

	let mut stream_len = 0_u32;
	let mut total_samples = 0_u32;
	let mut fmt = Vec::new();

	let mut native = NativeTags::new();
	let mut riff_info = Vec::new();

	let mut chunks = Chunks::<LittleEndian>::new(file_len - current_pos);

	while let Ok(true) = chunks.next(data) {
		match &chunks.fourcc {
			b"fmt " => {
				if fmt.is_empty() {
					fmt = chunks.content(data)?;
				} else {
					chunks.skip(data)?;
				}
			},
			b"fact" => {
				if total_samples == 0 && chunks.size >= 4 {
					total_samples = data.read_u32::<LittleEndian>()?;
					data.seek(SeekFrom::Current(-4))?;
				}

				chunks.skip(data)?;
			},
			b"data" => {
				if stream_len == 0 {
					stream_len = chunks.size;
				}

				chunks.skip(data)?;
			},
			b"LIST" => {
				let size = chunks.size;
				if size < 4 {
					decode_err!(@BAIL Riff, "Invalid LIST chunk size");
				}

				let mut list_type = [0; 4];
				data.read_exact(&mut list_type)?;

				if &list_type == b"INFO" {
					let end = data.stream_position()? + u64::from(size - 4);
					if end > file_len {
						err!(SizeMismatch);
					}

					chunks.consume(4);
					parse_riff_info(data, &mut chunks, end, &mut riff_info)?;

					// Item padding may not add up to the LIST size
					data.seek(SeekFrom::Start(end))?;
					if size % 2 != 0 {
						data.seek(SeekFrom::Current(1))?;
						chunks.consume(1);
					}
				} else {
					data.seek(SeekFrom::Current(-4))?;
					chunks.skip(data)?;
				}
			},
			b"ID3 " | b"id3 " => {
				let content = chunks.content(data)?;
				let reader = &mut &content[..];

				let header = Id3v2Header::parse(reader)?;
				let Some(body) = reader.get(..header.size as usize) else {
					decode_err!(@BAIL Riff, "ID3v2 chunk is smaller than its tag");
				};

				// Duplicate tags have their frames appended to the previous one
				let tags = parse_id3v2(body, header, options.skip_covers)?;
				native.extend(header.version.tag_format(), tags);
			},
			_ => chunks.skip(data)?,
		}
	}

	if !riff_info.is_empty() {
		native.extend(TagFormat::Exif, riff_info);
	}

	let mut format = FormatInfo::with_container("WAVE");

	if stream_len == 0 {
		log::warn!("RIFF: File does not contain a \"data\" chunk");
	}

	read_properties(&fmt, total_samples, stream_len, &mut format)?;

	Ok(NativeMetadata { format, native })
}

#[cfg(test)]
mod tests {
	use super::read_from;
	use crate::config::ParseOptions;
	use crate::tag::TagFormat;

	use std::io::Cursor;
	use std::time::Duration;

	fn chunk(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
		let mut chunk = fourcc.to_vec();
		chunk.extend((content.len() as u32).to_le_bytes());
		chunk.extend(content);
		if content.len() % 2 != 0 {
			chunk.push(0);
		}

		chunk
	}

	fn wav_file() -> Vec<u8> {
		let mut fmt = Vec::new();
		fmt.extend(1_u16.to_le_bytes());
		fmt.extend(1_u16.to_le_bytes());
		fmt.extend(8000_u32.to_le_bytes());
		fmt.extend(16000_u32.to_le_bytes());
		fmt.extend(2_u16.to_le_bytes());
		fmt.extend(16_u16.to_le_bytes());

		let mut info = b"INFO".to_vec();
		info.extend(chunk(b"INAM", b"Title\0"));
		info.extend(chunk(b"IART", b"Art\0"));

		let mut id3 = b"ID3\x04\x00\x00\x00\x00\x00\x0B".to_vec();
		id3.extend(b"TALB\x00\x00\x00\x01\x00\x00\x03");

		let mut body = b"WAVE".to_vec();
		body.extend(chunk(b"fmt ", &fmt));
		body.extend(chunk(b"LIST", &info));
		body.extend(chunk(b"data", &[0; 32000]));
		body.extend(chunk(b"id3 ", &id3));

		let mut data = b"RIFF".to_vec();
		data.extend((body.len() as u32).to_le_bytes());
		data.extend(body);
		data
	}

	#[test_log::test]
	fn info_and_id3() {
		let metadata = read_from(&mut Cursor::new(wav_file()), &ParseOptions::new()).unwrap();

		assert_eq!(metadata.format.container.as_deref(), Some("WAVE"));
		assert_eq!(metadata.format.channels, Some(1));
		assert_eq!(metadata.format.duration, Some(Duration::from_secs(2)));

		let info = metadata.native.get(TagFormat::Exif).unwrap();
		assert_eq!(info.len(), 2);
		assert_eq!(info[0].value.text(), Some("Title"));

		assert!(metadata.native.contains(TagFormat::Id3v24));
	}

	#[test_log::test]
	fn not_wave() {
		let data = b"RIFF\x04\x00\x00\x00AVI ".to_vec();
		assert!(read_from(&mut Cursor::new(data), &ParseOptions::new()).is_err());
	}
}
