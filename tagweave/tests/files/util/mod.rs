//! In-memory fixture builders
//!
//! Every file is synthesized, byte by byte, with just enough structure for the built-in parsers.

use std::io::{Seek as _, Write as _};

use tempfile::NamedTempFile;

/// 128 kbps, 44.1 kHz, joint stereo, 417 bytes per frame
pub const MPEG_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

pub fn synchsafe(size: u32) -> [u8; 4] {
	[
		((size >> 21) & 0x7F) as u8,
		((size >> 14) & 0x7F) as u8,
		((size >> 7) & 0x7F) as u8,
		(size & 0x7F) as u8,
	]
}

/// An ID3v2.4 tag holding the given frames
pub fn id3v24_tag(frames: &[(&str, Vec<u8>)]) -> Vec<u8> {
	let mut body = Vec::new();
	for (id, content) in frames {
		body.extend(id.as_bytes());
		body.extend(synchsafe(content.len() as u32));
		body.extend([0, 0]);
		body.extend(content);
	}

	let mut tag = b"ID3\x04\x00\x00".to_vec();
	tag.extend(synchsafe(body.len() as u32));
	tag.extend(body);
	tag
}

/// An ID3v2.3 tag holding the given frames
pub fn id3v23_tag(frames: &[(&str, Vec<u8>)]) -> Vec<u8> {
	let mut body = Vec::new();
	for (id, content) in frames {
		body.extend(id.as_bytes());
		body.extend((content.len() as u32).to_be_bytes());
		body.extend([0, 0]);
		body.extend(content);
	}

	let mut tag = b"ID3\x03\x00\x00".to_vec();
	tag.extend(synchsafe(body.len() as u32));
	tag.extend(body);
	tag
}

/// The body of a UTF-8 text frame, multiple values are NUL separated
pub fn utf8_text(values: &[&str]) -> Vec<u8> {
	let mut content = vec![3];
	content.extend(values.join("\0").as_bytes());
	content
}

/// The body of a Latin-1 text frame
pub fn latin1_text(value: &str) -> Vec<u8> {
	let mut content = vec![0];
	content.extend(value.as_bytes());
	content
}

/// The body of a `TXXX` frame
pub fn user_text(description: &str, value: &str) -> Vec<u8> {
	let mut content = vec![3];
	content.extend(description.as_bytes());
	content.push(0);
	content.extend(value.as_bytes());
	content
}

/// The body of a `POPM` frame
pub fn popularimeter(email: &str, rating: u8) -> Vec<u8> {
	let mut content = email.as_bytes().to_vec();
	content.push(0);
	content.push(rating);
	content.extend(5_u32.to_be_bytes());
	content
}

/// An ID3v1.1 tag
pub fn id3v1_tag(title: &str, artist: &str, album: &str, track: u8, genre: u8) -> Vec<u8> {
	let mut tag = vec![0; 128];
	tag[..3].copy_from_slice(b"TAG");
	tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
	tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
	tag[63..63 + album.len()].copy_from_slice(album.as_bytes());
	tag[126] = track;
	tag[127] = genre;
	tag
}

/// `count` silent CBR frames
pub fn mpeg_frames(count: usize) -> Vec<u8> {
	let mut frame = MPEG_FRAME_HEADER.to_vec();
	frame.resize(417, 0);
	frame.repeat(count)
}

pub fn ape_item(key: &str, item_type: u32, value: &[u8]) -> Vec<u8> {
	let mut item = Vec::new();
	item.extend((value.len() as u32).to_le_bytes());
	item.extend((item_type << 1).to_le_bytes());
	item.extend(key.as_bytes());
	item.push(0);
	item.extend(value);
	item
}

/// An APEv2 tag with a header and a footer
pub fn ape_tag(items: &[Vec<u8>]) -> Vec<u8> {
	let items_bytes = items.concat();
	let size = items_bytes.len() as u32 + 32;

	let header_or_footer = |is_header: bool| {
		let mut bytes = b"APETAGEX".to_vec();
		bytes.extend(2000_u32.to_le_bytes());
		bytes.extend(size.to_le_bytes());
		bytes.extend((items.len() as u32).to_le_bytes());
		let flags = (1_u32 << 31) | if is_header { 1 << 29 } else { 0 };
		bytes.extend(flags.to_le_bytes());
		bytes.extend([0; 8]);
		bytes
	};

	let mut tag = header_or_footer(true);
	tag.extend(items_bytes);
	tag.extend(header_or_footer(false));
	tag
}

/// A Vorbis comment block, without signature or framing bit
pub fn vorbis_comments(vendor: &str, fields: &[&str]) -> Vec<u8> {
	let mut block = Vec::new();
	block.extend((vendor.len() as u32).to_le_bytes());
	block.extend(vendor.as_bytes());
	block.extend((fields.len() as u32).to_le_bytes());
	for field in fields {
		block.extend((field.len() as u32).to_le_bytes());
		block.extend(field.as_bytes());
	}

	block
}

fn flac_block(ty: u8, last: bool, content: &[u8]) -> Vec<u8> {
	let mut block = vec![ty | if last { 0x80 } else { 0 }];
	block.extend(&(content.len() as u32).to_be_bytes()[1..]);
	block.extend(content);
	block
}

/// A FLAC stream of 10 seconds at 44.1 kHz, 16 bit stereo, with the given comments
pub fn flac_file(comments: &[&str]) -> Vec<u8> {
	let mut stream_info = vec![0x10, 0x00, 0x10, 0x00, 0, 0, 0, 0, 0, 0];
	let packed = (44100_u64 << 44) | (1 << 41) | (15 << 36) | 441_000;
	stream_info.extend(packed.to_be_bytes());
	stream_info.extend([0; 16]);

	let mut file = b"fLaC".to_vec();
	file.extend(flac_block(0, false, &stream_info));
	file.extend(flac_block(4, true, &vorbis_comments("reference libFLAC", comments)));
	// Stand-in for audio frames
	file.extend([0xFF, 0xF8, 0x69, 0x08]);
	file.extend([0; 512]);
	file
}

fn riff_chunk(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut chunk = fourcc.to_vec();
	chunk.extend((content.len() as u32).to_le_bytes());
	chunk.extend(content);
	if content.len() % 2 == 1 {
		chunk.push(0);
	}

	chunk
}

/// A RIFF WAVE stream of one second of 16 bit stereo PCM, with a `LIST/INFO` chunk
pub fn wav_file(info: &[(&[u8; 4], &str)]) -> Vec<u8> {
	let mut fmt = Vec::new();
	fmt.extend(1_u16.to_le_bytes());
	fmt.extend(2_u16.to_le_bytes());
	fmt.extend(44100_u32.to_le_bytes());
	fmt.extend(176_400_u32.to_le_bytes());
	fmt.extend(4_u16.to_le_bytes());
	fmt.extend(16_u16.to_le_bytes());

	let mut list = b"INFO".to_vec();
	for (id, value) in info {
		let mut value = value.as_bytes().to_vec();
		value.push(0);
		list.extend(riff_chunk(id, &value));
	}

	let mut body = b"WAVE".to_vec();
	body.extend(riff_chunk(b"fmt ", &fmt));
	body.extend(riff_chunk(b"data", &vec![0; 176_400]));
	body.extend(riff_chunk(b"LIST", &list));

	riff_chunk(b"RIFF", &body)
}

/// Write `content` to a temporary file ending in `suffix`
pub fn temp_file(content: &[u8], suffix: &str) -> NamedTempFile {
	let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();
	file
}
