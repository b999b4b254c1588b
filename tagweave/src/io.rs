//! Byte sources that can be parsed
//!
//! Everything tagweave reads goes through a [`Tokenizer`], a [`Read`] + [`Seek`] source that can
//! also peek ahead without consuming bytes and may know its own length and content type.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};

/// A readable, peekable byte source
///
/// The provided methods are enough for most sources. Sources that know more about themselves,
/// such as a response body with a `Content-Type` header, can override [`Tokenizer::file_size`]
/// and [`Tokenizer::content_type`], or be wrapped in a [`ReaderTokenizer`].
pub trait Tokenizer: Read + Seek {
	/// The total length of the source, if known without reading it
	fn file_size(&self) -> Option<u64> {
		None
	}

	/// The content type declared by the source itself, if any
	fn content_type(&self) -> Option<&str> {
		None
	}

	/// Fill as much of `buf` as possible without advancing the read position
	///
	/// Returns the number of bytes peeked, which is only less than `buf.len()` when the source
	/// ends early. The stream position is restored on every path, including errors.
	///
	/// # Errors
	///
	/// * The source fails to read or seek
	fn peek(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let start = self.stream_position()?;

		let mut filled = 0;
		let read_result = loop {
			if filled == buf.len() {
				break Ok(filled);
			}

			match self.read(&mut buf[filled..]) {
				Ok(0) => break Ok(filled),
				Ok(n) => filled += n,
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {},
				Err(e) => break Err(e),
			}
		};

		self.seek(SeekFrom::Start(start))?;
		read_result
	}
}

impl Tokenizer for File {
	fn file_size(&self) -> Option<u64> {
		self.metadata().ok().map(|m| m.len())
	}
}

impl Tokenizer for BufReader<File> {
	fn file_size(&self) -> Option<u64> {
		self.get_ref().metadata().ok().map(|m| m.len())
	}
}

impl<T: AsRef<[u8]>> Tokenizer for Cursor<T> {
	fn file_size(&self) -> Option<u64> {
		Some(self.get_ref().as_ref().len() as u64)
	}
}

/// Adapts any [`Read`] + [`Seek`] source into a [`Tokenizer`]
///
/// This is the place to attach information that came from outside the stream, such as the
/// `Content-Length` and `Content-Type` of an HTTP response.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tagweave::io::{ReaderTokenizer, Tokenizer};
///
/// let body = Cursor::new(vec![0; 16]);
/// let tokenizer = ReaderTokenizer::new(body)
/// 	.with_file_size(16)
/// 	.with_content_type("audio/flac");
///
/// assert_eq!(tokenizer.content_type(), Some("audio/flac"));
/// ```
#[derive(Debug)]
pub struct ReaderTokenizer<R> {
	inner: R,
	file_size: Option<u64>,
	content_type: Option<String>,
}

impl<R: Read + Seek> ReaderTokenizer<R> {
	/// Wrap a reader with nothing known about it
	pub fn new(inner: R) -> Self {
		Self {
			inner,
			file_size: None,
			content_type: None,
		}
	}

	/// Declare the total length of the source
	#[must_use]
	pub fn with_file_size(mut self, file_size: u64) -> Self {
		self.file_size = Some(file_size);
		self
	}

	/// Declare the content type of the source
	#[must_use]
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	/// Consume the tokenizer, returning the wrapped reader
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> Read for ReaderTokenizer<R> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		self.inner.read(buf)
	}
}

impl<R: Seek> Seek for ReaderTokenizer<R> {
	fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
		self.inner.seek(pos)
	}
}

impl<R: Read + Seek> Tokenizer for ReaderTokenizer<R> {
	fn file_size(&self) -> Option<u64> {
		self.file_size
	}

	fn content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}
}

/// Determine the length of a tokenizer, seeking to the end if it doesn't know
pub(crate) fn stream_len(tokenizer: &mut dyn Tokenizer) -> std::io::Result<u64> {
	if let Some(len) = tokenizer.file_size() {
		return Ok(len);
	}

	let current = tokenizer.stream_position()?;
	let len = tokenizer.seek(SeekFrom::End(0))?;
	tokenizer.seek(SeekFrom::Start(current))?;

	Ok(len)
}

#[cfg(test)]
mod tests {
	use super::{ReaderTokenizer, Tokenizer};

	use std::io::{Cursor, Read, Seek, SeekFrom};

	#[test_log::test]
	fn peek_does_not_consume() {
		let mut cursor = Cursor::new(b"fLaC\0\0\0\x22".to_vec());
		cursor.seek(SeekFrom::Start(1)).unwrap();

		let mut buf = [0; 3];
		assert_eq!(cursor.peek(&mut buf).unwrap(), 3);
		assert_eq!(&buf, b"LaC");
		assert_eq!(cursor.stream_position().unwrap(), 1);

		let mut read = [0; 3];
		cursor.read_exact(&mut read).unwrap();
		assert_eq!(read, buf);
	}

	#[test_log::test]
	fn peek_short_source() {
		let mut cursor = Cursor::new(b"ID3".to_vec());

		let mut buf = [0; 10];
		assert_eq!(cursor.peek(&mut buf).unwrap(), 3);
		assert_eq!(cursor.stream_position().unwrap(), 0);
	}

	#[test_log::test]
	fn reader_tokenizer_declarations() {
		let tokenizer = ReaderTokenizer::new(Cursor::new(Vec::<u8>::new()));
		assert_eq!(tokenizer.file_size(), None);
		assert_eq!(tokenizer.content_type(), None);

		let tokenizer = tokenizer.with_file_size(42).with_content_type("audio/mpeg");
		assert_eq!(tokenizer.file_size(), Some(42));
		assert_eq!(tokenizer.content_type(), Some("audio/mpeg"));
	}
}
