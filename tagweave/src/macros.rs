macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(MetadataError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(MetadataError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(MetadataError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::MetadataError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::MetadataError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FileDecodingError::new(ParserId::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($parser:ident, $reason:literal) => {
		Into::<crate::error::MetadataError>::into(crate::error::FileDecodingError::new(
			crate::resolve::ParserId::$parser,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::MetadataError>::into(
			crate::error::FileDecodingError::from_description($reason),
		)
	};
	(@BAIL $($parser:ident,)? $reason:literal) => {
		return Err(decode_err!($($parser,)? $reason))
	};
}

pub(crate) use {decode_err, err, try_vec};
