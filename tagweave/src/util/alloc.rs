use crate::error::Result;
use crate::macros::err;

/// The largest single allocation a parser is allowed to make for one item
///
/// Tag sizes are read straight from untrusted headers, so every buffer sized by them
/// goes through [`try_vec!`](crate::macros::try_vec).
pub(crate) const ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(element: T, expected_size: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	if expected_size > ALLOCATION_LIMIT {
		err!(TooMuchData);
	}

	Ok(vec![element; expected_size])
}
