//! The single typed failure the core surfaces.

/// Returned by [`Subtable::at`](crate::map::subtable::Subtable::at) and
/// [`HashMap::at`](crate::map::hashmap::HashMap::at) when the requested key is
/// not present.
///
/// This is the only explicit failure the core raises. Allocation failure
/// during growth is not wrapped here — it aborts the process like any other
/// Rust collection's allocation failure would.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("key not present in map")]
pub struct MissingKeyError;
