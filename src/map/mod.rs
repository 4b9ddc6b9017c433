//! A two-level sharded Robin-Hood hash map.
//!
//! [`HashMap`] is a fixed-width directory of [`subtable::Subtable`]s, each an
//! independently growing Robin-Hood open-addressed table built from
//! [`slot::Slot`] cells. See [`hashmap`] for the directory/routing design and
//! [`subtable`] for the probing, eviction and back-shift-deletion algorithms.

pub mod error;
pub mod hashmap;
pub mod iter;
pub mod slot;
pub mod subtable;

pub use error::MissingKeyError;
pub use hashmap::{HashMap, DIRECTORY_WIDTH};
pub use iter::MapIter;
pub use subtable::Subtable;
