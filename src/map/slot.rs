//! A single cell of a [`Subtable`](crate::map::subtable::Subtable)'s backing array.
//!
//! A slot is either empty or occupied. Occupied slots additionally carry their
//! *probe sequence length* (PSL) — the distance, in slots, between the key's
//! home index and the index the key currently occupies. Folding the occupancy
//! flag into the enum tag (rather than pairing an `Option<(K, V)>` with a
//! separate PSL field) makes "empty but claims a PSL" unrepresentable.
//!
//! Occupied slots also cache the hash digest they were placed with. A
//! standalone subtable could recompute it on demand, but a subtable owned by
//! a [`HashMap`](crate::map::hashmap::HashMap) is handed a digest that has
//! already been reduced to the high bits the directory selector didn't
//! consume (see `HashMap::route`) — recomputing it fresh from the key during
//! a later `grow` would silently rehash against the wrong bit slice. Caching
//! the digest once, at insertion time, is what lets `grow` stay correct
//! without needing to know anything about where its hash came from.

/// One cell of a subtable's flat, open-addressed array.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    /// Never held an entry, or had one removed and compacted away.
    Empty,
    /// Holds a live key/value pair at a PSL of `psl` slots from its home,
    /// placed using hash digest `hash`.
    Occupied { key: K, value: V, psl: u32, hash: u64 },
}

impl<K, V> Slot<K, V> {
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub(crate) fn key_value(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Empty => None,
            Slot::Occupied { key, value, .. } => Some((key, value)),
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Empty => None,
            Slot::Occupied { value, .. } => Some(value),
        }
    }
}
