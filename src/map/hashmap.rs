//! The two-level sharded hash map: a fixed directory of [`Subtable`]s.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::error::MissingKeyError;
use super::iter::MapIter;
use super::subtable::Subtable;

/// Number of subtables in the directory. Kept a compile-time constant rather
/// than a runtime parameter (see `DESIGN.md`); must be a power of two.
pub const DIRECTORY_WIDTH: usize = 8;

const DIRECTORY_SHIFT: u32 = DIRECTORY_WIDTH.trailing_zeros();

/// A hash map built from a fixed-width directory of independently growing
/// [`Subtable`]s, each a Robin-Hood open-addressed table.
///
/// Every operation hashes the key exactly once. The low `log2(DIRECTORY_WIDTH)`
/// bits of that hash pick a subtable; the remaining high bits are handed to
/// the subtable as its own hash input, so the subtable's home-slot
/// distribution never correlates with the directory selector (see the
/// module doc on [`Subtable`]).
pub struct HashMap<K, V, S = RandomState> {
    subtables: Vec<Subtable<K, V, S>>,
    size: usize,
    hash_builder: S,
}

impl<K, V> HashMap<K, V, RandomState> {
    /// Creates an empty map with `DIRECTORY_WIDTH` subtables, using
    /// `RandomState` for hashing.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V> Default for HashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    S: BuildHasher + Clone,
{
    /// Creates an empty map using `hash_builder`, cloned into each subtable.
    pub fn with_hasher(hash_builder: S) -> Self {
        let subtables = (0..DIRECTORY_WIDTH)
            .map(|_| Subtable::with_hasher(hash_builder.clone()))
            .collect();
        HashMap {
            subtables,
            size: 0,
            hash_builder,
        }
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// The number of live entries across every subtable.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True iff the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The hash builder supplied at construction.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn route<Q>(&self, key: &Q) -> (usize, u64)
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        let selector = (hash as usize) & (DIRECTORY_WIDTH - 1);
        let subtable_hash = hash >> DIRECTORY_SHIFT;
        (selector, subtable_hash)
    }

    /// Inserts `(key, value)`. Returns `true` iff the key was absent and the
    /// pair was stored.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (selector, hash) = self.route(&key);
        let inserted = self.subtables[selector].insert_with_hash(hash, key, value);
        if inserted {
            self.size += 1;
        }
        inserted
    }

    /// Removes the entry for `key`. Returns `true` iff an entry was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (selector, hash) = self.route(key);
        let removed = self.subtables[selector].remove_with_hash(hash, key);
        if removed {
            self.size -= 1;
        }
        removed
    }

    /// Looks up `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (selector, hash) = self.route(key);
        self.subtables[selector].get_with_hash(hash, key)
    }

    /// Mutable lookup for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (selector, hash) = self.route(key);
        self.subtables[selector].get_mut_with_hash(hash, key)
    }

    /// True iff `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Read-only lookup that surfaces a [`MissingKeyError`] instead of
    /// `None` for an absent key.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, MissingKeyError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(MissingKeyError)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let (selector, hash) = self.route(&key);
        let (value, inserted) = self.subtables[selector].get_or_insert_default_with_hash(hash, key);
        if inserted {
            self.size += 1;
        }
        value
    }

    /// Resets the map to its freshly constructed state: every subtable
    /// empty, aggregate size zero.
    pub fn clear(&mut self) {
        for subtable in &mut self.subtables {
            subtable.clear();
        }
        self.size = 0;
    }

    /// Iterates over every entry in the map. Order is an implementation
    /// detail — neither insertion order nor key order — and may change
    /// across any operation that resizes a traversed subtable.
    pub fn iter(&self) -> MapIter<'_, K, V, S> {
        let mut subtables = self.subtables.iter();
        let current = subtables.next().map(|t| t.iter());
        MapIter {
            subtables,
            current,
        }
    }
}

impl<K, V, S> std::ops::Index<&K> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if `key` is not present, matching
    /// `std::collections::HashMap`'s `Index` impl. Never inserts — use
    /// [`get_or_insert_default`](HashMap::get_or_insert_default) for that.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not present in map")
    }
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        HashMap {
            subtables: self.subtables.clone(),
            size: self.size,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for HashMap<K, V, S>
where
    K: fmt::Debug + Hash + Eq,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashMap<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HashMap<K, V, RandomState>
where
    K: Hash + Eq,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
