/*! A single Robin-Hood, open-addressed hash table.

This is the structure a [`HashMap`](crate::map::hashmap::HashMap) shards
its entries across. On its own it behaves like any flat hash table: a
`Vec<Slot<K, V>>` of power-of-two length, collisions resolved by linear
probing with Robin-Hood displacement, deletions compacted by back-shifting.

# Design

Insertion walks forward from a key's home slot, keeping a running candidate
PSL. Whenever the resident at the current index has a *strictly smaller* PSL
than the candidate, the resident is evicted (it becomes the new candidate,
with its PSL bumped by one) and the incoming payload takes its place. Ties
keep the resident — the newcomer just keeps walking. This is what keeps PSLs
bounded and the table fast to search: probe distances equalize across
entries instead of piling up behind one unlucky key.

Deletion is the mirror image: after the target slot is cleared, every
subsequent entry that is still displaced (PSL > 0) is shifted back one slot
and has its PSL decremented, until a slot with PSL 0 or an empty slot is
reached. Skipping this step would leave later entries unreachable, since a
lookup stops the moment it sees a PSL smaller than its own walk distance.

# Hashing

A [`Subtable`] does not know it is being sharded. It reduces whatever `u64`
it is given against its own capacity and otherwise behaves like a
self-contained map. The `*_with_hash` methods accept a precomputed digest
(used by [`HashMap`](crate::map::hashmap::HashMap), which hashes a key once
and forwards the result to the subtable it selects); the plain methods
compute the digest themselves via the subtable's own `BuildHasher`, for
standalone use and for this module's own unit tests.

# Growth timing

The load-factor check is evaluated against the *predicted* size
(`size + 1`) before a new entry is placed, not after, unlike the
post-insertion phrasing one might expect from a literal "grow once you've
crossed the threshold" rule. The two orderings are observably identical —
growth doesn't care whether the triggering key has already been written to
a slot, only how many live entries the table is about to hold — and
checking first means `get_or_insert_default_with_hash` can return a `&mut V`
into the final, post-growth array instead of one invalidated by a resize
that happens after the reference is handed out.
*/

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use super::error::MissingKeyError;
use super::iter::SubtableIter;
use super::slot::Slot;

/// Initial (and minimum) capacity of a freshly constructed subtable.
pub(crate) const INITIAL_CAPACITY: usize = 8;

/// Maximum permitted `size / capacity` before a subtable grows, expressed as
/// a numerator over a power-of-two denominator to keep the check branch-free
/// integer arithmetic: `size * LOAD_FACTOR_DENOM >= capacity * LOAD_FACTOR_NUM`.
const LOAD_FACTOR_NUM: usize = 1;
const LOAD_FACTOR_DENOM: usize = 2;

/// A Robin-Hood open-addressed hash table with power-of-two capacity.
#[derive(Debug, Clone)]
pub struct Subtable<K, V, S> {
    slots: Vec<Slot<K, V>>,
    size: usize,
    hash_builder: S,
}

impl<K, V, S> Subtable<K, V, S> {
    /// Creates an empty subtable (capacity 8) using `hash_builder` for its
    /// own standalone hashing operations.
    pub fn with_hasher(hash_builder: S) -> Self {
        Subtable {
            slots: (0..INITIAL_CAPACITY).map(|_| Slot::Empty).collect(),
            size: 0,
            hash_builder,
        }
    }

    /// The number of live entries.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True iff the subtable holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The current number of slots (always a power of two).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The hash builder supplied at construction.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Resets the subtable to its freshly constructed state: capacity 8, no
    /// entries.
    pub fn clear(&mut self) {
        self.slots = (0..INITIAL_CAPACITY).map(|_| Slot::Empty).collect();
        self.size = 0;
    }

    /// Iterates over the subtable's live entries in slot order.
    pub fn iter(&self) -> SubtableIter<'_, K, V> {
        SubtableIter::new(&self.slots)
    }
}

impl<K, V, S> Subtable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn hash_of<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.hash_builder.hash_one(key)
    }

    /// Locates the home slot for a given (already-computed) hash against the
    /// current capacity. Subtables reduce whichever bit-slice of the hash the
    /// caller hands them — a standalone subtable reduces the low bits, while
    /// a [`HashMap`](crate::map::hashmap::HashMap) passes the high bits so
    /// the subtable's home slots don't correlate with the directory's
    /// selector.
    fn home(&self, hash: u64) -> usize {
        (hash as usize) & (self.slots.len() - 1)
    }

    /// Walks forward from `home`, returning the index of the occupied slot
    /// holding `key`, or `None` on a definitive miss (an empty slot, or a
    /// slot whose PSL proves the key cannot live further along).
    fn locate<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mask = self.slots.len() - 1;
        let mut idx = self.home(hash);
        let mut dist: u32 = 0;
        loop {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied { key: k, psl, .. } => {
                    if *psl < dist {
                        return None;
                    }
                    if k.borrow() == key {
                        return Some(idx);
                    }
                }
            }
            idx = (idx + 1) & mask;
            dist += 1;
        }
    }

    /// Places `key`/`value` via Robin-Hood displacement, assuming `key` is
    /// not already present and the table has enough slack to avoid looping
    /// forever. Does not touch `self.size`. Returns the index the *original*
    /// `key`/`value` pair ends up at — stable even when placing it displaces
    /// a chain of residents further down the probe sequence.
    fn place(&mut self, hash: u64, mut key: K, mut value: V) -> usize {
        let mask = self.slots.len() - 1;
        let mut idx = self.home(hash);
        let mut psl: u32 = 0;
        let mut carry_hash = hash;
        let mut placed_at: Option<usize> = None;
        loop {
            let evict =
                matches!(&self.slots[idx], Slot::Occupied { psl: resident, .. } if *resident < psl);
            if self.slots[idx].is_empty() {
                self.slots[idx] = Slot::Occupied {
                    key,
                    value,
                    psl,
                    hash: carry_hash,
                };
                return placed_at.unwrap_or(idx);
            }
            if evict {
                let incoming = Slot::Occupied {
                    key,
                    value,
                    psl,
                    hash: carry_hash,
                };
                let resident = std::mem::replace(&mut self.slots[idx], incoming);
                if placed_at.is_none() {
                    placed_at = Some(idx);
                }
                match resident {
                    Slot::Occupied {
                        key: rk,
                        value: rv,
                        psl: rpsl,
                        hash: rhash,
                    } => {
                        key = rk;
                        value = rv;
                        psl = rpsl + 1;
                        carry_hash = rhash;
                    }
                    Slot::Empty => unreachable!("checked occupied above"),
                }
            } else {
                psl += 1;
            }
            idx = (idx + 1) & mask;
        }
    }

    /// Grows the table first if inserting one more entry would meet or
    /// exceed the load factor — see the module-level note on growth timing.
    fn reserve_for_one_more(&mut self) {
        if (self.size + 1) * LOAD_FACTOR_DENOM >= self.slots.len() * LOAD_FACTOR_NUM {
            self.grow();
        }
    }

    /// Doubles capacity and reinserts every live entry, recomputing PSLs
    /// against the new capacity. The replacement array is built in full
    /// before being swapped in, so an allocation failure here (which aborts
    /// the process, as any Rust allocation failure does) can never leave the
    /// subtable half-migrated.
    fn grow(&mut self) {
        let new_capacity = self.slots.len() * 2;
        let old = std::mem::replace(
            &mut self.slots,
            (0..new_capacity).map(|_| Slot::Empty).collect(),
        );
        for slot in old {
            if let Slot::Occupied { key, value, hash, .. } = slot {
                self.place(hash, key, value);
            }
        }
    }

    /// Inserts `(key, value)` using a precomputed hash digest. Returns `true`
    /// iff the key was absent and the pair was stored; on a present key the
    /// existing value is left untouched and `false` is returned.
    pub fn insert_with_hash(&mut self, hash: u64, key: K, value: V) -> bool {
        if self.locate(hash, &key).is_some() {
            return false;
        }
        self.reserve_for_one_more();
        self.place(hash, key, value);
        self.size += 1;
        true
    }

    /// Inserts `(key, value)`, computing the hash via this subtable's own
    /// hash builder.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let hash = self.hash_of(&key);
        self.insert_with_hash(hash, key, value)
    }

    /// Removes the entry for `key` using a precomputed hash digest, applying
    /// back-shift compaction. Returns `true` iff an entry was removed.
    pub fn remove_with_hash<Q>(&mut self, hash: u64, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let Some(idx) = self.locate(hash, key) else {
            return false;
        };
        let mask = self.slots.len() - 1;
        self.slots[idx] = Slot::Empty;
        self.size -= 1;

        let mut empty = idx;
        loop {
            let next = (empty + 1) & mask;
            let shift = matches!(&self.slots[next], Slot::Occupied { psl, .. } if *psl > 0);
            if !shift {
                break;
            }
            let mut moved = std::mem::replace(&mut self.slots[next], Slot::Empty);
            if let Slot::Occupied { psl, .. } = &mut moved {
                *psl -= 1;
            }
            self.slots[empty] = moved;
            empty = next;
        }
        true
    }

    /// Removes the entry for `key`, computing the hash via this subtable's
    /// own hash builder.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        self.remove_with_hash(hash, key)
    }

    /// Looks up `key` using a precomputed hash digest.
    pub fn get_with_hash<Q>(&self, hash: u64, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let idx = self.locate(hash, key)?;
        self.slots[idx].key_value().map(|(_, v)| v)
    }

    /// Looks up `key`, computing the hash via this subtable's own hash
    /// builder.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        self.get_with_hash(hash, key)
    }

    /// Mutable lookup using a precomputed hash digest.
    pub fn get_mut_with_hash<Q>(&mut self, hash: u64, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let idx = self.locate(hash, key)?;
        self.slots[idx].value_mut()
    }

    /// Mutable lookup, computing the hash via this subtable's own hash
    /// builder.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        self.get_mut_with_hash(hash, key)
    }

    /// Read-only lookup that surfaces a [`MissingKeyError`] instead of
    /// `None` for an absent key, using a precomputed hash digest.
    pub fn at_with_hash<Q>(&self, hash: u64, key: &Q) -> Result<&V, MissingKeyError>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.get_with_hash(hash, key).ok_or(MissingKeyError)
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
    /// `V::default()` first if the key is absent, using a precomputed hash
    /// digest. The `bool` reports whether an insertion happened, so a caller
    /// sharding entries across several subtables (such as
    /// [`HashMap`](crate::map::hashmap::HashMap)) can keep its own aggregate
    /// size in sync without a second lookup.
    pub fn get_or_insert_default_with_hash(&mut self, hash: u64, key: K) -> (&mut V, bool)
    where
        V: Default,
    {
        if let Some(idx) = self.locate(hash, &key) {
            return (self.slots[idx].value_mut().expect("occupied"), false);
        }
        self.reserve_for_one_more();
        let idx = self.place(hash, key, V::default());
        self.size += 1;
        (self.slots[idx].value_mut().expect("just placed"), true)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent, computing the hash via
    /// this subtable's own hash builder.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let hash = self.hash_of(&key);
        self.get_or_insert_default_with_hash(hash, key).0
    }
}
