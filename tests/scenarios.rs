use std::collections::HashSet;
use std::hash::{BuildHasher, Hasher};

use shardhash::map::{HashMap, MissingKeyError};

#[test]
fn s1_basic() {
    let mut m = HashMap::new();
    m.insert(1, 5);
    m.insert(3, 4);
    m.insert(2, 1);

    assert_eq!(m.len(), 3);
    assert_eq!(m.get(&3), Some(&4));
    assert_eq!(m.get(&7), None);

    let keys: HashSet<i32> = m.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, HashSet::from([1, 2, 3]));
    assert_eq!(m.iter().count(), 3);
}

#[test]
fn s2_overwrite_via_get_or_insert_default() {
    let mut m: HashMap<i32, i32> = HashMap::new();
    m.insert(3, 4);

    *m.get_or_insert_default(3) = 7;
    assert_eq!(m.get(&3), Some(&7));

    let size_before = m.len();
    assert_eq!(*m.get_or_insert_default(0), 0);
    assert_eq!(m.len(), size_before + 1);
}

/// A hasher that folds a key's bytes straight into the digest with no mixing,
/// so nearby integer keys land in nearby (or identical) home slots — the
/// adversarial-but-legal input a probe-sequence table has to tolerate.
#[derive(Clone, Default)]
struct IdentityBuildHasher;

struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | b as u64;
        }
    }
    fn write_i32(&mut self, i: i32) {
        self.0 = i as u64;
    }
}

impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;
    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher(0)
    }
}

#[test]
fn s3_erase_compaction() {
    let mut m: HashMap<i32, i32, IdentityBuildHasher> = HashMap::with_hasher(IdentityBuildHasher);
    for i in 0..=15 {
        m.insert(i, i * 10);
    }
    assert!(m.remove(&0));
    for i in 1..=15 {
        assert_eq!(m.get(&i), Some(&(i * 10)), "key {i} unreachable after erase");
    }
    assert_eq!(m.len(), 15);
}

#[test]
fn s4_failure() {
    let mut m: HashMap<i32, i32> = HashMap::new();
    m.insert(2, 20);
    m.insert(-7, -70);
    m.insert(0, 0);

    assert_eq!(m.at(&8), Err(MissingKeyError));
    assert_eq!(m.at(&2), Ok(&20));
}

#[test]
fn s5_copy_and_mutate() {
    let mut a: HashMap<i32, i32> = HashMap::new();
    a.insert(-3, 3);
    a.insert(-2, 2);
    a.insert(-1, 1);

    let mut b = a.clone();
    b.insert(0, 0);
    let c = b.clone();

    assert_eq!(b.get(&0), Some(&0));
    assert_eq!(a.get(&0), None);

    drop(b);
    drop(c);

    assert_eq!(a.len(), 3);
    assert_eq!(a.get(&-3), Some(&3));
    assert_eq!(a.get(&-2), Some(&2));
    assert_eq!(a.get(&-1), Some(&1));
}

/// A hasher that collapses every key onto the same digest, to exercise the
/// worst case a probe-sequence table can face: every entry lands in the same
/// directory slot and the same subtable home index.
#[derive(Clone, Default)]
struct ConstantBuildHasher;

struct ConstantHasher;

impl Hasher for ConstantHasher {
    fn finish(&self) -> u64 {
        0
    }
    fn write(&mut self, _bytes: &[u8]) {}
}

impl BuildHasher for ConstantBuildHasher {
    type Hasher = ConstantHasher;
    fn build_hasher(&self) -> ConstantHasher {
        ConstantHasher
    }
}

#[test]
fn s6_pathological_hash() {
    let mut m: HashMap<i32, i32, ConstantBuildHasher> = HashMap::with_hasher(ConstantBuildHasher);
    for i in 0..1000 {
        assert!(m.insert(i, i));
    }
    assert_eq!(m.len(), 1000);
    for i in 0..1000 {
        assert_eq!(m.get(&i), Some(&i));
    }
    assert_eq!(m.iter().count(), 1000);
}

#[test]
fn uniqueness_and_size_consistency_under_mixed_workload() {
    let mut m: HashMap<i32, i32> = HashMap::new();
    let mut model: HashSet<i32> = HashSet::new();

    for i in 0..500 {
        let key = i % 200;
        if i % 3 == 0 {
            m.remove(&key);
            model.remove(&key);
        } else {
            m.insert(key, key * 2);
            model.insert(key);
        }
        assert_eq!(m.len(), model.len());
        assert_eq!(m.iter().count(), model.len());
    }

    for key in &model {
        assert_eq!(m.get(key), Some(&(key * 2)));
    }
}

#[test]
fn idempotent_insert_keeps_original_value() {
    let mut m: HashMap<&str, i32> = HashMap::new();
    assert!(m.insert("a", 1));
    assert!(!m.insert("a", 2));
    assert_eq!(m.get("a"), Some(&1));
}

#[test]
fn erase_then_insert_cancels_out() {
    let mut m: HashMap<i32, i32> = HashMap::new();
    let before = m.len();
    m.insert(9, 90);
    m.remove(&9);
    assert_eq!(m.get(&9), None);
    assert_eq!(m.len(), before);
}

#[test]
fn index_operator_panics_like_std_hash_map() {
    let mut m: HashMap<&str, i32> = HashMap::new();
    m.insert("present", 1);
    assert_eq!(m[&"present"], 1);

    let caught = std::panic::catch_unwind(|| {
        let m: HashMap<&str, i32> = HashMap::new();
        m[&"absent"]
    });
    assert!(caught.is_err());
}

#[test]
fn from_and_extend_construction_surface() {
    let mut m = HashMap::from([("a", 1), ("b", 2), ("a", 99)]);
    assert_eq!(m.get("a"), Some(&1));
    assert_eq!(m.len(), 2);

    m.extend([("c", 3), ("b", 100)]);
    assert_eq!(m.get("b"), Some(&2));
    assert_eq!(m.get("c"), Some(&3));
    assert_eq!(m.len(), 3);
}

#[test]
fn grows_across_many_subtables_without_losing_entries() {
    let m: HashMap<i32, i32> = (0..5000).map(|i| (i, i * i)).collect();
    assert_eq!(m.len(), 5000);
    for i in 0..5000 {
        assert_eq!(m.get(&i), Some(&(i * i)));
    }
    assert_eq!(m.iter().count(), 5000);
}

#[test]
fn randomized_insert_remove_matches_a_reference_set() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut m: HashMap<i32, i32> = HashMap::new();
    let mut model: HashSet<i32> = HashSet::new();

    for _ in 0..20_000 {
        let key = rng.random_range(0..2_000);
        if rng.random_bool(0.5) {
            assert_eq!(m.insert(key, key * 3), model.insert(key));
        } else {
            assert_eq!(m.remove(&key), model.remove(&key));
        }
        assert_eq!(m.len(), model.len());
    }

    for key in &model {
        assert_eq!(m.get(key), Some(&(key * 3)));
    }
    assert_eq!(m.iter().count(), model.len());
}
