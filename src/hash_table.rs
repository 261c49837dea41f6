//! HashTable: separate-chaining map with MAD (Multiply-Add-and-Divide)
//! compression.
//!
//! Hash codes come from a pluggable [`BuildHasher`]; MAD then maps a code to
//! a bucket as `((scale * h + shift) mod prime) mod capacity`, with `prime`
//! the smallest prime strictly greater than capacity and `scale`/`shift`
//! drawn uniformly at random. The random draw decorrelates structured hash
//! codes from bucket indices, so sequential or patterned keys do not cluster.
//!
//! Buckets are [`PositionalList`]s of entries. Growth doubles the bucket
//! array whenever an insert would push the load factor to 0.7 and rehashes
//! every live entry under freshly drawn parameters: the parameters are
//! capacity-dependent, so stale ones would misplace existing entries.

use crate::positional_list::{Position, PositionalList};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use rand::Rng;
use std::collections::hash_map::RandomState;

const DEFAULT_CAPACITY: usize = 10;
const MAX_LOAD: f64 = 0.7;

/// One key/value pair in a bucket. Entry equality is value-based: two
/// entries compare equal iff both key and value do.
#[derive(Debug, PartialEq, Eq)]
struct MapEntry<K, V> {
    key: K,
    value: V,
}

/// MAD compression parameters, redrawn on every (re)build of the bucket
/// array.
#[derive(Debug, Clone, Copy)]
struct MadParams {
    prime: u64,
    scale: u64,
    shift: u64,
}

impl MadParams {
    fn draw(capacity: usize) -> Self {
        let prime = next_prime_after(capacity as u64);
        let mut rng = rand::thread_rng();
        Self {
            prime,
            scale: rng.gen_range(1..prime),
            shift: rng.gen_range(0..prime),
        }
    }

    /// Maps a hash code to a bucket index. Widened to `u128` so
    /// `scale * h + shift` cannot overflow.
    fn compress(&self, hash: u64, capacity: usize) -> usize {
        let folded = (u128::from(self.scale) * u128::from(hash) + u128::from(self.shift))
            % u128::from(self.prime);
        (folded % capacity as u128) as usize
    }
}

/// An associative container with amortized O(1) operations under uniform
/// hashing.
pub struct HashTable<K, V, S = RandomState> {
    buckets: Vec<PositionalList<MapEntry<K, V>>>,
    size: usize,
    mad: MadParams,
    hasher: S,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a table with at least the requested capacity; requests below
    /// the default of 10 are raised to it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = capacity.max(DEFAULT_CAPACITY);
        Self {
            buckets: make_buckets(capacity),
            size: 0,
            mad: MadParams::draw(capacity),
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        self.mad.compress(self.hasher.hash_one(q), self.buckets.len())
    }

    fn position_of<Q>(bucket: &PositionalList<MapEntry<K, V>>, q: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        bucket.positions().find(|&p| {
            bucket
                .get(p)
                .map(|entry| entry.key.borrow() == q)
                .unwrap_or(false)
        })
    }

    /// Returns the value associated with `q`, or `None`.
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = &self.buckets[self.bucket_index(q)];
        bucket
            .iter()
            .find(|entry| entry.key.borrow() == q)
            .map(|entry| &entry.value)
    }

    /// Inserts `(key, value)`; when the key is already present the value is
    /// replaced in place and the previous one returned. Grows the table
    /// first whenever counting the new entry would reach the load threshold.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some(pos) = Self::position_of(&self.buckets[index], &key) {
            let old = self.buckets[index]
                .set(pos, MapEntry { key, value })
                .expect("position from bucket scan is live");
            return Some(old.value);
        }

        if (self.size + 1) as f64 / self.buckets.len() as f64 >= MAX_LOAD {
            self.grow();
        }
        let index = self.bucket_index(&key);
        self.buckets[index].add_last(MapEntry { key, value });
        self.size += 1;
        None
    }

    /// Removes the entry for `q`, returning its value when present.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        let pos = Self::position_of(&self.buckets[index], q)?;
        let entry = self.buckets[index]
            .remove(pos)
            .expect("position from bucket scan is live");
        self.size -= 1;
        Some(entry.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries().map(|(_, v)| v)
    }

    /// Iterates all entries, bucket by bucket, insertion order within each
    /// bucket. Not deterministic across resizes.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter())
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Discards every entry, keeping capacity and compression parameters.
    pub fn clear(&mut self) {
        let capacity = self.buckets.len();
        self.buckets = make_buckets(capacity);
        self.size = 0;
    }

    /// Doubles the bucket array, redraws the MAD parameters, and rehashes
    /// every live entry.
    fn grow(&mut self) {
        let capacity = self.buckets.len() * 2;
        let old = core::mem::replace(&mut self.buckets, make_buckets(capacity));
        self.mad = MadParams::draw(capacity);
        for mut bucket in old {
            while let Some(pos) = bucket.first() {
                let entry = bucket.remove(pos).expect("first position is live");
                let index = self.bucket_index(&entry.key);
                self.buckets[index].add_last(entry);
            }
        }
    }
}

fn make_buckets<K, V>(capacity: usize) -> Vec<PositionalList<MapEntry<K, V>>> {
    (0..capacity).map(|_| PositionalList::new()).collect()
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true; // 2 and 3
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime strictly greater than `n`.
fn next_prime_after(n: u64) -> u64 {
    let mut candidate = n + 1;
    if candidate <= 2 {
        return 2;
    }
    if candidate % 2 == 0 {
        candidate += 1;
    }
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}
