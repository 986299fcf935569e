//! ChainedHashMap: string-keyed map using separate chaining over
//! [`LinkedList`] buckets and [`murmur3_32`] for placement.
//!
//! Growth policy
//! - Before a new key is inserted, `len / capacity` is compared against the
//!   configured max load factor. At or above it, the bucket array doubles
//!   and every entry is re-placed with `hash % new_capacity`.
//! - The new bucket array, and room in each new chain for the entries it
//!   will receive, are reserved fallibly before any entry moves. After
//!   that point nothing can fail, so a grow either completes or leaves the
//!   map exactly as it was.
//! - Adding a new key allocates its copies and its node fallibly too. If
//!   that fails after a grow, the map keeps the larger capacity and every
//!   existing entry; only the new key is missing.

use crate::error::MapError;
use crate::linked_list::LinkedList;
use crate::murmur3::murmur3_32;
use crate::reserve::{try_copy, try_with_capacity};
use tracing::{debug, trace};

pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;
pub const DEFAULT_SEED: u32 = 0;

/// Construction parameters for [`ChainedHashMap::with_config`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    /// Bucket count to start with; rounded up to a power of two.
    pub initial_capacity: usize,
    /// Growth threshold for `len / capacity`.
    pub max_load_factor: f64,
    /// Seed handed to the hash function.
    pub seed: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            seed: DEFAULT_SEED,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

#[derive(Debug)]
pub struct ChainedHashMap {
    buckets: Vec<LinkedList>,
    len: usize,
    max_load_factor: f64,
    seed: u32,
}

#[inline]
fn bucket_index(seed: u32, key: &str, capacity: usize) -> usize {
    murmur3_32(key.as_bytes(), seed) as usize % capacity
}

fn allocate_buckets(capacity: usize) -> Result<Vec<LinkedList>, MapError> {
    let mut buckets = try_with_capacity(capacity)?;
    buckets.resize_with(capacity, LinkedList::new);
    Ok(buckets)
}

impl Default for ChainedHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainedHashMap {
    /// Empty map with [`DEFAULT_INITIAL_CAPACITY`] buckets.
    pub fn new() -> Self {
        let mut buckets = Vec::with_capacity(DEFAULT_INITIAL_CAPACITY);
        buckets.resize_with(DEFAULT_INITIAL_CAPACITY, LinkedList::new);
        Self {
            buckets,
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        Self::with_config(MapConfig::default().with_initial_capacity(capacity))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        if config.initial_capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        let lf = config.max_load_factor;
        if !lf.is_finite() || lf <= 0.0 {
            return Err(MapError::InvalidLoadFactor(lf));
        }
        let capacity = config
            .initial_capacity
            .checked_next_power_of_two()
            .ok_or(MapError::CapacityOverflow)?;

        Ok(Self {
            buckets: allocate_buckets(capacity)?,
            len: 0,
            max_load_factor: lf,
            seed: config.seed,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets; always a power of two.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    fn needs_growth(&self) -> bool {
        self.load_factor() >= self.max_load_factor
    }

    /// Stores a copy of `key` and `value`.
    ///
    /// An existing key has its value replaced and the previous value is
    /// returned; this never grows the map. A new key may first double the
    /// bucket array. On error the new pair is not inserted, `len` is
    /// unchanged and every existing entry stays reachable; the capacity may
    /// already have doubled.
    pub fn add(&mut self, key: &str, value: &str) -> Result<Option<String>, MapError> {
        let value = try_copy(value)?;
        let idx = bucket_index(self.seed, key, self.capacity());
        let chain = &mut self.buckets[idx];
        if let Some(hit) = chain.find(key) {
            if let Some(slot) = hit.handle.value_mut(chain) {
                return Ok(Some(std::mem::replace(slot, value)));
            }
        }

        let key = try_copy(key)?;
        if self.needs_growth() {
            self.grow()?;
        }

        let idx = bucket_index(self.seed, &key, self.capacity());
        self.buckets[idx].append(key, value)?;
        self.len += 1;
        trace!(bucket = idx, len = self.len, "added entry");
        Ok(None)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let chain = &self.buckets[bucket_index(self.seed, key, self.capacity())];
        let hit = chain.find(key)?;
        hit.handle.value(chain)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` and returns its value. Capacity never shrinks.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = bucket_index(self.seed, key, self.capacity());
        let (_key, value) = self.buckets[idx].remove(key)?;
        self.len -= 1;
        Some(value)
    }

    /// Doubles the bucket count and re-places every entry by recomputing
    /// `hash % new_capacity` for its key.
    pub(crate) fn grow(&mut self) -> Result<(), MapError> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(MapError::CapacityOverflow)?;
        let seed = self.seed;
        let mut fresh = allocate_buckets(new_capacity)?;

        let mut incoming: Vec<usize> = Vec::new();
        incoming.try_reserve_exact(new_capacity)?;
        incoming.resize(new_capacity, 0);
        for (key, _) in self.iter() {
            incoming[bucket_index(seed, key, new_capacity)] += 1;
        }
        for (chain, &n) in fresh.iter_mut().zip(&incoming) {
            if n > 0 {
                chain.try_reserve(n)?;
            }
        }

        debug!(old_capacity, new_capacity, len = self.len, "rehashing");
        let mut old = std::mem::replace(&mut self.buckets, fresh);
        for chain in old.iter_mut() {
            while let Some((key, value)) = chain.remove_first() {
                let idx = bucket_index(seed, &key, new_capacity);
                self.buckets[idx].append_reserved(key, value);
            }
        }
        Ok(())
    }

    /// Entries in bucket order, then chain order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }
}
