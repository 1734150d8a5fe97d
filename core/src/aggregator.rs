use crate::error::{Result, SearchError};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

pub const DEFAULT_SHARD_COUNT: usize = 100;

/// Integer keys that pick their shard by plain modulo instead of hashing.
pub trait ShardKey: Copy + Ord {
    fn shard_index(self, shard_count: usize) -> usize;
}

macro_rules! impl_signed_shard_key {
    ($($t:ty),*) => {$(
        impl ShardKey for $t {
            #[inline]
            fn shard_index(self, shard_count: usize) -> usize {
                (self as i128).rem_euclid(shard_count as i128) as usize
            }
        }
    )*};
}

macro_rules! impl_unsigned_shard_key {
    ($($t:ty),*) => {$(
        impl ShardKey for $t {
            #[inline]
            fn shard_index(self, shard_count: usize) -> usize {
                (self as u128 % shard_count as u128) as usize
            }
        }
    )*};
}

impl_signed_shard_key!(i8, i16, i32, i64, isize);
impl_unsigned_shard_key!(u8, u16, u32, u64, usize);

/// A fixed set of independently locked partitions used to accumulate values
/// from many workers at once.
///
/// Each access locks exactly one shard for the lifetime of the returned guard.
pub struct ShardedAggregator<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V: Default> ShardedAggregator<K, V> {
    pub fn new(shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(SearchError::Configuration(
                "sharded aggregator needs at least one shard".into(),
            ));
        }
        let shards = (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect();
        Ok(Self { shards })
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Locks the shard owning `key` and returns its value cell, inserting
    /// `V::default()` if absent. The lock is released when the guard drops.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        MutexGuard::map(shard.lock(), |map| map.entry(key).or_default())
    }

    /// Merges all shards into one ordinary map. Meant to be called once the
    /// writers are done; each shard is locked in turn.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            merged.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    pub fn into_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}

impl<K: ShardKey, V: Default> Default for ShardedAggregator<K, V> {
    fn default() -> Self {
        let shards = (0..DEFAULT_SHARD_COUNT)
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        Self { shards }
    }
}
