use std::collections::{BTreeMap, BTreeSet};
use crossbeam::utils::CachePadded;
use parking_lot::Mutex;
use crate::core::types::DocId;

/// Integer-like keys that can pick a shard.
pub trait ShardKey: Copy + Ord {
    fn shard_hash(&self) -> u64;
}

macro_rules! impl_shard_key {
    ($($ty:ty),*) => {
        $(
            impl ShardKey for $ty {
                fn shard_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_shard_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ShardKey for DocId {
    fn shard_hash(&self) -> u64 {
        self.value().shard_hash()
    }
}

/// Fixed set of independently locked partitions. A key always lands in
/// partition `key % shard_count`.
struct Shards<T> {
    shards: Vec<CachePadded<Mutex<T>>>,
}

impl<T: Default> Shards<T> {
    fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| CachePadded::new(Mutex::new(T::default())))
            .collect();
        Shards { shards }
    }

    fn for_key<K: ShardKey>(&self, key: &K) -> &Mutex<T> {
        let index = key.shard_hash() % self.shards.len() as u64;
        &self.shards[index as usize]
    }

    fn len(&self) -> usize {
        self.shards.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Mutex<T>> {
        self.shards.iter().map(|shard| &**shard)
    }

    fn into_inner(self) -> impl Iterator<Item = T> {
        self.shards.into_iter().map(|shard| CachePadded::into_inner(shard).into_inner())
    }
}

/// Sharded map for concurrent accumulation from many workers
///
/// Each shard is a `BTreeMap` behind its own mutex, so workers touching keys
/// in different shards never contend. Access is closure-scoped only: the
/// shard lock is held for the duration of the closure and never escapes.
/// The closure must not touch the same map again; the locks are not
/// reentrant.
pub struct ConcurrentMap<K, V> {
    shards: Shards<BTreeMap<K, V>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    pub fn new(shard_count: usize) -> Self {
        ConcurrentMap {
            shards: Shards::new(shard_count),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Runs `f` on the key's value, inserting `V::default()` first if absent.
    pub fn update<R>(&self, key: K, f: impl FnOnce(&mut V) -> R) -> R
    where
        V: Default,
    {
        let mut shard = self.shards.for_key(&key).lock();
        f(shard.entry(key).or_default())
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.shards.for_key(key).lock().remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.shards.for_key(key).lock().contains_key(key)
    }

    /// Locks every shard in turn; only a snapshot under concurrent writers.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Copies every shard, one lock at a time, into a single ordered map.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in self.shards.iter() {
            let shard = shard.lock();
            result.extend(shard.iter().map(|(key, value)| (*key, value.clone())));
        }
        result
    }

    /// Consumes the map once all workers are done with it.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards.into_inner() {
            result.extend(shard);
        }
        result
    }
}

/// Sharded set with the same partitioning as [`ConcurrentMap`].
pub struct ConcurrentSet<K> {
    shards: Shards<BTreeSet<K>>,
}

impl<K: ShardKey> ConcurrentSet<K> {
    pub fn new(shard_count: usize) -> Self {
        ConcurrentSet {
            shards: Shards::new(shard_count),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Inserts the key; returns false if it was already present.
    pub fn insert(&self, key: K) -> bool {
        self.shards.for_key(&key).lock().insert(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shards.for_key(key).lock().contains(key)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.shards.for_key(key).lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    pub fn build_ordinary_set(&self) -> BTreeSet<K> {
        let mut result = BTreeSet::new();
        for shard in self.shards.iter() {
            result.extend(shard.lock().iter().copied());
        }
        result
    }

    pub fn into_ordinary_set(self) -> BTreeSet<K> {
        let mut result = BTreeSet::new();
        for shard in self.shards.into_inner() {
            result.extend(shard);
        }
        result
    }
}
