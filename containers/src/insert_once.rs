use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A grow-only concurrent map where every value is constructed at most once
///
/// # Construction
/// [`InsertOnceMap::get_or_try_insert_with`] runs the constructor while holding the write lock
/// of the key's shard. Racing callers on the same key block until the first one finishes, then
/// observe the same [`Arc`]. The constructor must not access the map it is inserting into.
#[derive(Debug)]
pub struct InsertOnceMap<K: Eq + Hash, V> {
    dash_map: DashMap<K, Arc<V>>,
}

impl<K: Eq + Hash, V> Default for InsertOnceMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> InsertOnceMap<K, V> {
    pub fn new() -> Self {
        Self {
            dash_map: DashMap::new(),
        }
    }

    /// `shard_amount` must be a power of two greater than one
    pub fn with_capacity_and_shard_amount(capacity: usize, shard_amount: usize) -> Self {
        Self {
            dash_map: DashMap::with_capacity_and_shard_amount(capacity, shard_amount),
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.dash_map.get(key).map(|data| data.value().clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.dash_map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.dash_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dash_map.is_empty()
    }

    /// Get the value for `key`, constructing it with `f` if it does not exist yet
    ///
    /// If `f` fails, nothing is inserted and the error is handed back to the caller.
    pub fn get_or_try_insert_with<E, F: FnOnce() -> Result<V, E>>(
        &self,
        key: K,
        f: F,
    ) -> Result<Arc<V>, E> {
        if let Some(data) = self.dash_map.get(&key) {
            return Ok(data.value().clone());
        }
        match self.dash_map.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let data = Arc::new(f()?);
                entry.insert(data.clone());
                Ok(data)
            }
        }
    }
}
