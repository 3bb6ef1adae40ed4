// Chunk: docs/chunks/whitespace_cache - Incremental trailing whitespace span cache

//! An explicit keyed collection.
//!
//! Items know their own key through [`Keyed`]; the map stores at most one
//! item per key and iterates in key order.

use std::collections::BTreeMap;
use std::fmt;

/// Items that carry the key they are stored under.
pub trait Keyed {
    type Key: Ord + Copy + fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// A map from `T::Key` to `T`, keyed by the items themselves.
#[derive(Debug, Clone)]
pub struct KeyedMap<T: Keyed> {
    items: BTreeMap<T::Key, T>,
}

impl<T: Keyed> KeyedMap<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stores `item` under its own key, returning the item it replaced.
    pub fn upsert(&mut self, item: T) -> Option<T> {
        self.items.insert(item.key(), item)
    }

    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        self.items.remove(&key)
    }

    pub fn contains(&self, key: T::Key) -> bool {
        self.items.contains_key(&key)
    }

    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.items.get(&key)
    }

    /// Iterates over the items in key order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = T::Key> + '_ {
        self.items.keys().copied()
    }

    /// Returns the largest key present.
    pub fn last_key(&self) -> Option<T::Key> {
        self.items.keys().next_back().copied()
    }

    /// Removes every item whose key is `from` or greater, in key order.
    pub fn split_off(&mut self, from: T::Key) -> Vec<T> {
        self.items.split_off(&from).into_values().collect()
    }

    /// Keeps only the items for which `keep` returns true.
    ///
    /// `keep` may modify an item but must not change its key.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        self.items.retain(|key, item| {
            let keep_item = keep(item);
            debug_assert!(*key == item.key(), "retain must not re-key {key:?}");
            keep_item
        });
    }

}

impl<T: Keyed> Default for KeyedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
