//! Single-key hash map with a per-map key comparer.
//!
//! This is the terminal level of every nested map: all actual storage
//! happens here. Each level of a [`NestedMap`](crate::NestedMap) is a
//! `BaseMap` whose values are the next level down.

use std::fmt;
use std::hash::Hash;
use std::mem;

use hashbrown::hash_table::{self, Entry, HashTable};

use crate::comparer::Comparer;
use crate::error::{Error, Result};
use crate::level::LevelConfig;
use crate::node::Node;

/// A hash map whose key equality and hashing come from a [`Comparer`].
pub struct BaseMap<K, V> {
    table: HashTable<(K, V)>,
    comparer: Comparer<K>,
    /// Capacity hint the map was created with.
    capacity: usize,
}

impl<K: Hash + Eq, V> BaseMap<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, Comparer::default())
    }

    /// Copy `entries` into a new map using the default comparer.
    ///
    /// Fails with [`Error::DuplicateKey`] if `entries` repeats a key.
    pub fn from_map<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_map_with_comparer(entries, Comparer::default())
    }
}

impl<K, V> BaseMap<K, V> {
    pub fn with_comparer(comparer: Comparer<K>) -> Self {
        Self::with_capacity_and_comparer(0, comparer)
    }

    pub fn with_capacity_and_comparer(capacity: usize, comparer: Comparer<K>) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            comparer,
            capacity,
        }
    }

    /// Copy `entries` into a new map that compares keys with `comparer`.
    ///
    /// Two source keys the comparer considers equal are a duplicate.
    pub fn from_map_with_comparer<I>(entries: I, comparer: Comparer<K>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = entries.into_iter();
        let mut map = Self::with_capacity_and_comparer(entries.size_hint().0, comparer);
        for (key, value) in entries {
            map.add(key, value)?;
        }
        Ok(map)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of entries the map can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    #[inline]
    pub fn comparer(&self) -> &Comparer<K> {
        &self.comparer
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.try_get(key).ok_or(Error::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        self.try_get_mut(key).ok_or(Error::KeyNotFound)
    }

    pub fn try_get(&self, key: &K) -> Option<&V> {
        let hash = self.comparer.hash_key(key);
        self.table
            .find(hash, |(k, _)| self.comparer.key_eq(k, key))
            .map(|(_, v)| v)
    }

    pub fn try_get_mut(&mut self, key: &K) -> Option<&mut V> {
        let comparer = &self.comparer;
        let hash = comparer.hash_key(key);
        self.table
            .find_mut(hash, |(k, _)| comparer.key_eq(k, key))
            .map(|(_, v)| v)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.try_get(key).is_some()
    }

    /// Linear scan over all values.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Insert or overwrite. Returns the previous value, if any.
    ///
    /// When the key is already present the stored key is kept.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match entry(&mut self.table, &self.comparer, &key) {
            Entry::Occupied(mut entry) => Some(mem::replace(&mut entry.get_mut().1, value)),
            Entry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Insert a new key. Fails with [`Error::DuplicateKey`] if it is present.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        match entry(&mut self.table, &self.comparer, &key) {
            Entry::Occupied(_) => Err(Error::DuplicateKey),
            Entry::Vacant(entry) => {
                entry.insert((key, value));
                Ok(())
            }
        }
    }

    /// Return the value under `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let entry = match entry(&mut self.table, &self.comparer, &key) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(entry) => entry.insert((key, default())),
        };
        &mut entry.into_mut().1
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let comparer = &self.comparer;
        let hash = comparer.hash_key(key);
        match self.table.find_entry(hash, |(k, _)| comparer.key_eq(k, key)) {
            Ok(entry) => {
                let ((_, value), _) = entry.remove();
                Some(value)
            }
            Err(_) => None,
        }
    }

    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.table.retain(|(k, v)| f(k, v));
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> + '_ {
        self.table.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.table.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.table.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.table.iter_mut().map(|(_, v)| v)
    }
}

fn entry<'a, K, V>(
    table: &'a mut HashTable<(K, V)>,
    comparer: &Comparer<K>,
    key: &K,
) -> Entry<'a, (K, V)> {
    table.entry(
        comparer.hash_key(key),
        |(k, _)| comparer.key_eq(k, key),
        |(k, _)| comparer.hash_key(k),
    )
}

impl<K, V> Node for BaseMap<K, V> {
    type Value = V;
    type Config = LevelConfig<K>;
    const DEPTH: usize = 1;

    fn from_config(config: &LevelConfig<K>) -> Self {
        Self::with_capacity_and_comparer(config.capacity(), config.comparer().clone())
    }

    fn config(&self) -> LevelConfig<K> {
        LevelConfig::new(self.capacity, self.comparer.clone())
    }

    fn apply_capacities(config: &mut LevelConfig<K>, capacities: &[usize]) {
        if let Some(&capacity) = capacities.first() {
            config.set_capacity(capacity);
        }
    }

    #[inline]
    fn entry_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn leaf_count(&self) -> usize {
        self.len()
    }

    fn leaves<'a>(&'a self) -> Box<dyn Iterator<Item = &'a V> + 'a> {
        Box::new(self.values())
    }

    fn prune_empty(&mut self) -> usize {
        0
    }
}

impl<K: Hash + Eq, V> Default for BaseMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for BaseMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            comparer: self.comparer.clone(),
            capacity: self.capacity,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BaseMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Order-independent. Every entry of each side must be found in the other
/// under that other map's comparer, so maps with different comparers compare
/// the same way from both sides.
impl<K, V: PartialEq> PartialEq for BaseMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_submap_of(other) && other.is_submap_of(self)
    }
}

impl<K, V: PartialEq> BaseMap<K, V> {
    fn is_submap_of(&self, other: &Self) -> bool {
        self.iter().all(|(k, v)| other.try_get(k).is_some_and(|w| v == w))
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for BaseMap<K, V> {
    /// Later entries overwrite earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for BaseMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BaseMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for BaseMap<K, V> {
    type Item = (K, V);
    type IntoIter = hash_table::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.into_iter()
    }
}

/// Borrowing iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V> {
    inner: hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
