//! Per-level configuration: capacity hint and key comparer.

use std::fmt;
use std::hash::Hash;

use crate::comparer::{Comparer, KeyComparer};

/// Construction parameters for one level of a nested map.
///
/// A node keeps the configuration of every level below it and applies it
/// each time a child is created, so lazily created children are configured
/// exactly like explicitly constructed ones.
pub struct LevelConfig<K> {
    capacity: usize,
    comparer: Comparer<K>,
}

impl<K> LevelConfig<K> {
    pub fn new(capacity: usize, comparer: Comparer<K>) -> Self {
        Self { capacity, comparer }
    }

    pub fn with_comparer<C: KeyComparer<K> + 'static>(comparer: C) -> Self {
        Self::new(0, Comparer::new(comparer))
    }

    pub fn with_capacity(capacity: usize) -> Self
    where
        K: Hash + Eq,
    {
        Self::new(capacity, Comparer::default())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn comparer(&self) -> &Comparer<K> {
        &self.comparer
    }

    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }
}

impl<K: Hash + Eq> Default for LevelConfig<K> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> Clone for LevelConfig<K> {
    fn clone(&self) -> Self {
        Self {
            capacity: self.capacity,
            comparer: self.comparer.clone(),
        }
    }
}

impl<K> fmt::Debug for LevelConfig<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelConfig")
            .field("capacity", &self.capacity)
            .field("comparer", &self.comparer)
            .finish()
    }
}
