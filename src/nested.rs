//! Recursive nested map.

use std::fmt;
use std::hash::Hash;

use log::trace;

use crate::base::{BaseMap, Iter};
use crate::chain::{Insert, Lookup};
use crate::comparer::Comparer;
use crate::error::{Error, Result};
use crate::level::LevelConfig;
use crate::node::Node;

/// A map from `K` to child nodes of type `C`.
///
/// `C` is either another `NestedMap` or, at the innermost level, a
/// [`BaseMap`] holding the values. Use the [`NestedMap2`] .. [`NestedMap8`]
/// aliases rather than spelling the recursion out.
///
/// Children are created on demand by [`get_or_create`](Self::get_or_create)
/// and by [`add`](Self::add), always from the configuration this map was
/// built with. Reads through [`try_get`](Self::try_get),
/// [`contains_key`](Self::contains_key) and [`remove`](Self::remove) never
/// create nodes.
pub struct NestedMap<K, C: Node> {
    pub(crate) map: BaseMap<K, C>,
    /// Used for every child created under this map.
    child_config: C::Config,
}

// =============================================================================
// Arity aliases
// =============================================================================

pub type NestedMap2<K1, K2, V> = NestedMap<K1, BaseMap<K2, V>>;
pub type NestedMap3<K1, K2, K3, V> = NestedMap<K1, NestedMap2<K2, K3, V>>;
pub type NestedMap4<K1, K2, K3, K4, V> = NestedMap<K1, NestedMap3<K2, K3, K4, V>>;
pub type NestedMap5<K1, K2, K3, K4, K5, V> = NestedMap<K1, NestedMap4<K2, K3, K4, K5, V>>;
pub type NestedMap6<K1, K2, K3, K4, K5, K6, V> =
    NestedMap<K1, NestedMap5<K2, K3, K4, K5, K6, V>>;
pub type NestedMap7<K1, K2, K3, K4, K5, K6, K7, V> =
    NestedMap<K1, NestedMap6<K2, K3, K4, K5, K6, K7, V>>;
pub type NestedMap8<K1, K2, K3, K4, K5, K6, K7, K8, V> =
    NestedMap<K1, NestedMap7<K2, K3, K4, K5, K6, K7, K8, V>>;

// =============================================================================
// Construction
// =============================================================================

impl<K, C> NestedMap<K, C>
where
    K: Hash + Eq,
    C: Node,
    C::Config: Default,
{
    /// Empty map using default comparers and no capacity hints.
    pub fn new() -> Self {
        Self::with_config(Default::default())
    }

    /// Empty map with a capacity hint per level, outermost first.
    ///
    /// Fails with [`Error::InvalidArgument`] unless exactly one hint per
    /// level is given.
    pub fn with_capacities(capacities: &[usize]) -> Result<Self> {
        if capacities.len() != Self::DEPTH {
            return Err(Error::InvalidArgument {
                name: "capacities",
                message: format!(
                    "expected {} capacities, got {}",
                    Self::DEPTH,
                    capacities.len()
                ),
            });
        }
        let mut config: <Self as Node>::Config = Default::default();
        Self::apply_capacities(&mut config, capacities);
        Ok(Self::with_config(config))
    }

    /// Top level copied from `entries`, default configuration below.
    ///
    /// The children are moved in as they are; only the top level is built
    /// by this call.
    pub fn from_map<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
    {
        Self::from_map_with_config(entries, Default::default())
    }
}

impl<K, C: Node> NestedMap<K, C> {
    /// Empty map configured level by level.
    ///
    /// `config` is `(level 1, (level 2, (.. level N)))`.
    pub fn with_config(config: (LevelConfig<K>, C::Config)) -> Self {
        let (level, child_config) = config;
        Self {
            map: BaseMap::with_capacity_and_comparer(level.capacity(), level.comparer().clone()),
            child_config,
        }
    }

    /// Top level copied from `entries`, configured by `config`.
    ///
    /// Fails with [`Error::DuplicateKey`] if the level-1 comparer considers
    /// two keys of `entries` equal.
    pub fn from_map_with_config<I>(entries: I, config: (LevelConfig<K>, C::Config)) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
    {
        let mut map = Self::with_config(config);
        for (key, child) in entries {
            map.map.add(key, child)?;
        }
        Ok(map)
    }
}

// =============================================================================
// Level access
// =============================================================================

impl<K, C: Node> NestedMap<K, C> {
    /// Number of keys at this level.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Comparer used for keys at this level.
    #[inline]
    pub fn comparer(&self) -> &Comparer<K> {
        self.map.comparer()
    }

    /// Configuration applied to children created under this map.
    #[inline]
    pub fn child_config(&self) -> &C::Config {
        &self.child_config
    }

    /// Return the child under `key`, creating an empty one if absent.
    ///
    /// This mutates the map even when used only to read: the new child stays
    /// in place afterwards.
    pub fn get_or_create(&mut self, key: K) -> &mut C {
        let Self { map, child_config } = self;
        map.get_or_insert_with(key, || {
            trace!("creating nested level of depth {}", C::DEPTH);
            C::from_config(child_config)
        })
    }

    /// Put `child` under `key`, replacing any existing child wholesale.
    pub fn set(&mut self, key: K, child: C) -> Option<C> {
        self.map.set(key, child)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, C> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut C)> + '_ {
        self.map.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    /// Every value in the map, in unspecified order.
    pub fn values(&self) -> Box<dyn Iterator<Item = &C::Value> + '_> {
        self.leaves()
    }

    /// Number of values in the map.
    pub fn value_count(&self) -> usize {
        self.leaf_count()
    }

    /// Whether any value anywhere in the map equals `value`.
    pub fn contains_value(&self, value: &C::Value) -> bool
    where
        C::Value: PartialEq,
    {
        self.values().any(|v| v == value)
    }
}

// =============================================================================
// Chain operations
// =============================================================================

impl<K, C: Node> NestedMap<K, C> {
    /// Add a value under a full chain, or a subtree under a shorter one.
    ///
    /// ```
    /// use nested_map::{BaseMap, NestedMap3};
    ///
    /// let mut m: NestedMap3<&str, u32, bool, u32> = NestedMap3::new();
    /// m.add(("York", 2017, true), 15).unwrap();
    ///
    /// let mut fragment = BaseMap::new();
    /// fragment.add(false, 12).unwrap();
    /// m.add(("Phoenix", 2016), fragment).unwrap();
    ///
    /// assert!(m.add(("York", 2017, true), 16).is_err());
    /// ```
    pub fn add<P>(&mut self, chain: P, target: <Self as Insert<P>>::Target) -> Result<()>
    where
        Self: Insert<P>,
    {
        <Self as Insert<P>>::insert_new(self, chain, target)
    }

    /// Whether the chain exists down to its last key.
    pub fn contains_key<P>(&self, chain: P) -> bool
    where
        Self: Lookup<P>,
    {
        <Self as Lookup<P>>::find(self, chain).is_some()
    }

    pub fn try_get<P>(&self, chain: P) -> Option<&<Self as Lookup<P>>::Target>
    where
        Self: Lookup<P>,
    {
        <Self as Lookup<P>>::find(self, chain)
    }

    pub fn try_get_mut<P>(&mut self, chain: P) -> Option<&mut <Self as Lookup<P>>::Target>
    where
        Self: Lookup<P>,
    {
        <Self as Lookup<P>>::find_mut(self, chain)
    }

    /// Remove whatever the chain addresses and return it.
    ///
    /// Nodes left empty by the removal stay in place; see
    /// [`prune_empty`](Node::prune_empty).
    pub fn remove<P>(&mut self, chain: P) -> Option<<Self as Lookup<P>>::Target>
    where
        Self: Lookup<P>,
    {
        <Self as Lookup<P>>::remove_at(self, chain)
    }
}

// =============================================================================
// Recursion
// =============================================================================

impl<K, C: Node> Node for NestedMap<K, C> {
    type Value = C::Value;
    type Config = (LevelConfig<K>, C::Config);
    const DEPTH: usize = C::DEPTH + 1;

    fn from_config(config: &Self::Config) -> Self {
        Self::with_config(config.clone())
    }

    fn config(&self) -> Self::Config {
        (self.map.config(), self.child_config.clone())
    }

    fn apply_capacities(config: &mut Self::Config, capacities: &[usize]) {
        if let Some((&first, rest)) = capacities.split_first() {
            config.0.set_capacity(first);
            C::apply_capacities(&mut config.1, rest);
        }
    }

    #[inline]
    fn entry_count(&self) -> usize {
        self.map.len()
    }

    fn leaf_count(&self) -> usize {
        self.map.values().map(Node::leaf_count).sum()
    }

    fn leaves<'a>(&'a self) -> Box<dyn Iterator<Item = &'a C::Value> + 'a> {
        Box::new(self.map.values().flat_map(|child| child.leaves()))
    }

    fn prune_empty(&mut self) -> usize {
        let mut removed: usize = self.map.values_mut().map(Node::prune_empty).sum();
        let before = self.map.len();
        self.map.retain(|_, child| child.entry_count() != 0);
        removed += before - self.map.len();
        if removed > 0 {
            trace!("pruned {} empty nodes", removed);
        }
        removed
    }
}

impl<K, C> Default for NestedMap<K, C>
where
    K: Hash + Eq,
    C: Node,
    C::Config: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, C: Node + Clone> Clone for NestedMap<K, C> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            child_config: self.child_config.clone(),
        }
    }
}

impl<K: fmt::Debug, C: Node + fmt::Debug> fmt::Debug for NestedMap<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, f)
    }
}

/// Compares contents only; configuration is ignored.
impl<K, C: Node + PartialEq> PartialEq for NestedMap<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<'a, K, C: Node> IntoIterator for &'a NestedMap<K, C> {
    type Item = (&'a K, &'a C);
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
