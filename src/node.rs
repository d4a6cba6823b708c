//! The recursion seam shared by the terminal base map and every nested level.

/// One level of a nested map, together with everything below it.
///
/// Implemented by [`BaseMap`](crate::BaseMap) (depth 1, maps keys to values)
/// and by [`NestedMap`](crate::NestedMap) (depth `1 + child depth`).
pub trait Node: Sized {
    /// Type stored at the leaves.
    type Value;

    /// Configuration for this level and every level below it.
    ///
    /// For the base map this is a single [`LevelConfig`](crate::LevelConfig);
    /// a nested map pairs its own level with its child's configuration.
    type Config: Clone;

    /// Number of keys in a full chain.
    const DEPTH: usize;

    /// Create an empty node configured by `config`.
    fn from_config(config: &Self::Config) -> Self;

    /// Snapshot of the configuration this node was built with.
    fn config(&self) -> Self::Config;

    /// Overwrite the capacity hint of each level, outermost first.
    ///
    /// Never panics. Levels past the end of `capacities` keep their current
    /// hint and entries beyond `DEPTH` are ignored. Use
    /// [`NestedMap::with_capacities`](crate::NestedMap::with_capacities) to
    /// have the length checked.
    fn apply_capacities(config: &mut Self::Config, capacities: &[usize]);

    /// Number of keys at this level.
    fn entry_count(&self) -> usize;

    /// Number of values stored in the whole subtree.
    fn leaf_count(&self) -> usize;

    /// Iterate over every value in the subtree, in unspecified order.
    fn leaves<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Self::Value> + 'a>;

    /// Drop empty intermediate nodes from the subtree.
    ///
    /// Returns how many nodes were removed.
    fn prune_empty(&mut self) -> usize;
}
