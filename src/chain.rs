//! Key-chain addressing.
//!
//! A chain is written as a tuple, outermost key first. Lookups take
//! references (`&k1` or `(&k1, &k2, ..)`), inserts take owned keys
//! (`(k1,)`, `(k1, k2, ..)`). The chain length selects the target: a full
//! chain addresses a value, a shorter one addresses the nested map at that
//! depth. Chains longer than the map is deep do not type-check.

use log::trace;

use crate::base::BaseMap;
use crate::error::Result;
use crate::nested::NestedMap;
use crate::node::Node;

/// Non-creating access along a key chain.
///
/// None of these methods create intermediate nodes.
pub trait Lookup<P> {
    /// What the chain addresses: a value or a nested map.
    type Target;

    fn find(&self, chain: P) -> Option<&Self::Target>;

    fn find_mut(&mut self, chain: P) -> Option<&mut Self::Target>;

    /// Remove the target from its parent. Empty ancestors are kept.
    fn remove_at(&mut self, chain: P) -> Option<Self::Target>;
}

/// Insertion along a key chain, creating intermediate nodes on the way.
pub trait Insert<P> {
    type Target;

    /// Fails with [`Error::DuplicateKey`](crate::Error::DuplicateKey) if the
    /// last key of the chain is already present. Intermediate nodes created
    /// on the way are kept even when the insert fails.
    fn insert_new(&mut self, chain: P, target: Self::Target) -> Result<()>;
}

impl<'q, K, V> Lookup<&'q K> for BaseMap<K, V> {
    type Target = V;

    fn find(&self, key: &'q K) -> Option<&V> {
        self.try_get(key)
    }

    fn find_mut(&mut self, key: &'q K) -> Option<&mut V> {
        self.try_get_mut(key)
    }

    fn remove_at(&mut self, key: &'q K) -> Option<V> {
        self.remove(key)
    }
}

impl<K, V> Insert<(K,)> for BaseMap<K, V> {
    type Target = V;

    fn insert_new(&mut self, (key,): (K,), value: V) -> Result<()> {
        self.add(key, value)
    }
}

impl<'q, K, C: Node> Lookup<&'q K> for NestedMap<K, C> {
    type Target = C;

    fn find(&self, key: &'q K) -> Option<&C> {
        self.map.try_get(key)
    }

    fn find_mut(&mut self, key: &'q K) -> Option<&mut C> {
        self.map.try_get_mut(key)
    }

    fn remove_at(&mut self, key: &'q K) -> Option<C> {
        let removed = self.map.remove(key);
        if removed.is_some() {
            trace!("removed subtree of depth {}", C::DEPTH);
        }
        removed
    }
}

impl<K, C: Node> Insert<(K,)> for NestedMap<K, C> {
    type Target = C;

    fn insert_new(&mut self, (key,): (K,), child: C) -> Result<()> {
        self.map.add(key, child)
    }
}

/// Tail of a chain: a bare key for one element, a tuple otherwise.
macro_rules! tail {
    ($only:ident) => { $only };
    ($($rest:ident),+) => { ($($rest),+) };
}

macro_rules! chain_impls {
    ($($rest:ident),+) => {
        impl<'q, K, C, $($rest),+> Lookup<(&'q K, $($rest),+)> for NestedMap<K, C>
        where
            C: Node + Lookup<tail!($($rest),+)>,
        {
            type Target = <C as Lookup<tail!($($rest),+)>>::Target;

            #[allow(non_snake_case)]
            fn find(&self, (head, $($rest),+): (&'q K, $($rest),+)) -> Option<&Self::Target> {
                self.map.try_get(head)?.find(tail!($($rest),+))
            }

            #[allow(non_snake_case)]
            fn find_mut(
                &mut self,
                (head, $($rest),+): (&'q K, $($rest),+),
            ) -> Option<&mut Self::Target> {
                self.map.try_get_mut(head)?.find_mut(tail!($($rest),+))
            }

            #[allow(non_snake_case)]
            fn remove_at(
                &mut self,
                (head, $($rest),+): (&'q K, $($rest),+),
            ) -> Option<Self::Target> {
                self.map.try_get_mut(head)?.remove_at(tail!($($rest),+))
            }
        }

        impl<K, C, $($rest),+> Insert<(K, $($rest),+)> for NestedMap<K, C>
        where
            C: Node + Insert<($($rest,)+)>,
        {
            type Target = <C as Insert<($($rest,)+)>>::Target;

            #[allow(non_snake_case)]
            fn insert_new(
                &mut self,
                (head, $($rest),+): (K, $($rest),+),
                target: Self::Target,
            ) -> Result<()> {
                self.get_or_create(head).insert_new(($($rest,)+), target)
            }
        }
    };
}

chain_impls!(A2);
chain_impls!(A2, A3);
chain_impls!(A2, A3, A4);
chain_impls!(A2, A3, A4, A5);
chain_impls!(A2, A3, A4, A5, A6);
chain_impls!(A2, A3, A4, A5, A6, A7);
chain_impls!(A2, A3, A4, A5, A6, A7, A8);
