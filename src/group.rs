//! Building a nested map from a sequence of items.
//!
//! ```
//! use nested_map::ToNestedMap;
//!
//! let sales = vec![("Oslo", 2007, 12), ("Oslo", 2008, 5), ("Boston", 2006, 6)];
//! let m = sales
//!     .into_iter()
//!     .to_nested_map(
//!         (|s: &(&'static str, i32, i32)| s.0, |s: &(&'static str, i32, i32)| s.1),
//!         |s| s.2,
//!     )
//!     .unwrap();
//! assert_eq!(m.try_get((&"Oslo", &2008)), Some(&5));
//! ```

use log::debug;

use crate::chain::Insert;
use crate::error::Result;
use crate::nested::{
    NestedMap2, NestedMap3, NestedMap4, NestedMap5, NestedMap6, NestedMap7, NestedMap8,
};
use crate::node::Node;

/// A tuple of 2 to 8 key-extraction functions, one per level.
///
/// Closures need their argument type spelled out (`|p: &Place| ..`) because
/// the tuple itself carries no expected signature.
pub trait KeySelectors<T> {
    /// Owned key chain produced for one item.
    type Chain;

    /// Nested map of matching depth holding values of type `V`.
    type Map<V>: Node<Value = V> + Insert<Self::Chain, Target = V>;

    fn select(&self, item: &T) -> Self::Chain;
}

macro_rules! selector_impls {
    ($map:ident; $(($f:ident, $k:ident)),+) => {
        impl<T, $($f, $k),+> KeySelectors<T> for ($($f,)+)
        where
            $($f: Fn(&T) -> $k),+
        {
            type Chain = ($($k,)+);
            type Map<V> = $map<$($k,)+ V>;

            #[allow(non_snake_case)]
            fn select(&self, item: &T) -> Self::Chain {
                let ($($f,)+) = self;
                ($($f(item),)+)
            }
        }
    };
}

selector_impls!(NestedMap2; (F1, K1), (F2, K2));
selector_impls!(NestedMap3; (F1, K1), (F2, K2), (F3, K3));
selector_impls!(NestedMap4; (F1, K1), (F2, K2), (F3, K3), (F4, K4));
selector_impls!(NestedMap5; (F1, K1), (F2, K2), (F3, K3), (F4, K4), (F5, K5));
selector_impls!(NestedMap6; (F1, K1), (F2, K2), (F3, K3), (F4, K4), (F5, K5), (F6, K6));
selector_impls!(NestedMap7; (F1, K1), (F2, K2), (F3, K3), (F4, K4), (F5, K5), (F6, K6), (F7, K7));
selector_impls!(
    NestedMap8;
    (F1, K1), (F2, K2), (F3, K3), (F4, K4), (F5, K5), (F6, K6), (F7, K7), (F8, K8)
);

/// Collect any sequence into a nested map, one value per key chain.
///
/// This is not a grouping collector: two items producing the same full key
/// chain fail the build with [`Error::DuplicateKey`](crate::Error::DuplicateKey).
pub trait ToNestedMap: IntoIterator + Sized {
    /// Build with default comparers and no capacity hints.
    fn to_nested_map<S, E, V>(self, selectors: S, element: E) -> Result<S::Map<V>>
    where
        S: KeySelectors<Self::Item>,
        E: FnMut(Self::Item) -> V,
        <S::Map<V> as Node>::Config: Default,
    {
        self.to_nested_map_with(selectors, element, Default::default())
    }

    /// Build with an explicit per-level configuration.
    fn to_nested_map_with<S, E, V>(
        self,
        selectors: S,
        mut element: E,
        config: <S::Map<V> as Node>::Config,
    ) -> Result<S::Map<V>>
    where
        S: KeySelectors<Self::Item>,
        E: FnMut(Self::Item) -> V,
    {
        let mut map = <S::Map<V> as Node>::from_config(&config);
        for item in self {
            let chain = selectors.select(&item);
            map.insert_new(chain, element(item))?;
        }
        debug!(
            "built nested map of depth {} with {} values",
            <S::Map<V> as Node>::DEPTH,
            map.leaf_count()
        );
        Ok(map)
    }
}

impl<I: IntoIterator> ToNestedMap for I {}
