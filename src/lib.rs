//! # nested-map
//!
//! A hash map addressed by a chain of 2 to 8 keys, built as nested
//! single-key levels: level 1 maps to a level-2 map, which maps to a level-3
//! map, down to the last level which maps to values.
//!
//! Intermediate levels are created on demand. [`NestedMap::get_or_create`]
//! creates a missing child as a side effect of the lookup, while
//! [`try_get`](NestedMap::try_get), [`contains_key`](NestedMap::contains_key)
//! and [`remove`](NestedMap::remove) never create anything. Capacity hints
//! and key comparers are configured per level and applied to every child the
//! map creates.
//!
//! ## Example
//!
//! ```rust
//! use nested_map::NestedMap3;
//!
//! let mut sales: NestedMap3<&str, i32, bool, u32> = NestedMap3::new();
//! sales.add(("Oslo", 2007, true), 12).unwrap();
//! sales.add(("Oslo", 2007, false), 10).unwrap();
//! sales.add(("Boston", 2006, true), 6).unwrap();
//!
//! assert_eq!(sales.try_get((&"Oslo", &2007, &true)), Some(&12));
//! assert!(sales.contains_key((&"Oslo", &2007)));
//! assert!(!sales.contains_key((&"Boston", &2011, &false)));
//!
//! // Reading through `get_or_create` fills in the missing levels.
//! sales.get_or_create("York").get_or_create(2006).set(true, 98);
//! assert_eq!(sales.try_get((&"York", &2006, &true)), Some(&98));
//!
//! assert!(sales.remove(&"Boston").is_some());
//! assert_eq!(sales.value_count(), 3);
//! ```
//!
//! ## Key chains
//!
//! Lookups take `&k1` or a tuple of key references, inserts take a tuple of
//! owned keys. A chain shorter than the map's depth addresses a nested map
//! instead of a value:
//!
//! ```rust
//! use nested_map::{NestedMap2, NestedMap3};
//!
//! let mut m: NestedMap3<u8, u8, u8, &str> = NestedMap3::new();
//! m.add((1, 2, 3), "a").unwrap();
//!
//! let mut fragment: NestedMap2<u8, u8, &str> = NestedMap2::new();
//! fragment.add((5, 6), "b").unwrap();
//! m.add((4,), fragment).unwrap();
//!
//! let level2: &NestedMap2<u8, u8, &str> = m.try_get(&4).unwrap();
//! assert_eq!(level2.try_get((&5, &6)), Some(&"b"));
//! ```

#![forbid(unsafe_code)]

mod base;
mod chain;
mod comparer;
mod error;
mod group;
mod level;
mod nested;
mod node;

pub use base::{BaseMap, Iter};
pub use chain::{Insert, Lookup};
pub use comparer::{Comparer, DefaultComparer, IgnoreAsciiCase, KeyComparer};
pub use error::{Error, Result};
pub use group::{KeySelectors, ToNestedMap};
pub use level::LevelConfig;
pub use nested::{
    NestedMap, NestedMap2, NestedMap3, NestedMap4, NestedMap5, NestedMap6, NestedMap7, NestedMap8,
};
pub use node::Node;

#[cfg(test)]
mod proptests;
