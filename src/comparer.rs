//! Key equality and hashing used by a single map level.

use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::Arc;

use ahash::RandomState;

/// Equality and hashing for keys of one level.
///
/// Implementations must be consistent: keys that compare equal must hash to
/// the same value.
pub trait KeyComparer<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
    fn key_eq(&self, a: &K, b: &K) -> bool;
}

/// Uses the key's own `Hash` and `Eq`.
#[derive(Clone, Default)]
pub struct DefaultComparer {
    state: RandomState,
}

impl DefaultComparer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Hash + Eq + ?Sized> KeyComparer<K> for DefaultComparer {
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.state.hash_one(key)
    }

    #[inline]
    fn key_eq(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Compares string-like keys ignoring ASCII case.
#[derive(Clone, Default)]
pub struct IgnoreAsciiCase {
    state: RandomState,
}

impl IgnoreAsciiCase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: AsRef<str> + ?Sized> KeyComparer<K> for IgnoreAsciiCase {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = self.state.build_hasher();
        for b in key.as_ref().bytes() {
            hasher.write_u8(b.to_ascii_lowercase());
        }
        // Length terminator, like `str`'s own Hash impl.
        hasher.write_u8(0xff);
        hasher.finish()
    }

    fn key_eq(&self, a: &K, b: &K) -> bool {
        a.as_ref().eq_ignore_ascii_case(b.as_ref())
    }
}

struct FnComparer<H, E> {
    hash: H,
    eq: E,
}

impl<K, H, E> KeyComparer<K> for FnComparer<H, E>
where
    H: Fn(&K) -> u64,
    E: Fn(&K, &K) -> bool,
{
    fn hash_key(&self, key: &K) -> u64 {
        (self.hash)(key)
    }

    fn key_eq(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }
}

/// Shared handle to the comparer of one level.
///
/// Cloning is cheap; every child created from a level configuration holds a
/// clone of the same handle.
pub struct Comparer<K> {
    inner: Arc<dyn KeyComparer<K>>,
}

impl<K> Comparer<K> {
    pub fn new<C: KeyComparer<K> + 'static>(comparer: C) -> Self {
        Self {
            inner: Arc::new(comparer),
        }
    }

    /// Build a comparer from a hash function and an equality function.
    pub fn from_fns<H, E>(hash: H, eq: E) -> Self
    where
        H: Fn(&K) -> u64 + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        K: 'static,
    {
        Self::new(FnComparer { hash, eq })
    }

    #[inline]
    pub fn hash_key(&self, key: &K) -> u64 {
        self.inner.hash_key(key)
    }

    #[inline]
    pub fn key_eq(&self, a: &K, b: &K) -> bool {
        self.inner.key_eq(a, b)
    }

    /// Whether both handles point at the same comparer instance.
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<K: Hash + Eq> Default for Comparer<K> {
    fn default() -> Self {
        Self::new(DefaultComparer::new())
    }
}

impl<K> Clone for Comparer<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> fmt::Debug for Comparer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_comparer() {
        let c: Comparer<String> = Comparer::default();
        assert!(c.key_eq(&"a".to_string(), &"a".to_string()));
        assert!(!c.key_eq(&"a".to_string(), &"A".to_string()));
        assert_eq!(c.hash_key(&"key".to_string()), c.hash_key(&"key".to_string()));
    }

    #[test]
    fn test_ignore_ascii_case() {
        let c: Comparer<String> = Comparer::new(IgnoreAsciiCase::new());
        let a = "Oslo".to_string();
        let b = "OSLO".to_string();
        assert!(c.key_eq(&a, &b));
        assert_eq!(c.hash_key(&a), c.hash_key(&b));
        assert!(!c.key_eq(&a, &"Boston".to_string()));
    }

    #[test]
    fn test_from_fns() {
        // Integers compared modulo 10.
        let c: Comparer<u32> = Comparer::from_fns(|k| u64::from(k % 10), |a, b| a % 10 == b % 10);
        assert!(c.key_eq(&3, &13));
        assert_eq!(c.hash_key(&3), c.hash_key(&23));
        assert!(!c.key_eq(&3, &4));
    }

    #[test]
    fn test_clone_shares_instance() {
        let a: Comparer<u8> = Comparer::default();
        let b = a.clone();
        assert!(Comparer::same(&a, &b));
        assert!(!Comparer::same(&a, &Comparer::default()));
    }
}
