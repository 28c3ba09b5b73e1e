use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

fn hash_of<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// A key together with its cached hash.
///
/// The hash decides which bucket of a White or Black node the key lives in, so it
/// is computed once, when the key enters the tree, and never changes afterwards.
/// There is deliberately no way to replace the wrapped value.
#[derive(Clone)]
pub(crate) struct WgbKey<K> {
    value: K,
    hash: u64,
}

impl<K: Hash> WgbKey<K> {
    pub(crate) fn new(value: K) -> Self {
        let hash = hash_of(&value);
        Self { value, hash }
    }
}

impl<K> WgbKey<K> {
    #[inline]
    pub(crate) fn get(&self) -> &K {
        &self.value
    }

    #[inline]
    pub(crate) fn hash_code(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub(crate) fn probe(&self) -> KeyProbe<'_, K> {
        KeyProbe {
            key: &self.value,
            hash: self.hash,
        }
    }

    pub(crate) fn into_inner(self) -> K {
        self.value
    }
}

impl<K: fmt::Debug> fmt::Debug for WgbKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// A borrowed key with the same hash its owned [`WgbKey`] would carry.
///
/// Lookups, deletes and range boundaries route with probes so that callers keep
/// ownership of the keys they query with. The probe may borrow any form `Q` of the
/// key that `K: Borrow<Q>` allows; `Borrow` requires `Q` to hash exactly as `K`
/// does, so the cached hash picks the same bucket.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct KeyProbe<'q, Q: ?Sized> {
    key: &'q Q,
    hash: u64,
}

impl<Q: ?Sized> Clone for KeyProbe<'_, Q> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q: ?Sized> Copy for KeyProbe<'_, Q> {}

impl<'q, Q: Hash + ?Sized> KeyProbe<'q, Q> {
    pub(crate) fn new(key: &'q Q) -> Self {
        Self {
            key,
            hash: hash_of(key),
        }
    }
}

impl<'q, Q: ?Sized> KeyProbe<'q, Q> {
    #[inline]
    pub(crate) fn get(&self) -> &'q Q {
        self.key
    }

    #[inline]
    pub(crate) fn hash_code(&self) -> u64 {
        self.hash
    }
}

/// A key/value pair stored in a [`WgbTreeMap`](crate::WgbTreeMap).
///
/// Two entries are equal when their keys are equal; values take no part in
/// equality, ordering or hashing. An `entry_set` therefore holds at most one entry
/// per key.
///
/// # Examples
///
/// ```
/// use wgb_tree::WgbTreeMap;
///
/// let map = WgbTreeMap::from([(1, "a"), (2, "b")]);
/// let mut entry = map.get(&1).unwrap();
/// assert_eq!(entry.key(), &1);
/// assert_eq!(entry.set_value("z"), "a");
/// assert_eq!(entry.into_parts(), (1, "z"));
/// ```
#[derive(Clone)]
pub struct Entry<K, V> {
    key: WgbKey<K>,
    value: V,
}

impl<K: Hash, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key: WgbKey::new(key),
            value,
        }
    }
}

impl<K, V> Entry<K, V> {
    /// Returns the entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        self.key.get()
    }

    /// Returns the entry's value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the entry's value.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value and returns the previous one.
    pub fn set_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key.into_inner(), self.value)
    }

    pub(crate) fn wgb_key(&self) -> &WgbKey<K> {
        &self.key
    }

    pub(crate) fn probe(&self) -> KeyProbe<'_, K> {
        self.key.probe()
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: Ord, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(other.key())
    }
}

impl<K: Hash, V> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry").field(self.key()).field(&self.value).finish()
    }
}
