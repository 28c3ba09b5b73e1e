use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use std::collections::BTreeSet;

use parking_lot::Mutex;

use crate::entry::Entry;
use crate::error::WgbError;
use crate::order::Order;
use crate::queryable_map::QueryableMap;
use crate::raw::{Capacity, RawWgbTree};

mod config;
mod diagnostics;
mod range;

pub use config::WgbConfig;

/// An ordered map backed by a White-Grey-Black tree.
///
/// Keys must be totally ordered ([`Ord`]) and hashable ([`Hash`]). The tree
/// alternates two kinds of layer: *Grey* nodes split keys by comparison into a
/// White child (smaller keys) and a Black child (larger keys), while *White* and
/// *Black* nodes keep the extreme key of their subtree as pivot and spread the rest
/// over a prime number of hash buckets. Bucket counts grow one prime per layer, so
/// the tree fans out quickly near the leaves. Grey nodes rebalance after every
/// insert and delete by moving their pivot toward the shallower side.
///
/// The map synchronises internally with a single lock: every method takes `&self`
/// and holds the lock for its whole duration. Lookups and range queries return
/// owned clones, which is why most operations require `K: Clone` and `V: Clone`.
///
/// It is a logic error for a key's ordering or hash to change while it is in the
/// map. The resulting behavior is not specified, but will be encapsulated to the
/// `WgbTreeMap` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use wgb_tree::{Order, WgbTreeMap};
///
/// let planets = WgbTreeMap::new();
/// planets.put("Mercury", 0.4);
/// planets.put("Venus", 0.7);
/// planets.put("Earth", 1.0);
/// planets.put("Mars", 1.5);
///
/// assert_eq!(planets.get(&"Earth").map(|entry| *entry.value()), Some(1.0));
/// assert_eq!(planets.get_min(), Some("Earth"));
///
/// let inner: Vec<_> = planets
///     .less_than(&"Mercury", Order::Ascending)
///     .into_iter()
///     .map(|entry| *entry.key())
///     .collect();
/// assert_eq!(inner, ["Earth", "Mars"]);
/// ```
pub struct WgbTreeMap<K, V> {
    raw: Mutex<RawWgbTree<K, V>>,
}

impl<K, V> WgbTreeMap<K, V> {
    /// Makes a new, empty `WgbTreeMap` with the default configuration.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::new();
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_raw(RawWgbTree::new(Capacity::FIRST))
    }

    fn from_raw(raw: RawWgbTree<K, V>) -> Self {
        Self { raw: Mutex::new(raw) }
    }

    /// Removes every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::from([(1, "a")]);
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&self) {
        self.raw.lock().clear();
    }

    /// Returns `true` if any entry holds `value`.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.lock().contains_value(value)
    }
}

impl<K: Ord + Hash, V> WgbTreeMap<K, V> {
    /// Associates `value` with `key`.
    ///
    /// If the key was already present, its entry is removed and a fresh entry is
    /// inserted in its place; the previous value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.put(37, "b"), Some("a"));
    /// assert_eq!(map.size(), 1);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the tree's internal invariants have been broken, which can only
    /// happen if a key's ordering or hash changed while it was in the map.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.raw.lock().put(Entry::new(key, value)).map(Entry::into_value)
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering and
    /// hash of the borrowed form must match those of the key type.
    ///
    /// # Panics
    ///
    /// Panics if the tree's internal invariants have been broken, which can only
    /// happen if a key's ordering or hash changed while it was in the map.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Hash,
    {
        match self.raw.lock().delete(key) {
            Ok(removed) => Some(removed.into_value()),
            Err(WgbError::NotFound) => None,
            Err(error) => panic!("`WgbTreeMap::remove()` - {error}"),
        }
    }

    /// Returns `true` if the map holds an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Hash,
    {
        self.raw.lock().get(key).is_some()
    }

    /// Puts every pair from `entries`, in iteration order. Later pairs win over
    /// earlier ones with the same key.
    ///
    /// `entries` is drained before the map is locked, so it may read this map.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::from([(0, 0)]);
    /// map.put_all((1..4).map(|k| (k, map.size())));
    /// assert_eq!(map.value_collection(), [0, 1, 1, 1]);
    /// ```
    pub fn put_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut raw = self.raw.lock();
        for (key, value) in entries {
            raw.put(Entry::new(key, value));
        }
    }
}

impl<K: Ord + Hash + Clone, V: Clone> WgbTreeMap<K, V> {
    /// Returns a copy of the entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::from([(1, "a")]);
    /// assert_eq!(map.get(&1).map(|entry| *entry.value()), Some("a"));
    /// assert!(map.get(&2).is_none());
    ///
    /// let names = WgbTreeMap::from([("ada".to_owned(), 1815)]);
    /// assert!(names.get("ada").is_some());
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Hash,
    {
        self.raw.lock().get(key).cloned()
    }
}

impl<K: Ord + Clone, V> WgbTreeMap<K, V> {
    /// The smallest key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::WgbTreeMap;
    ///
    /// let map = WgbTreeMap::from([(3, ()), (1, ()), (2, ())]);
    /// assert_eq!(map.get_min(), Some(1));
    /// assert_eq!(map.get_max(), Some(3));
    /// ```
    pub fn get_min(&self) -> Option<K> {
        self.raw.lock().min().map(|entry| entry.key().clone())
    }

    /// The largest key, if any.
    pub fn get_max(&self) -> Option<K> {
        self.raw.lock().max().map(|entry| entry.key().clone())
    }

    /// All keys, in ascending order.
    pub fn key_set(&self) -> BTreeSet<K> {
        self.raw
            .lock()
            .all(Order::Ascending)
            .into_iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl<K: Ord, V: Clone> WgbTreeMap<K, V> {
    /// All values, in ascending key order.
    pub fn value_collection(&self) -> Vec<V> {
        self.raw
            .lock()
            .all(Order::Ascending)
            .into_iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl<K: Ord + Clone, V: Clone> WgbTreeMap<K, V> {
    /// Copies of all entries, ordered by key.
    pub fn entry_set(&self) -> BTreeSet<Entry<K, V>> {
        self.raw
            .lock()
            .all(Order::Ascending)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl<K: Clone, V: Clone> Clone for WgbTreeMap<K, V> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.lock().clone())
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for WgbTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.raw.lock();
        f.debug_map()
            .entries(
                raw.all(Order::Ascending)
                    .into_iter()
                    .map(|entry| (entry.key(), entry.value())),
            )
            .finish()
    }
}

impl<K, V> Default for WgbTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Hash, V> FromIterator<(K, V)> for WgbTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord + Hash, V> Extend<(K, V)> for WgbTreeMap<K, V> {
    // Exclusive access: the iterator cannot reach this map, so no lock is taken.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let raw = self.raw.get_mut();
        for (key, value) in iter {
            raw.put(Entry::new(key, value));
        }
    }
}

impl<K: Ord + Hash, V, const N: usize> From<[(K, V); N]> for WgbTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        Self::from_iter(arr)
    }
}

impl<K: Ord + Hash + Clone, V: Clone> QueryableMap<K, V> for WgbTreeMap<K, V> {
    fn get(&self, key: &K) -> Option<Entry<K, V>> {
        WgbTreeMap::get(self, key)
    }

    fn put(&self, key: K, value: V) -> Option<V> {
        WgbTreeMap::put(self, key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        WgbTreeMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        WgbTreeMap::contains_key(self, key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        WgbTreeMap::contains_value(self, value)
    }

    fn get_min(&self) -> Option<K> {
        WgbTreeMap::get_min(self)
    }

    fn get_max(&self) -> Option<K> {
        WgbTreeMap::get_max(self)
    }

    fn greater_than(&self, key: &K, order: Order) -> Vec<Entry<K, V>> {
        WgbTreeMap::greater_than(self, key, order)
    }

    fn greater_than_or_equal(&self, key: &K, order: Order) -> Vec<Entry<K, V>> {
        WgbTreeMap::greater_than_or_equal(self, key, order)
    }

    fn less_than(&self, key: &K, order: Order) -> Vec<Entry<K, V>> {
        WgbTreeMap::less_than(self, key, order)
    }

    fn less_than_or_equal(&self, key: &K, order: Order) -> Vec<Entry<K, V>> {
        WgbTreeMap::less_than_or_equal(self, key, order)
    }

    fn between(&self, low: &K, high: &K, order: Order) -> Vec<Entry<K, V>> {
        WgbTreeMap::between(self, low, high, order)
    }

    fn not_equal(&self, key: &K, order: Order) -> Vec<Entry<K, V>> {
        WgbTreeMap::not_equal(self, key, order)
    }

    fn all_ascending(&self) -> Vec<Entry<K, V>> {
        WgbTreeMap::all_ascending(self)
    }

    fn all_descending(&self) -> Vec<Entry<K, V>> {
        WgbTreeMap::all_descending(self)
    }

    fn depth(&self) -> usize {
        WgbTreeMap::depth(self)
    }

    fn node_count(&self) -> usize {
        WgbTreeMap::node_count(self)
    }

    fn empty_node_count(&self) -> usize {
        WgbTreeMap::empty_node_count(self)
    }

    fn size(&self) -> usize {
        WgbTreeMap::size(self)
    }

    fn is_empty(&self) -> bool {
        WgbTreeMap::is_empty(self)
    }

    fn name(&self) -> &'static str {
        WgbTreeMap::name(self)
    }

    fn put_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        WgbTreeMap::put_all(self, entries);
    }

    fn clear(&self) {
        WgbTreeMap::clear(self);
    }

    fn key_set(&self) -> BTreeSet<K> {
        WgbTreeMap::key_set(self)
    }

    fn value_collection(&self) -> Vec<V> {
        WgbTreeMap::value_collection(self)
    }

    fn entry_set(&self) -> BTreeSet<Entry<K, V>> {
        WgbTreeMap::entry_set(self)
    }
}
