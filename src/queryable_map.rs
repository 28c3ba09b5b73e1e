use std::collections::BTreeSet;

use crate::entry::Entry;
use crate::order::Order;

/// An ordered map that answers point lookups and range queries.
///
/// Every method takes `&self`: implementations synchronise internally, so a map can
/// be shared between threads behind an `Arc` without further locking. Results are
/// owned snapshots taken while the map was locked.
///
/// Range queries return entries sorted by key in the requested [`Order`].
pub trait QueryableMap<K, V> {
    /// Returns the entry for `key`, if present.
    fn get(&self, key: &K) -> Option<Entry<K, V>>;

    /// Associates `value` with `key`, returning the value it replaced.
    fn put(&self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value if it was present.
    fn remove(&self, key: &K) -> Option<V>;

    fn contains_key(&self, key: &K) -> bool;

    /// Returns `true` if any entry holds `value`. This visits every entry.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq;

    /// The smallest key.
    fn get_min(&self) -> Option<K>;

    /// The largest key.
    fn get_max(&self) -> Option<K>;

    /// Entries with keys strictly greater than `key`.
    fn greater_than(&self, key: &K, order: Order) -> Vec<Entry<K, V>>;

    /// Entries with keys greater than or equal to `key`.
    fn greater_than_or_equal(&self, key: &K, order: Order) -> Vec<Entry<K, V>>;

    /// Entries with keys strictly less than `key`.
    fn less_than(&self, key: &K, order: Order) -> Vec<Entry<K, V>>;

    /// Entries with keys less than or equal to `key`.
    fn less_than_or_equal(&self, key: &K, order: Order) -> Vec<Entry<K, V>>;

    /// Entries with keys in `low..=high`. Empty when `low > high`.
    fn between(&self, low: &K, high: &K, order: Order) -> Vec<Entry<K, V>>;

    /// Every entry except the one for `key`.
    fn not_equal(&self, key: &K, order: Order) -> Vec<Entry<K, V>>;

    fn all_ascending(&self) -> Vec<Entry<K, V>>;

    fn all_descending(&self) -> Vec<Entry<K, V>>;

    /// Number of levels in the underlying structure; 0 when empty.
    fn depth(&self) -> usize;

    /// Number of nodes in the underlying structure.
    fn node_count(&self) -> usize;

    /// Number of allocated child slots that hold nothing.
    fn empty_node_count(&self) -> usize;

    /// Number of entries.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// A short identifier for the implementation.
    fn name(&self) -> &'static str;

    /// Puts every pair from `entries`, in iteration order.
    fn put_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        Self: Sized,
    {
        for (key, value) in entries {
            self.put(key, value);
        }
    }

    /// Removes every entry.
    fn clear(&self);

    fn key_set(&self) -> BTreeSet<K>;

    /// Values in ascending key order.
    fn value_collection(&self) -> Vec<V>;

    fn entry_set(&self) -> BTreeSet<Entry<K, V>>;
}
