use core::borrow::Borrow;
use core::hash::Hash;

use super::WgbTreeMap;
use crate::entry::{Entry, KeyProbe};
use crate::order::Order;
use crate::raw::Query;

impl<K: Ord + Hash + Clone, V: Clone> WgbTreeMap<K, V> {
    fn snapshot<Q>(&self, query: Query<'_, Q>, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.lock().collect(query, order).into_iter().cloned().collect()
    }

    /// Entries with keys strictly greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::{Order, WgbTreeMap};
    ///
    /// let map: WgbTreeMap<_, _> = (1..=5).map(|k| (k, k * 10)).collect();
    /// let keys: Vec<i32> = map.greater_than(&3, Order::Descending).iter().map(|e| *e.key()).collect();
    /// assert_eq!(keys, [5, 4]);
    /// ```
    pub fn greater_than<Q>(&self, key: &Q, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.snapshot(Query::GreaterThan(key), order)
    }

    /// Entries with keys greater than or equal to `key`.
    pub fn greater_than_or_equal<Q>(&self, key: &Q, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.snapshot(Query::GreaterOrEqual(key), order)
    }

    /// Entries with keys strictly less than `key`.
    ///
    /// The key may be any borrowed form of the map's key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::{Order, WgbTreeMap};
    ///
    /// let map = WgbTreeMap::from([("apple".to_owned(), 1), ("fig".to_owned(), 2), ("kiwi".to_owned(), 3)]);
    /// let fruit: Vec<String> = map.less_than("kiwi", Order::Descending).into_iter().map(|e| e.key().clone()).collect();
    /// assert_eq!(fruit, ["fig", "apple"]);
    /// ```
    pub fn less_than<Q>(&self, key: &Q, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.snapshot(Query::LessThan(key), order)
    }

    /// Entries with keys less than or equal to `key`.
    pub fn less_than_or_equal<Q>(&self, key: &Q, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.snapshot(Query::LessOrEqual(key), order)
    }

    /// Entries with keys in `low..=high`, or nothing if `low > high`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wgb_tree::{Order, WgbTreeMap};
    ///
    /// let map: WgbTreeMap<_, _> = (1..=5).map(|k| (k, ())).collect();
    /// let keys: Vec<i32> = map.between(&2, &4, Order::Ascending).iter().map(|e| *e.key()).collect();
    /// assert_eq!(keys, [2, 3, 4]);
    /// assert!(map.between(&4, &2, Order::Ascending).is_empty());
    /// ```
    pub fn between<Q>(&self, low: &Q, high: &Q, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if low > high {
            return Vec::new();
        }
        self.snapshot(Query::Between(low, high), order)
    }

    /// Every entry except the one for `key`.
    pub fn not_equal<Q>(&self, key: &Q, order: Order) -> Vec<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Hash,
    {
        self.snapshot(Query::NotEqual(KeyProbe::new(key)), order)
    }

    /// Every entry, smallest key first.
    pub fn all_ascending(&self) -> Vec<Entry<K, V>> {
        self.raw.lock().all(Order::Ascending).into_iter().cloned().collect()
    }

    /// Every entry, largest key first.
    pub fn all_descending(&self) -> Vec<Entry<K, V>> {
        self.raw.lock().all(Order::Descending).into_iter().cloned().collect()
    }
}
