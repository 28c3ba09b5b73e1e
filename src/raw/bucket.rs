//! Operations on White and Black nodes.
//!
//! Both shapes are handled by the same code, parameterised by [`Side`]: a White
//! node keeps its subtree's minimum as pivot, a Black node its maximum, and every
//! other key lives in the Grey subtree of bucket `hash mod capacity`.

use core::borrow::Borrow;
use core::mem;

use tracing::trace;

use super::capacity::Capacity;
use super::grey::{self, Refused};
use super::merge::merge;
use super::node::{BucketNode, BucketSlot, Extreme, Side};
use super::query::Query;
use crate::entry::{Entry, KeyProbe};
use crate::error::WgbError;
use crate::order::Order;

/// Inserts `entry` below the node in `slot`, creating a `side` node of `capacity`
/// buckets if the slot is empty.
///
/// A key that beats the pivot toward this side's extreme takes the pivot's place
/// and the old pivot moves down instead.
pub(crate) fn insert<K: Ord, V>(
    slot: &mut BucketSlot<K, V>,
    side: Side,
    capacity: Capacity,
    entry: Entry<K, V>,
) -> Result<(), Refused<K, V>> {
    let Some(node) = slot.as_deref_mut() else {
        *slot = Some(Box::new(BucketNode::new(entry, side, capacity)));
        return Ok(());
    };

    if entry.key() == node.entry.key() {
        return Err(Refused::conflict(entry));
    }

    let descending = if node.side.extreme().beats(entry.key(), node.entry.key()) {
        mem::replace(&mut node.entry, entry)
    } else {
        entry
    };

    let index = node.capacity.index_of(descending.wgb_key().hash_code());
    let next = node.capacity.next();
    grey::insert(node.bucket_mut(index), next, descending)?;
    node.refresh_depth();
    Ok(())
}

pub(crate) fn delete<K, V, Q>(slot: &mut BucketSlot<K, V>, probe: KeyProbe<'_, Q>) -> Result<Entry<K, V>, WgbError>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    let Some(node) = slot.as_deref_mut() else {
        return Err(WgbError::NotFound);
    };

    let extreme = node.side.extreme();
    if probe.get().cmp(node.entry.key().borrow()).is_eq() {
        return match take_extreme(node, extreme) {
            Some(replacement) => Ok(mem::replace(&mut node.entry, replacement)),
            None => {
                trace!(side = ?node.side, "pruning emptied bucket node");
                slot.take().map(|node| node.entry).ok_or(WgbError::NotFound)
            }
        };
    }

    // Nothing beyond the pivot's extreme is stored here.
    if extreme.beats(probe.get(), node.entry.key().borrow()) {
        return Err(WgbError::NotFound);
    }

    let index = node.capacity.index_of(probe.hash_code());
    let Some(bucket) = node.buckets.get_mut(index) else {
        return Err(WgbError::NotFound);
    };
    let removed = grey::delete(bucket, probe)?;
    node.refresh_depth();
    Ok(removed)
}

/// Removes and returns the smallest or largest entry of the subtree in `slot`.
pub(crate) fn pop<K: Ord, V>(slot: &mut BucketSlot<K, V>, extreme: Extreme) -> Option<Entry<K, V>> {
    let node = slot.as_deref_mut()?;

    if node.side.extreme() == extreme {
        // The pivot is the answer; the buckets supply its successor.
        return match take_extreme(node, extreme) {
            Some(replacement) => Some(mem::replace(&mut node.entry, replacement)),
            None => slot.take().map(|node| node.entry),
        };
    }

    match take_extreme(node, extreme) {
        Some(popped) => Some(popped),
        None => slot.take().map(|node| node.entry),
    }
}

/// Pops the `extreme` entry across all buckets, or `None` if every bucket is empty.
fn take_extreme<K: Ord, V>(node: &mut BucketNode<K, V>, extreme: Extreme) -> Option<Entry<K, V>> {
    let mut best: Option<(usize, &K)> = None;
    for (index, child) in node.occupied() {
        let candidate = child.extreme_entry(extreme).key();
        if best.is_none_or(|(_, incumbent)| extreme.beats(candidate, incumbent)) {
            best = Some((index, candidate));
        }
    }

    let (index, _) = best?;
    let popped = grey::pop(&mut node.buckets[index], extreme);
    node.refresh_depth();
    popped
}

/// Appends the entries of this subtree that match `query`, in `order`.
///
/// Buckets are unordered relative to each other, so each one is collected on its
/// own and the results are merged.
pub(crate) fn collect<'a, K, V, Q>(
    node: &'a BucketNode<K, V>,
    query: Query<'_, Q>,
    order: Order,
    out: &mut Vec<&'a Entry<K, V>>,
) where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    let pivot: &Q = node.entry.key().borrow();
    let narrowed = match node.side {
        Side::White => query.above(pivot),
        Side::Black => query.below(pivot),
    };

    let mut lists = Vec::new();
    if let Some(narrowed) = narrowed {
        for (index, child) in node.occupied() {
            let bucket_query = match narrowed {
                // The excluded key can only be in its own bucket.
                Query::NotEqual(excluded) if node.capacity.index_of(excluded.hash_code()) != index => Query::All,
                _ => narrowed,
            };
            let mut list = Vec::new();
            grey::collect(child, bucket_query, order, &mut list);
            if !list.is_empty() {
                lists.push(list);
            }
        }
    }

    let pivot_first = matches!(
        (node.side, order),
        (Side::White, Order::Ascending) | (Side::Black, Order::Descending)
    );
    let include_pivot = query.contains(pivot);

    if include_pivot && pivot_first {
        out.push(&node.entry);
    }
    out.extend(merge(lists, order));
    if include_pivot && !pivot_first {
        out.push(&node.entry);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bucket_of(side: Side, keys: &[i32]) -> BucketSlot<i32, ()> {
        let mut slot = None;
        for &key in keys {
            assert!(insert(&mut slot, side, Capacity::FIRST, Entry::new(key, ())).is_ok());
        }
        slot
    }

    fn keys_of(slot: &BucketSlot<i32, ()>, query: Query<'_, i32>, order: Order) -> Vec<i32> {
        let mut out = Vec::new();
        if let Some(node) = slot.as_deref() {
            collect(node, query, order, &mut out);
        }
        out.into_iter().map(|entry| *entry.key()).collect()
    }

    #[test]
    fn white_pivot_tracks_the_minimum() {
        let slot = bucket_of(Side::White, &[5, 9, 2, 7, 1]);
        let node = slot.as_deref().unwrap();
        assert_eq!(node.entry.key(), &1);
        assert_eq!(node.buckets.len(), 2);
        for (index, child) in node.occupied() {
            assert!(child.entry.key() > &1);
            assert_eq!(node.capacity.index_of(child.entry.wgb_key().hash_code()), index);
        }
    }

    #[test]
    fn black_pivot_tracks_the_maximum() {
        let slot = bucket_of(Side::Black, &[5, 9, 2, 11, 1]);
        assert_eq!(slot.as_deref().unwrap().entry.key(), &11);
        assert_eq!(keys_of(&slot, Query::All, Order::Descending), vec![11, 9, 5, 2, 1]);
        assert_eq!(keys_of(&slot, Query::All, Order::Ascending), vec![1, 2, 5, 9, 11]);
    }

    #[test]
    fn keys_beyond_the_pivot_are_not_found() {
        let mut slot = bucket_of(Side::White, &[5, 9]);
        assert_eq!(delete(&mut slot, KeyProbe::new(&4)).err(), Some(WgbError::NotFound));
        let mut slot = bucket_of(Side::Black, &[5, 9]);
        assert_eq!(delete(&mut slot, KeyProbe::new(&10)).err(), Some(WgbError::NotFound));
    }

    #[test]
    fn deleting_the_pivot_promotes_the_next_extreme() {
        let mut slot = bucket_of(Side::White, &[5, 9, 2, 7]);
        assert_eq!(delete(&mut slot, KeyProbe::new(&2)).map(|e| *e.key()), Ok(2));
        assert_eq!(slot.as_deref().unwrap().entry.key(), &5);
        assert_eq!(keys_of(&slot, Query::All, Order::Ascending), vec![5, 7, 9]);

        for key in [5, 7, 9] {
            assert!(delete(&mut slot, KeyProbe::new(&key)).is_ok());
        }
        assert!(slot.is_none());
    }

    #[test]
    fn pops_from_either_end() {
        let mut slot = bucket_of(Side::White, &[4, 8, 6, 2]);
        assert_eq!(pop(&mut slot, Extreme::Max).map(|e| *e.key()), Some(8));
        assert_eq!(pop(&mut slot, Extreme::Min).map(|e| *e.key()), Some(2));
        assert_eq!(keys_of(&slot, Query::All, Order::Ascending), vec![4, 6]);
    }

    #[test]
    fn not_equal_filters_only_the_excluded_key() {
        let keys: Vec<i32> = (0..40).collect();
        let slot = bucket_of(Side::White, &keys);
        let excluded = 17;
        let expected: Vec<i32> = keys.iter().copied().filter(|&k| k != excluded).collect();
        assert_eq!(
            keys_of(&slot, Query::NotEqual(KeyProbe::new(&excluded)), Order::Ascending),
            expected
        );
    }
}
