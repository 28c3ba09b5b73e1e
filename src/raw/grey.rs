//! Operations on Grey nodes.
//!
//! Grey nodes route purely by comparison: keys below the pivot go to the White
//! child, keys above it to the Black child. They are also where the tree
//! rebalances, by moving the pivot to whichever side is shallower.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use tracing::trace;

use super::bucket;
use super::capacity::Capacity;
use super::node::{Extreme, GreyNode, GreySlot, Side, bucket_depth};
use super::query::Query;
use crate::entry::{Entry, KeyProbe};
use crate::error::WgbError;
use crate::order::Order;

/// Upper bound on rotations after a single insert or delete.
pub(crate) const MAX_ROTATIONS: usize = 10;

/// An insert that did not happen. The entry is handed back untouched.
pub(crate) struct Refused<K, V> {
    pub(crate) reason: WgbError,
    pub(crate) entry: Entry<K, V>,
}

impl<K, V> Refused<K, V> {
    pub(crate) fn conflict(entry: Entry<K, V>) -> Self {
        Self {
            reason: WgbError::UniquenessConflict,
            entry,
        }
    }
}

/// Verdict of the depth heuristic for a Grey node's two children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Balance {
    LeftHeavy,
    Balanced,
    RightHeavy,
}

impl Balance {
    /// Shallow pairs (both depths at most 5) tolerate a difference of 2. Deeper
    /// pairs tolerate a White/Black depth ratio within `[0.8, 1.25]`.
    pub(crate) fn of(white: usize, black: usize) -> Self {
        if white <= 5 && black <= 5 {
            return match white.abs_diff(black) {
                0..=2 => Self::Balanced,
                _ if white > black => Self::LeftHeavy,
                _ => Self::RightHeavy,
            };
        }

        // white / black > 1.25, with an empty Black side counting as infinitely heavy.
        if 4 * white > 5 * black {
            Self::LeftHeavy
        } else if 5 * white < 4 * black {
            Self::RightHeavy
        } else {
            Self::Balanced
        }
    }
}

pub(crate) fn insert<K: Ord, V>(
    slot: &mut GreySlot<K, V>,
    capacity: Capacity,
    entry: Entry<K, V>,
) -> Result<(), Refused<K, V>> {
    let Some(node) = slot.as_deref_mut() else {
        *slot = Some(Box::new(GreyNode::new(entry)));
        return Ok(());
    };

    match entry.key().cmp(node.entry.key()) {
        Ordering::Less => bucket::insert(&mut node.white, Side::White, capacity, entry)?,
        Ordering::Greater => bucket::insert(&mut node.black, Side::Black, capacity, entry)?,
        Ordering::Equal => return Err(Refused::conflict(entry)),
    }

    node.refresh_depth();
    rotate_until_balance(node);
    Ok(())
}

/// Removes the entry for `probe` from the subtree in `slot`, pruning the node if it
/// ends up empty.
pub(crate) fn delete<K, V, Q>(slot: &mut GreySlot<K, V>, probe: KeyProbe<'_, Q>) -> Result<Entry<K, V>, WgbError>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    let Some(node) = slot.as_deref_mut() else {
        return Err(WgbError::NotFound);
    };

    let removed = match probe.get().cmp(node.entry.key().borrow()) {
        Ordering::Less => bucket::delete(&mut node.white, probe)?,
        Ordering::Greater => bucket::delete(&mut node.black, probe)?,
        Ordering::Equal => {
            let replacement = match bucket::pop(&mut node.white, Extreme::Max) {
                Some(entry) => Some(entry),
                None => bucket::pop(&mut node.black, Extreme::Min),
            };
            match replacement {
                Some(replacement) => mem::replace(&mut node.entry, replacement),
                None => {
                    trace!("pruning emptied grey node");
                    return slot.take().map(|node| node.entry).ok_or(WgbError::NotFound);
                }
            }
        }
    };

    node.refresh_depth();
    rotate_until_balance(node);
    Ok(removed)
}

/// Removes and returns the smallest or largest entry of the subtree in `slot`.
pub(crate) fn pop<K: Ord, V>(slot: &mut GreySlot<K, V>, extreme: Extreme) -> Option<Entry<K, V>> {
    let node = slot.as_deref_mut()?;
    let (near, far) = match extreme {
        Extreme::Min => (Side::White, Side::Black),
        Extreme::Max => (Side::Black, Side::White),
    };

    if node.child(near).is_some() {
        let popped = bucket::pop(node.child_mut(near), extreme);
        node.refresh_depth();
        return popped;
    }

    // Our own pivot is the extreme; the far side's nearest entry replaces it.
    match bucket::pop(node.child_mut(far), extreme) {
        Some(replacement) => {
            let popped = mem::replace(&mut node.entry, replacement);
            node.refresh_depth();
            Some(popped)
        }
        None => slot.take().map(|node| node.entry),
    }
}

/// Moves one entry across the pivot if the children's depths are out of balance.
pub(crate) fn rotate<K: Ord, V>(node: &mut GreyNode<K, V>) -> Balance {
    if node.is_leaf() {
        node.depth = 1;
        return Balance::Balanced;
    }

    let balance = Balance::of(bucket_depth(&node.white), bucket_depth(&node.black));
    let (heavy, light, extreme) = match balance {
        Balance::Balanced => return balance,
        Balance::LeftHeavy => (Side::White, Side::Black, Extreme::Max),
        Balance::RightHeavy => (Side::Black, Side::White, Extreme::Min),
    };

    let Some(capacity) = node.child(heavy).map(|child| child.capacity) else {
        return Balance::Balanced;
    };
    let Some(promoted) = bucket::pop(node.child_mut(heavy), extreme) else {
        return Balance::Balanced;
    };

    let demoted = mem::replace(&mut node.entry, promoted);
    if let Err(refused) = bucket::insert(node.child_mut(light), light, capacity, demoted) {
        panic!(
            "`grey::rotate()` - {}",
            WgbError::InvariantViolation(match refused.reason {
                WgbError::UniquenessConflict => "demoted pivot collided with a live key",
                _ => "demoted pivot could not be reinserted",
            })
        );
    }

    node.refresh_depth();
    trace!(?balance, depth = node.depth, "rotated grey node");
    balance
}

pub(crate) fn rotate_until_balance<K: Ord, V>(node: &mut GreyNode<K, V>) {
    for _ in 0..MAX_ROTATIONS {
        if rotate(node) == Balance::Balanced {
            break;
        }
    }
}

/// Appends the entries of this subtree that match `query`, in `order`.
pub(crate) fn collect<'a, K, V, Q>(
    node: &'a GreyNode<K, V>,
    query: Query<'_, Q>,
    order: Order,
    out: &mut Vec<&'a Entry<K, V>>,
) where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    let pivot: &Q = node.entry.key().borrow();
    let below = node.white.as_deref().zip(query.below(pivot));
    let above = node.black.as_deref().zip(query.above(pivot));
    let (first, last) = match order {
        Order::Ascending => (below, above),
        Order::Descending => (above, below),
    };

    if let Some((child, narrowed)) = first {
        bucket::collect(child, narrowed, order, out);
    }
    if query.contains(pivot) {
        out.push(&node.entry);
    }
    if let Some((child, narrowed)) = last {
        bucket::collect(child, narrowed, order, out);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn grey_of(keys: &[i32]) -> GreySlot<i32, ()> {
        let mut slot = None;
        for &key in keys {
            assert!(insert(&mut slot, Capacity::FIRST, Entry::new(key, ())).is_ok());
        }
        slot
    }

    fn keys_of(slot: &GreySlot<i32, ()>, order: Order) -> Vec<i32> {
        let mut out = Vec::new();
        if let Some(node) = slot.as_deref() {
            collect(node, Query::<i32>::All, order, &mut out);
        }
        out.into_iter().map(|entry| *entry.key()).collect()
    }

    #[test]
    fn balance_heuristic() {
        assert_eq!(Balance::of(0, 0), Balance::Balanced);
        assert_eq!(Balance::of(3, 1), Balance::Balanced);
        assert_eq!(Balance::of(4, 1), Balance::LeftHeavy);
        assert_eq!(Balance::of(1, 4), Balance::RightHeavy);
        assert_eq!(Balance::of(5, 2), Balance::LeftHeavy);
        // Ratio rule once either side is deeper than 5.
        assert_eq!(Balance::of(6, 5), Balance::Balanced);
        assert_eq!(Balance::of(10, 8), Balance::Balanced);
        assert_eq!(Balance::of(11, 8), Balance::LeftHeavy);
        assert_eq!(Balance::of(8, 10), Balance::Balanced);
        assert_eq!(Balance::of(7, 10), Balance::RightHeavy);
        assert_eq!(Balance::of(6, 0), Balance::LeftHeavy);
        assert_eq!(Balance::of(0, 6), Balance::RightHeavy);
    }

    #[test]
    fn duplicate_insert_hands_entry_back() {
        let mut slot = grey_of(&[5, 3, 8]);
        let refused = insert(&mut slot, Capacity::FIRST, Entry::new(3, ())).err().unwrap();
        assert_eq!(refused.reason, WgbError::UniquenessConflict);
        assert_eq!(refused.entry.key(), &3);
        assert_eq!(keys_of(&slot, Order::Ascending), vec![3, 5, 8]);
    }

    #[test]
    fn sequential_inserts_stay_sorted_and_shallow() {
        let keys: Vec<i32> = (0..200).collect();
        let slot = grey_of(&keys);
        assert_eq!(keys_of(&slot, Order::Ascending), keys);
        assert!(slot.as_ref().unwrap().depth <= 2 * 8 + 2);
    }

    #[test]
    fn pops_drain_in_order() {
        let mut slot = grey_of(&[40, 10, 30, 20, 50, 0]);
        let mut mins = Vec::new();
        while let Some(entry) = pop(&mut slot, Extreme::Min) {
            mins.push(*entry.key());
        }
        assert_eq!(mins, vec![0, 10, 20, 30, 40, 50]);
        assert!(slot.is_none());

        let mut slot = grey_of(&[40, 10, 30, 20, 50, 0]);
        assert_eq!(pop(&mut slot, Extreme::Max).map(|e| *e.key()), Some(50));
        assert_eq!(keys_of(&slot, Order::Descending), vec![40, 30, 20, 10, 0]);
    }

    #[test]
    fn deleting_the_pivot_refills_from_white() {
        let mut slot = grey_of(&[5, 3, 8]);
        let removed = delete(&mut slot, KeyProbe::new(&5)).unwrap();
        assert_eq!(removed.key(), &5);
        assert_eq!(slot.as_ref().unwrap().entry.key(), &3);
        assert_eq!(delete(&mut slot, KeyProbe::new(&5)).err(), Some(WgbError::NotFound));
        assert_eq!(keys_of(&slot, Order::Ascending), vec![3, 8]);
    }

    #[test]
    fn last_delete_prunes_the_node() {
        let mut slot = grey_of(&[1]);
        assert!(delete(&mut slot, KeyProbe::new(&1)).is_ok());
        assert!(slot.is_none());
        assert_eq!(delete(&mut slot, KeyProbe::new(&1)).err(), Some(WgbError::NotFound));
    }
}
