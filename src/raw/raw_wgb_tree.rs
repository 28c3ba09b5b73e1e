use core::borrow::Borrow;
use core::hash::Hash;

use tracing::debug;

use super::capacity::Capacity;
use super::grey::{self, Refused};
use super::node::{Extreme, GreySlot, NodeRef};
use super::query::Query;
use crate::entry::{Entry, KeyProbe};
use crate::error::WgbError;
use crate::order::Order;

/// The unsynchronised White-Grey-Black tree backing `WgbTreeMap`.
#[derive(Clone)]
pub(crate) struct RawWgbTree<K, V> {
    /// The root Grey node, if the tree is non-empty.
    root: GreySlot<K, V>,
    /// Total number of entries in the tree.
    len: usize,
    /// Bucket capacity of the root's White and Black children.
    first_capacity: Capacity,
}

impl<K, V> RawWgbTree<K, V> {
    pub(crate) const fn new(first_capacity: Capacity) -> Self {
        Self {
            root: None,
            len: 0,
            first_capacity,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn first_capacity(&self) -> Capacity {
        self.first_capacity
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.as_deref().map(NodeRef::Grey)
    }

    /// Depth of the tree, counting every node shape; 0 when empty.
    pub(crate) fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.depth)
    }

    pub(crate) fn node_count(&self) -> usize {
        fn count<K, V>(node: NodeRef<'_, K, V>) -> usize {
            1 + node.children().into_iter().map(count).sum::<usize>()
        }
        self.root().map_or(0, count)
    }

    pub(crate) fn empty_node_count(&self) -> usize {
        fn count<K, V>(node: NodeRef<'_, K, V>) -> usize {
            node.empty_slots() + node.children().into_iter().map(count).sum::<usize>()
        }
        self.root().map_or(0, count)
    }

    pub(crate) fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        fn search<K, V: PartialEq>(node: NodeRef<'_, K, V>, value: &V) -> bool {
            node.entry().value() == value || node.children().into_iter().any(|child| search(child, value))
        }
        self.root().is_some_and(|root| search(root, value))
    }
}

impl<K: Ord, V> RawWgbTree<K, V> {
    /// Inserts `entry`, handing it back if its key is already present.
    pub(crate) fn insert(&mut self, entry: Entry<K, V>) -> Result<(), Refused<K, V>> {
        grey::insert(&mut self.root, self.first_capacity, entry)?;
        self.len += 1;
        Ok(())
    }

    fn delete_probe<Q>(&mut self, probe: KeyProbe<'_, Q>) -> Result<Entry<K, V>, WgbError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed = grey::delete(&mut self.root, probe)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Inserts `entry`, replacing any entry with the same key. The replaced entry is
    /// deleted and the new one inserted afresh, so its position in the tree may
    /// change.
    pub(crate) fn put(&mut self, entry: Entry<K, V>) -> Option<Entry<K, V>> {
        let refused = match self.insert(entry) {
            Ok(()) => return None,
            Err(refused) => refused,
        };
        debug!(reason = %refused.reason, "replacing existing entry");

        let replaced = match self.delete_probe(refused.entry.probe()) {
            Ok(replaced) => replaced,
            Err(_) => panic!(
                "`RawWgbTree::put()` - {}",
                WgbError::InvariantViolation("conflicting key could not be deleted")
            ),
        };
        if self.insert(refused.entry).is_err() {
            panic!(
                "`RawWgbTree::put()` - {}",
                WgbError::InvariantViolation("entry was refused after its key was deleted")
            );
        }
        Some(replaced)
    }

    /// The smallest entry.
    pub(crate) fn min(&self) -> Option<&Entry<K, V>> {
        self.root.as_deref().map(|root| root.extreme_entry(Extreme::Min))
    }

    /// The largest entry.
    pub(crate) fn max(&self) -> Option<&Entry<K, V>> {
        self.root.as_deref().map(|root| root.extreme_entry(Extreme::Max))
    }

    /// Entries matching `query`, in `order`.
    pub(crate) fn collect<Q>(&self, query: Query<'_, Q>, order: Order) -> Vec<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut out = Vec::with_capacity(match query {
            Query::All => self.len,
            _ => 0,
        });
        if let Some(root) = self.root.as_deref() {
            grey::collect(root, query, order, &mut out);
        }
        out
    }

    /// Every entry, in `order`.
    pub(crate) fn all(&self, order: Order) -> Vec<&Entry<K, V>> {
        self.collect(Query::<K>::All, order)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Hash,
    {
        let probe = KeyProbe::new(key);
        let mut node = self.root()?;
        loop {
            if key.cmp(node.entry().key().borrow()).is_eq() {
                return Some(node.entry());
            }
            node = node.step(probe)?;
        }
    }

    /// Removes the entry for `key`.
    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Result<Entry<K, V>, WgbError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord + Hash,
    {
        self.delete_probe(KeyProbe::new(key))
    }
}

/// Exclusive lower and upper key bounds of a subtree.
#[cfg(test)]
type Bounds<'a, K> = (Option<&'a K>, Option<&'a K>);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
impl<K: Ord + core::fmt::Debug, V> RawWgbTree<K, V> {
    /// Validates the structural invariants of the tree. Panics with a description
    /// of every violation found.
    pub(crate) fn validate_invariants(&self) {
        use super::node::{BucketNode, GreyNode, Side};

        fn within<K: Ord>(key: &K, (low, high): Bounds<'_, K>) -> bool {
            low.is_none_or(|low| key > low) && high.is_none_or(|high| key < high)
        }

        fn check_grey<'a, K: Ord + core::fmt::Debug, V>(
            node: &'a GreyNode<K, V>,
            bounds: Bounds<'a, K>,
            capacity: Capacity,
            entries: &mut Vec<&'a Entry<K, V>>,
            errors: &mut Vec<String>,
        ) -> usize {
            let key = node.entry.key();
            if !within(key, bounds) {
                errors.push(format!("grey pivot {key:?} escapes its bounds"));
            }
            entries.push(&node.entry);

            let white = node.white.as_deref().map_or(0, |child| {
                if child.side != Side::White {
                    errors.push(format!("white child of {key:?} has side {:?}", child.side));
                }
                check_bucket(child, (bounds.0, Some(key)), capacity, entries, errors)
            });
            let black = node.black.as_deref().map_or(0, |child| {
                if child.side != Side::Black {
                    errors.push(format!("black child of {key:?} has side {:?}", child.side));
                }
                check_bucket(child, (Some(key), bounds.1), capacity, entries, errors)
            });

            let depth = 1 + white.max(black);
            if node.depth != depth {
                errors.push(format!("grey {key:?} has depth {} but should have {depth}", node.depth));
            }
            depth
        }

        fn check_bucket<'a, K: Ord + core::fmt::Debug, V>(
            node: &'a BucketNode<K, V>,
            bounds: Bounds<'a, K>,
            capacity: Capacity,
            entries: &mut Vec<&'a Entry<K, V>>,
            errors: &mut Vec<String>,
        ) -> usize {
            let key = node.entry.key();
            if !within(key, bounds) {
                errors.push(format!("{:?} pivot {key:?} escapes its bounds", node.side));
            }
            if node.capacity != capacity {
                errors.push(format!(
                    "{:?} node {key:?} has capacity {} but should have {}",
                    node.side,
                    node.capacity.get(),
                    capacity.get()
                ));
            }
            if !node.buckets.is_empty() && node.buckets.len() != node.capacity.get() {
                errors.push(format!("{:?} node {key:?} has {} buckets", node.side, node.buckets.len()));
            }
            entries.push(&node.entry);

            // White buckets hold keys above the pivot, Black buckets keys below it.
            let child_bounds = match node.side {
                Side::White => (Some(key), bounds.1),
                Side::Black => (bounds.0, Some(key)),
            };
            let mut deepest = 0;
            for (index, child) in node.occupied() {
                let mut subtree = Vec::new();
                let depth = check_grey(child, child_bounds, node.capacity.next(), &mut subtree, errors);
                deepest = deepest.max(depth);
                for entry in &subtree {
                    let placed = node.capacity.index_of(entry.wgb_key().hash_code());
                    if placed != index {
                        errors.push(format!("{:?} found in bucket {index}, hashes to {placed}", entry.key()));
                    }
                }
                entries.extend(subtree);
            }

            let depth = 1 + deepest;
            if node.depth != depth {
                errors.push(format!("{:?} {key:?} has depth {} but should have {depth}", node.side, node.depth));
            }
            depth
        }

        let mut errors = Vec::new();
        let mut entries = Vec::new();
        let depth = self
            .root
            .as_deref()
            .map_or(0, |root| check_grey(root, (None, None), self.first_capacity, &mut entries, &mut errors));
        if depth != self.depth() {
            errors.push(format!("tree depth {} but root depth {depth}", self.depth()));
        }
        if entries.len() != self.len {
            errors.push(format!("len is {} but the tree holds {} entries", self.len, entries.len()));
        }

        let ascending = self.all(Order::Ascending);
        if ascending.len() != entries.len() || ascending.windows(2).any(|pair| pair[0].key() >= pair[1].key()) {
            errors.push("full scan is not strictly ascending over every entry".to_owned());
        }

        assert!(errors.is_empty(), "tree invariants violated:\n{}", errors.join("\n"));
    }
}
