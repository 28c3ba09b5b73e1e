use core::borrow::Borrow;
use core::cmp::Ordering;

use super::capacity::Capacity;
use crate::entry::{Entry, KeyProbe};

/// Owning slot for a Grey node.
pub(crate) type GreySlot<K, V> = Option<Box<GreyNode<K, V>>>;
/// Owning slot for a White or Black node.
pub(crate) type BucketSlot<K, V> = Option<Box<BucketNode<K, V>>>;

/// Role of a bucket node relative to its parent Grey node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    /// Holds keys below the parent's pivot; its own pivot is its subtree's minimum.
    White,
    /// Holds keys above the parent's pivot; its own pivot is its subtree's maximum.
    Black,
}

impl Side {
    /// The extreme this side keeps as its pivot.
    #[inline]
    pub(crate) const fn extreme(self) -> Extreme {
        match self {
            Self::White => Extreme::Min,
            Self::Black => Extreme::Max,
        }
    }
}

/// Which end of a subtree an operation works on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Extreme {
    Min,
    Max,
}

impl Extreme {
    /// Returns `true` if `candidate` lies strictly further toward this extreme
    /// than `incumbent`.
    #[inline]
    pub(crate) fn beats<T: Ord + ?Sized>(self, candidate: &T, incumbent: &T) -> bool {
        matches!(
            (self, candidate.cmp(incumbent)),
            (Self::Min, Ordering::Less) | (Self::Max, Ordering::Greater)
        )
    }
}

/// A comparison-ordered node with a White child below its pivot and a Black child
/// above it.
#[derive(Clone)]
pub(crate) struct GreyNode<K, V> {
    pub(crate) entry: Entry<K, V>,
    pub(crate) depth: usize,
    pub(crate) white: BucketSlot<K, V>,
    pub(crate) black: BucketSlot<K, V>,
}

impl<K, V> GreyNode<K, V> {
    pub(crate) fn new(entry: Entry<K, V>) -> Self {
        Self {
            entry,
            depth: 1,
            white: None,
            black: None,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.white.is_none() && self.black.is_none()
    }

    pub(crate) fn child(&self, side: Side) -> Option<&BucketNode<K, V>> {
        match side {
            Side::White => self.white.as_deref(),
            Side::Black => self.black.as_deref(),
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut BucketSlot<K, V> {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    pub(crate) fn refresh_depth(&mut self) {
        self.depth = 1 + bucket_depth(&self.white).max(bucket_depth(&self.black));
    }

    /// The extreme entry of this subtree: White's pivot (or our own) for the
    /// minimum, Black's pivot (or our own) for the maximum.
    pub(crate) fn extreme_entry(&self, extreme: Extreme) -> &Entry<K, V> {
        let side = match extreme {
            Extreme::Min => Side::White,
            Extreme::Max => Side::Black,
        };
        self.child(side).map_or(&self.entry, |child| &child.entry)
    }
}

/// A White or Black node: a pivot plus a prime number of hash buckets, each holding
/// a Grey subtree.
#[derive(Clone)]
pub(crate) struct BucketNode<K, V> {
    pub(crate) entry: Entry<K, V>,
    pub(crate) depth: usize,
    pub(crate) side: Side,
    pub(crate) capacity: Capacity,
    /// Empty until the first entry is pushed down, then exactly `capacity` slots.
    pub(crate) buckets: Vec<GreySlot<K, V>>,
}

impl<K, V> BucketNode<K, V> {
    pub(crate) fn new(entry: Entry<K, V>, side: Side, capacity: Capacity) -> Self {
        Self {
            entry,
            depth: 1,
            side,
            capacity,
            buckets: Vec::new(),
        }
    }

    /// The slot for bucket `index`, allocating the bucket array on first use.
    pub(crate) fn bucket_mut(&mut self, index: usize) -> &mut GreySlot<K, V> {
        if self.buckets.is_empty() {
            self.buckets.resize_with(self.capacity.get(), || None);
        }
        &mut self.buckets[index]
    }

    pub(crate) fn bucket(&self, index: usize) -> Option<&GreyNode<K, V>> {
        self.buckets.get(index).and_then(|slot| slot.as_deref())
    }

    /// Present bucket subtrees with their indices.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, &GreyNode<K, V>)> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|node| (index, node)))
    }

    pub(crate) fn refresh_depth(&mut self) {
        self.depth = 1 + self.buckets.iter().map(grey_depth).max().unwrap_or(0);
    }
}

#[inline]
pub(crate) fn grey_depth<K, V>(slot: &GreySlot<K, V>) -> usize {
    slot.as_ref().map_or(0, |node| node.depth)
}

#[inline]
pub(crate) fn bucket_depth<K, V>(slot: &BucketSlot<K, V>) -> usize {
    slot.as_ref().map_or(0, |node| node.depth)
}

/// A borrowed view of either node shape, for walks that treat every node alike.
pub(crate) enum NodeRef<'a, K, V> {
    Grey(&'a GreyNode<K, V>),
    Bucket(&'a BucketNode<K, V>),
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn entry(self) -> &'a Entry<K, V> {
        match self {
            Self::Grey(node) => &node.entry,
            Self::Bucket(node) => &node.entry,
        }
    }

    /// Present children, as views.
    pub(crate) fn children(self) -> Vec<NodeRef<'a, K, V>> {
        match self {
            Self::Grey(node) => [node.white.as_deref(), node.black.as_deref()]
                .into_iter()
                .flatten()
                .map(NodeRef::Bucket)
                .collect(),
            Self::Bucket(node) => node.occupied().map(|(_, child)| NodeRef::Grey(child)).collect(),
        }
    }

    /// Child slots that exist but hold nothing.
    ///
    /// A Grey node counts its missing children only while it has at least one, so
    /// a node whose children were all pruned reports 0, like a fresh leaf. A bucket
    /// node counts its empty buckets once its bucket array is allocated, and keeps
    /// the array after its buckets empty out.
    pub(crate) fn empty_slots(self) -> usize {
        match self {
            Self::Grey(node) if node.is_leaf() => 0,
            Self::Grey(node) => usize::from(node.white.is_none()) + usize::from(node.black.is_none()),
            Self::Bucket(node) => node.buckets.iter().filter(|slot| slot.is_none()).count(),
        }
    }

    /// One step of a point lookup: the child that may hold `probe`, or `None` if
    /// the search ends here. The caller checks this node's own pivot first.
    pub(crate) fn step<Q>(self, probe: KeyProbe<'_, Q>) -> Option<NodeRef<'a, K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self {
            Self::Grey(node) => match probe.get().cmp(node.entry.key().borrow()) {
                Ordering::Less => node.white.as_deref().map(NodeRef::Bucket),
                Ordering::Greater => node.black.as_deref().map(NodeRef::Bucket),
                Ordering::Equal => None,
            },
            Self::Bucket(node) => {
                if node.side.extreme().beats(probe.get(), node.entry.key().borrow()) {
                    return None;
                }
                node.bucket(node.capacity.index_of(probe.hash_code())).map(NodeRef::Grey)
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn buckets_allocate_lazily() {
        let capacity = Capacity::new(5).unwrap();
        let mut node = BucketNode::new(Entry::new(1, ()), Side::White, capacity);
        assert!(node.buckets.is_empty());
        assert_eq!(NodeRef::Bucket(&node).empty_slots(), 0);

        *node.bucket_mut(3) = Some(Box::new(GreyNode::new(Entry::new(8, ()))));
        assert_eq!(node.buckets.len(), 5);
        assert_eq!(NodeRef::Bucket(&node).empty_slots(), 4);

        node.refresh_depth();
        assert_eq!(node.depth, 2);
        assert_eq!(node.occupied().map(|(i, _)| i).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn grey_extremes_fall_back_to_own_pivot() {
        let mut grey = GreyNode::new(Entry::new(10, ()));
        assert_eq!(grey.extreme_entry(Extreme::Min).key(), &10);
        assert_eq!(NodeRef::Grey(&grey).empty_slots(), 0);

        grey.white = Some(Box::new(BucketNode::new(Entry::new(3, ()), Side::White, Capacity::FIRST)));
        grey.refresh_depth();
        assert_eq!(grey.depth, 2);
        assert_eq!(grey.extreme_entry(Extreme::Min).key(), &3);
        assert_eq!(grey.extreme_entry(Extreme::Max).key(), &10);
        assert_eq!(NodeRef::Grey(&grey).empty_slots(), 1);
    }

    #[test]
    fn extremes_compare_strictly() {
        assert!(Extreme::Min.beats(&1, &2));
        assert!(!Extreme::Min.beats(&2, &2));
        assert!(Extreme::Max.beats(&3, &2));
        assert_eq!(Side::Black.extreme(), Extreme::Max);
    }
}
