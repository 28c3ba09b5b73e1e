use core::cmp::Ordering;

use crate::entry::KeyProbe;

/// A boundary description for a range query.
///
/// As a traversal descends, the query is narrowed for each side of a pivot with
/// [`Query::below`] and [`Query::above`]. Narrowing either proves nothing on that
/// side can match (`None`), proves everything does (`Some(Query::All)`), or
/// returns a query that still needs checking.
///
/// Boundaries borrow `Q`, any form of the stored key type `K` with `K: Borrow<Q>`.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Query<'q, Q: ?Sized> {
    All,
    GreaterThan(&'q Q),
    GreaterOrEqual(&'q Q),
    LessThan(&'q Q),
    LessOrEqual(&'q Q),
    /// Inclusive at both ends.
    Between(&'q Q, &'q Q),
    /// Carries the excluded key's hash so bucket nodes can tell which bucket may
    /// hold it.
    NotEqual(KeyProbe<'q, Q>),
}

// `Copy` for any `Q`: the query only borrows keys.
impl<Q: ?Sized> Clone for Query<'_, Q> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q: ?Sized> Copy for Query<'_, Q> {}

impl<'q, Q: Ord + ?Sized> Query<'q, Q> {
    pub(crate) fn contains(&self, key: &Q) -> bool {
        match *self {
            Self::All => true,
            Self::GreaterThan(bound) => key > bound,
            Self::GreaterOrEqual(bound) => key >= bound,
            Self::LessThan(bound) => key < bound,
            Self::LessOrEqual(bound) => key <= bound,
            Self::Between(low, high) => low <= key && key <= high,
            Self::NotEqual(excluded) => key != excluded.get(),
        }
    }

    /// The query restricted to keys strictly below `pivot`.
    pub(crate) fn below(self, pivot: &Q) -> Option<Self> {
        match self {
            Self::All => Some(Self::All),
            Self::GreaterThan(bound) | Self::GreaterOrEqual(bound) => (pivot > bound).then_some(self),
            Self::LessThan(bound) | Self::LessOrEqual(bound) => Some(if pivot <= bound { Self::All } else { self }),
            Self::NotEqual(excluded) => Some(if pivot <= excluded.get() { Self::All } else { self }),
            Self::Between(low, high) => match (pivot.cmp(low), pivot.cmp(high)) {
                (Ordering::Less | Ordering::Equal, _) => None,
                (_, Ordering::Less | Ordering::Equal) => Some(Self::GreaterOrEqual(low)),
                _ => Some(self),
            },
        }
    }

    /// The query restricted to keys strictly above `pivot`.
    pub(crate) fn above(self, pivot: &Q) -> Option<Self> {
        match self {
            Self::All => Some(Self::All),
            Self::LessThan(bound) | Self::LessOrEqual(bound) => (pivot < bound).then_some(self),
            Self::GreaterThan(bound) | Self::GreaterOrEqual(bound) => Some(if pivot >= bound { Self::All } else { self }),
            Self::NotEqual(excluded) => Some(if pivot >= excluded.get() { Self::All } else { self }),
            Self::Between(low, high) => match (pivot.cmp(high), pivot.cmp(low)) {
                (Ordering::Greater | Ordering::Equal, _) => None,
                (_, Ordering::Greater | Ordering::Equal) => Some(Self::LessOrEqual(high)),
                _ => Some(self),
            },
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn queries<'q>(a: &'q i32, b: &'q i32) -> [Query<'q, i32>; 7] {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        [
            Query::All,
            Query::GreaterThan(a),
            Query::GreaterOrEqual(a),
            Query::LessThan(a),
            Query::LessOrEqual(a),
            Query::Between(low, high),
            Query::NotEqual(KeyProbe::new(a)),
        ]
    }

    #[test]
    fn between_narrows_to_half_open_sides() {
        let (low, high) = (10, 20);
        let query = Query::Between(&low, &high);
        assert_eq!(query.below(&10), None);
        assert_eq!(query.below(&15), Some(Query::GreaterOrEqual(&low)));
        assert_eq!(query.below(&25), Some(query));
        assert_eq!(query.above(&20), None);
        assert_eq!(query.above(&15), Some(Query::LessOrEqual(&high)));
        assert_eq!(query.above(&5), Some(query));
    }

    #[test]
    fn boundaries_may_be_unsized() {
        let query: Query<'_, str> = Query::Between("b", "d");
        assert!(query.contains("c"));
        assert!(!query.contains("e"));
        assert_eq!(query.below("c"), Some(Query::GreaterOrEqual("b")));
        assert_eq!(query.above("d"), None);
    }

    proptest! {
        // Narrowing must agree with `contains` for every key on that side.
        #[test]
        fn narrowing_is_sound(a in -20i32..20, b in -20i32..20, pivot in -20i32..20) {
            for query in queries(&a, &b) {
                let below = query.below(&pivot);
                for key in -25..pivot {
                    let expected = query.contains(&key);
                    match below {
                        None => prop_assert!(!expected, "{query:?} below {pivot} pruned {key}"),
                        Some(narrowed) => prop_assert_eq!(narrowed.contains(&key), expected),
                    }
                }
                let above = query.above(&pivot);
                for key in pivot + 1..25 {
                    let expected = query.contains(&key);
                    match above {
                        None => prop_assert!(!expected, "{query:?} above {pivot} pruned {key}"),
                        Some(narrowed) => prop_assert_eq!(narrowed.contains(&key), expected),
                    }
                }
            }
        }
    }
}
