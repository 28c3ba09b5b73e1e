use core::cmp::Ordering;

/// Direction of a range query's result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Order {
    /// Smallest key first.
    #[default]
    Ascending,
    /// Largest key first.
    Descending,
}

impl Order {
    /// Returns `true` if `a` belongs before `b` in this order.
    #[inline]
    pub(crate) fn precedes<T: Ord + ?Sized>(self, a: &T, b: &T) -> bool {
        match (self, a.cmp(b)) {
            (Self::Ascending, Ordering::Less) | (Self::Descending, Ordering::Greater) => true,
            _ => false,
        }
    }
}
