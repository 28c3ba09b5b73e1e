use core::num::NonZero;

use super::prime::next_prime;
use crate::error::WgbError;

/// Number of bucket slots in a White or Black node.
///
/// Never zero, so bucket selection can never divide by zero once a `Capacity`
/// exists.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub(crate) struct Capacity(NonZero<usize>);

impl Capacity {
    /// The capacity handed to the root's White and Black children by default.
    pub(crate) const FIRST: Self = Self(NonZero::<usize>::MIN.saturating_add(1));

    pub(crate) const fn new(slots: usize) -> Result<Self, WgbError> {
        match NonZero::new(slots) {
            Some(slots) => Ok(Self(slots)),
            None => Err(WgbError::DivideByZero),
        }
    }

    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0.get()
    }

    /// Capacity used one bucket layer further down.
    #[inline]
    pub(crate) fn next(self) -> Self {
        // `next_prime` never returns less than 2.
        Self(NonZero::new(next_prime(self.get())).unwrap_or(Self::FIRST.0))
    }

    /// Bucket index for `hash`, i.e. `hash mod capacity`.
    #[inline]
    pub(crate) fn index_of(self, hash: u64) -> usize {
        fast_mod(hash, self)
    }
}

/// Folds `value` into `value >> shift` plus its low `shift` bits. This keeps the
/// residue modulo any `p` with `2^shift ≡ 1 (mod p)`.
#[inline]
const fn fold(value: u64, shift: u32) -> u64 {
    (value >> shift) + (value & ((1 << shift) - 1))
}

#[inline]
fn reduce(mut value: u64, shift: u32, modulus: u64) -> u64 {
    while value >> shift != 0 {
        value = fold(value, shift);
    }
    while value >= modulus {
        value -= modulus;
    }
    value
}

/// `hash mod capacity`, with shift-and-add paths for the small primes that make
/// up the top layers of every tree.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn fast_mod(hash: u64, capacity: Capacity) -> usize {
    let residue = match capacity.get() {
        1 => 0,
        2 => hash & 1,
        // 4 ≡ 1 (mod 3)
        3 => reduce(fold(fold(fold(hash, 32), 16), 8), 2, 3),
        // 16 ≡ 1 (mod 5)
        5 => reduce(fold(fold(hash, 32), 16), 4, 5),
        // 8 ≡ 1 (mod 7)
        7 => reduce(fold(fold(fold(hash, 48), 24), 12), 3, 7),
        modulus => hash % modulus as u64,
    };
    residue as usize
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // `Option<Capacity>` gets the niche.
    assert_eq_size!(Capacity, Option<Capacity>);
    assert_eq_size!(Capacity, usize);

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(Capacity::new(0), Err(WgbError::DivideByZero));
    }

    #[test]
    fn first_capacity_is_two() {
        assert_eq!(Capacity::FIRST.get(), 2);
        assert_eq!(Capacity::FIRST.next().get(), 3);
    }

    #[test]
    fn fast_mod_edges() {
        for modulus in [1usize, 2, 3, 5, 7, 11] {
            let capacity = Capacity::new(modulus).unwrap();
            for hash in [0, 1, 2, 3, 4, 5, 6, 7, 8, u64::MAX, u64::MAX - 1, 1 << 63, (1 << 32) - 1] {
                assert_eq!(fast_mod(hash, capacity) as u64, hash % modulus as u64, "{hash} mod {modulus}");
            }
        }
    }

    proptest! {
        #[test]
        fn fast_mod_matches_remainder(hash in any::<u64>(), modulus in 1usize..64) {
            let capacity = Capacity::new(modulus).unwrap();
            prop_assert_eq!(fast_mod(hash, capacity) as u64, hash % modulus as u64);
        }

        #[test]
        fn index_is_in_range(hash in any::<u64>(), modulus in 1usize..256) {
            let capacity = Capacity::new(modulus).unwrap();
            prop_assert!(capacity.index_of(hash) < modulus);
        }
    }
}
