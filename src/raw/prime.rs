/// Primes below 256. Bucket capacities grow by one prime per layer, so real trees
/// stay inside this table and `next_prime` is a binary search.
const SMALL_PRIMES: [usize; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101, 103,
    107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223,
    227, 229, 233, 239, 241, 251,
];

pub(crate) fn is_prime(n: usize) -> bool {
    if n <= 3 {
        return n > 1;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// The smallest prime strictly greater than `n`.
pub(crate) fn next_prime(n: usize) -> usize {
    let position = SMALL_PRIMES.partition_point(|&prime| prime <= n);
    if let Some(&prime) = SMALL_PRIMES.get(position) {
        return prime;
    }

    let mut candidate = n + 1;
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn table_holds_only_primes() {
        assert!(SMALL_PRIMES.iter().all(|&p| is_prime(p)));
        assert!(SMALL_PRIMES.windows(2).all(|w| w[0] < w[1]));
        // No prime is missing between neighbours.
        for pair in SMALL_PRIMES.windows(2) {
            assert!((pair[0] + 1..pair[1]).all(|n| !is_prime(n)), "gap after {}", pair[0]);
        }
    }

    #[test]
    fn next_prime_small_values() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(3), 5);
        assert_eq!(next_prime(41), 43);
        assert_eq!(next_prime(250), 251);
        assert_eq!(next_prime(251), 257);
        assert_eq!(next_prime(7919), 7927);
    }

    proptest! {
        #[test]
        fn next_prime_is_the_next_prime(n in 0usize..20_000) {
            let prime = next_prime(n);
            prop_assert!(prime > n);
            prop_assert!(is_prime(prime));
            prop_assert!((n + 1..prime).all(|m| !is_prime(m)));
        }
    }
}
