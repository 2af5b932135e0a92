//! Bijective mapping between permutations and integer ranks via the factorial
//! number system (Lehmer code). The rank is the canonical identity of a board
//! state: search dictionaries and the save format both key on it.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::fenwick::FenwickTree;

pub fn factorial(size: usize) -> BigUint {
    let mut f = BigUint::one();
    for i in 2..=size {
        f *= BigUint::from(i);
    }
    f
}

/// Decode `rank` into a permutation of `0..size`.
///
/// The rank is read as a mixed-radix number whose digit `i` has base `i + 1`,
/// yielding an inversion table; the permutation is rebuilt by placing each
/// value (ascending) at the position named by the rightmost zero entry and
/// decrementing the tail.
///
/// Precondition: `rank < size!`. Out-of-range ranks are a caller contract
/// violation.
pub fn unrank(size: usize, rank: &BigUint) -> Vec<u16> {
    debug_assert!(*rank < factorial(size), "rank out of range for size {size}");
    let mut n = rank.clone();
    let mut inversion: Vec<i64> = Vec::with_capacity(size);
    for i in 0..size {
        let base = BigUint::from(i + 1);
        let digit = (&n % &base)
            .to_i64()
            .expect("mixed-radix digit fits in i64");
        inversion.push(digit);
        n /= &base;
    }

    let mut out = vec![0u16; size];
    for value in 0..size {
        let mut j = size as i64 - 1;
        while j >= 0 && inversion[j as usize] != 0 {
            j -= 1;
        }
        debug_assert!(j >= 0, "inversion table exhausted");
        out[size - 1 - j as usize] = value as u16;
        for entry in &mut inversion[j as usize..] {
            *entry -= 1;
        }
    }
    out
}

/// Encode a permutation of `0..perm.len()` as its rank; the inverse of
/// [`unrank`].
///
/// For each position the count of smaller labels to its right is folded into
/// a mixed-radix accumulator. The suffix counts come from a Fenwick tree
/// scan, O(n log n) instead of the naive O(n^2).
pub fn rank(perm: &[u16]) -> BigUint {
    let size = perm.len();
    let mut r = BigUint::zero();
    if size == 0 {
        return r;
    }

    let mut counts = vec![0u32; size];
    let mut tree = FenwickTree::new(size);
    for i in (0..size).rev() {
        counts[i] = tree.sum_le(perm[i] as usize);
        tree.add(perm[i] as usize, 1);
    }

    for (i, &count) in counts.iter().enumerate().take(size - 1) {
        r += BigUint::from(count);
        r *= BigUint::from(size - 1 - i);
    }
    r
}
