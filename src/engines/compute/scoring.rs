//! Match scoring primitives
//!
//! Both scorers count the numbers two selections share. They agree on
//! every pair of duplicate-free inputs.

use crate::engines::core::packed::PickMask;

/// Count shared numbers of two masks with AND and popcount.
///
/// Constant time regardless of how many numbers are picked.
#[inline]
pub fn popcount_matches(a: &PickMask, b: &PickMask) -> usize {
    a.intersection_len(b)
}

/// Count shared numbers of two ascending slices with a two-pointer merge.
///
/// Runs in `O(a.len() + b.len())`. Both inputs must be sorted. A value
/// duplicated on both sides is counted once per paired occurrence, so
/// inputs with duplicates can score above their set intersection.
pub fn merge_matches(a: &[i64], b: &[i64]) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut matches = 0;

    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            i += 1;
        } else if a[i] > b[j] {
            j += 1;
        } else {
            matches += 1;
            i += 1;
            j += 1;
        }
    }

    matches
}
