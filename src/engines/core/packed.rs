//! Packed pick storage
//!
//! This module provides the fixed-width bit encoding used for lottery
//! picks: one bit per slot in the configured number range, held in two
//! 64-bit words.

use serde::{Deserialize, Serialize};

/// Number of slots held by a single word
pub const WORD_BITS: usize = 64;

/// Number of words in a pick mask
pub const MASK_WORDS: usize = 2;

/// Total number of slots a pick mask can address
pub const MASK_CAPACITY: usize = WORD_BITS * MASK_WORDS;

/// 128-bit mask with one bit per pick slot
///
/// Word 0 covers slots 0-63 and word 1 covers slots 64-127.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickMask([u64; MASK_WORDS]);

impl PickMask {
    /// Create an empty mask
    pub const fn empty() -> Self {
        Self([0; MASK_WORDS])
    }

    #[cfg(test)]
    const fn from_words(low: u64, high: u64) -> Self {
        Self([low, high])
    }

    /// Get the raw words, lowest slots first
    #[inline]
    pub fn words(&self) -> [u64; MASK_WORDS] {
        self.0
    }

    /// Set a slot, returning `false` if it was already set.
    ///
    /// `slot` must be below [`MASK_CAPACITY`].
    #[inline]
    pub fn insert(&mut self, slot: usize) -> bool {
        debug_assert!(slot < MASK_CAPACITY, "slot {} beyond mask capacity", slot);
        let (word, bit) = locate(slot);
        let was_set = self.0[word] & bit != 0;
        self.0[word] |= bit;
        !was_set
    }

    /// Check whether a slot is set
    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        if slot >= MASK_CAPACITY {
            return false;
        }
        let (word, bit) = locate(slot);
        self.0[word] & bit != 0
    }

    /// Number of set slots
    #[inline]
    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if no slot is set
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Number of slots set in both masks
    #[inline]
    pub fn intersection_len(&self, other: &PickMask) -> usize {
        (self.0[0] & other.0[0]).count_ones() as usize
            + (self.0[1] & other.0[1]).count_ones() as usize
    }

    /// Iterate over the set slots in ascending order
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().flat_map(|(index, &word)| {
            let base = index * WORD_BITS;
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let offset = remaining.trailing_zeros() as usize;
                // Clear the lowest set bit
                remaining &= remaining - 1;
                Some(base + offset)
            })
        })
    }
}

/// Word index and bit for a slot
#[inline]
fn locate(slot: usize) -> (usize, u64) {
    (slot / WORD_BITS, 1u64 << (slot % WORD_BITS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut mask = PickMask::empty();
        assert!(mask.is_empty());

        assert!(mask.insert(0));
        assert!(mask.insert(89));
        assert!(!mask.insert(0));

        assert!(mask.contains(0));
        assert!(mask.contains(89));
        assert!(!mask.contains(1));
        assert!(!mask.contains(MASK_CAPACITY));
        assert_eq!(mask.len(), 2);
    }

    #[test]
    fn test_word_boundaries() {
        let mut mask = PickMask::empty();
        mask.insert(63);
        mask.insert(64);
        mask.insert(127);

        // Slot 63 is the top bit of word 0, 64 and 127 live in word 1
        assert_eq!(mask.words(), [1u64 << 63, 1 | (1u64 << 63)]);
        assert_eq!(mask, PickMask::from_words(1u64 << 63, 1 | (1u64 << 63)));
    }

    #[test]
    fn test_intersection_len() {
        let mut a = PickMask::empty();
        let mut b = PickMask::empty();
        for slot in [0, 1, 2, 3, 89] {
            a.insert(slot);
        }
        for slot in [0, 1, 2, 88, 89] {
            b.insert(slot);
        }

        assert_eq!(a.intersection_len(&b), 4);
        assert_eq!(b.intersection_len(&a), 4);
        assert_eq!(a.intersection_len(&PickMask::empty()), 0);
    }

    #[test]
    fn test_slots_ascending() {
        let mut mask = PickMask::empty();
        for slot in [100, 5, 64, 63, 0] {
            mask.insert(slot);
        }

        let slots: Vec<usize> = mask.slots().collect();
        assert_eq!(slots, vec![0, 5, 63, 64, 100]);
    }
}
