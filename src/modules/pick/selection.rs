//! Selection representations
//!
//! A selection is one player's (or the winning) set of numbers in one of
//! the engine's internal forms. Values are only built by the codec, after
//! count, range and uniqueness have been checked.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::engines::compute::scoring;
use crate::engines::core::packed::PickMask;
use crate::modules::config::LotteryConfig;

/// Internal representation of a validated selection
pub trait Selection: Sized + Send + Sync {
    /// Build from numbers that are distinct and inside the configured range
    fn from_validated(numbers: &[i64], config: &LotteryConfig) -> Self;

    /// Number of numbers shared with `other`
    fn matches(&self, other: &Self) -> usize;

    /// Number of numbers held
    fn len(&self) -> usize;

    /// The selected numbers in ascending order
    fn numbers(&self, config: &LotteryConfig) -> Vec<i64>;
}

/// Bitset selection, scored with AND and popcount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSelection(PickMask);

impl BitSelection {
    /// Get the underlying mask
    pub fn mask(&self) -> &PickMask {
        &self.0
    }
}

impl Selection for BitSelection {
    fn from_validated(numbers: &[i64], config: &LotteryConfig) -> Self {
        let mut mask = PickMask::empty();
        for &number in numbers {
            mask.insert(config.slot(number));
        }
        Self(mask)
    }

    #[inline]
    fn matches(&self, other: &Self) -> usize {
        scoring::popcount_matches(&self.0, &other.0)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn numbers(&self, config: &LotteryConfig) -> Vec<i64> {
        self.0
            .slots()
            .map(|slot| config.min_pick() + slot as i64)
            .collect()
    }
}

/// Sorted selection, scored with a two-pointer merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortedSelection(Box<[i64]>);

impl SortedSelection {
    /// Get the numbers in ascending order
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

impl Selection for SortedSelection {
    fn from_validated(numbers: &[i64], _config: &LotteryConfig) -> Self {
        let mut sorted = numbers.to_vec();
        sorted.sort_unstable();
        Self(sorted.into_boxed_slice())
    }

    #[inline]
    fn matches(&self, other: &Self) -> usize {
        scoring::merge_matches(&self.0, &other.0)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn numbers(&self, _config: &LotteryConfig) -> Vec<i64> {
        self.0.to_vec()
    }
}

impl fmt::Display for SortedSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// Render a selection as space-separated numbers
pub fn format_selection<S: Selection>(selection: &S, config: &LotteryConfig) -> String {
    selection.numbers(config).iter().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_selection_slots() {
        let config = LotteryConfig::default();
        let selection = BitSelection::from_validated(&[1, 64, 65, 90], &config);

        // 1 and 64 sit at the ends of word 0, 65 and 90 in word 1
        assert_eq!(
            selection.mask().words(),
            [1 | (1u64 << 63), 1 | (1u64 << 25)]
        );
        assert_eq!(selection.len(), 4);
        assert_eq!(selection.numbers(&config), vec![1, 64, 65, 90]);
    }

    #[test]
    fn test_bit_selection_offset_range() {
        let config = LotteryConfig::new(3, 1, -5, 100).unwrap();
        let selection = BitSelection::from_validated(&[-5, 0, 100], &config);

        assert!(selection.mask().contains(0));
        assert!(selection.mask().contains(5));
        assert!(selection.mask().contains(105));
        assert_eq!(selection.numbers(&config), vec![-5, 0, 100]);
    }

    #[test]
    fn test_sorted_selection_orders_numbers() {
        let config = LotteryConfig::default();
        let selection = SortedSelection::from_validated(&[90, 3, 17, 1, 44], &config);

        assert_eq!(selection.as_slice(), &[1, 3, 17, 44, 90]);
        assert_eq!(selection.to_string(), "1 3 17 44 90");
        assert_eq!(format_selection(&selection, &config), "1 3 17 44 90");
    }

    #[test]
    fn test_variants_agree() {
        let config = LotteryConfig::default();
        let a = [1, 2, 3, 4, 90];
        let b = [1, 2, 3, 89, 90];

        let bits = BitSelection::from_validated(&a, &config)
            .matches(&BitSelection::from_validated(&b, &config));
        let sorted = SortedSelection::from_validated(&a, &config)
            .matches(&SortedSelection::from_validated(&b, &config));

        assert_eq!(bits, 4);
        assert_eq!(sorted, 4);
    }
}
