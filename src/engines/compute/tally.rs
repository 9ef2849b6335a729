//! Winner tallies
//!
//! A [`Tally`] maps every reportable match count to the number of
//! selections that reached it. Workers fill private tallies that are
//! merged by per-level summation.

use serde::{Deserialize, Serialize};

use crate::modules::config::LotteryConfig;

/// Winner counts for match levels `min_matches..=max_matches`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    min_matches: usize,
    /// `counts[i]` holds the winners with `min_matches + i` matches
    counts: Vec<u64>,
}

impl Tally {
    /// Create an all-zero tally for the given lottery
    pub fn new(config: &LotteryConfig) -> Self {
        Self::with_levels(config.min_matches(), config.number_of_picks())
    }

    /// Create an all-zero tally covering `min_matches..=max_matches`
    pub fn with_levels(min_matches: usize, max_matches: usize) -> Self {
        let levels = (max_matches + 1).saturating_sub(min_matches);
        Self {
            min_matches,
            counts: vec![0; levels],
        }
    }

    /// Smallest tracked match count
    pub fn min_matches(&self) -> usize {
        self.min_matches
    }

    /// Largest tracked match count
    pub fn max_matches(&self) -> usize {
        self.min_matches + self.counts.len().saturating_sub(1)
    }

    /// Count one selection with `matches` matches.
    ///
    /// Match counts outside the tracked levels are not recorded.
    #[inline]
    pub fn record(&mut self, matches: usize) {
        if let Some(count) = matches
            .checked_sub(self.min_matches)
            .and_then(|idx| self.counts.get_mut(idx))
        {
            *count += 1;
        }
    }

    /// Winners with exactly `matches` matches
    pub fn get(&self, matches: usize) -> u64 {
        matches
            .checked_sub(self.min_matches)
            .and_then(|idx| self.counts.get(idx))
            .copied()
            .unwrap_or(0)
    }

    /// Check whether `matches` is a tracked level
    pub fn tracks(&self, matches: usize) -> bool {
        matches >= self.min_matches && matches <= self.max_matches() && !self.counts.is_empty()
    }

    /// Total number of winners over all levels
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Add the counts of another tally covering the same levels.
    ///
    /// # Panics
    ///
    /// Panics if the two tallies track different levels.
    pub fn merge(mut self, other: Tally) -> Tally {
        assert!(
            self.min_matches == other.min_matches && self.counts.len() == other.counts.len(),
            "cannot merge tallies over levels {}..={} and {}..={}",
            self.min_matches,
            self.max_matches(),
            other.min_matches,
            other.max_matches()
        );

        for (count, extra) in self.counts.iter_mut().zip(other.counts) {
            *count += extra;
        }
        self
    }

    /// Iterate `(matches, winners)` from the highest level down, zero
    /// levels included
    pub fn levels(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .rev()
            .map(move |(idx, &count)| (self.min_matches + idx, count))
    }
}
