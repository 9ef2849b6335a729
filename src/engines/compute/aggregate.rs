//! Parallel match aggregation
//!
//! [`MatchEngine`] scores a target selection against a pool of selections
//! on a fixed number of workers. The pool is split into contiguous chunks,
//! each chunk is tallied privately, and the partial tallies are summed once
//! every worker has finished. The result does not depend on the worker
//! count or on completion order.

use std::time::Instant;

use crate::engines::core::parallel;
use crate::modules::config::LotteryConfig;
use crate::modules::pick::Selection;

use super::tally::Tally;

/// The parallel match engine
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: LotteryConfig,
    num_threads: usize,
}

impl MatchEngine {
    /// Create an engine that uses the host parallelism
    pub fn new(config: LotteryConfig) -> Self {
        Self {
            config,
            num_threads: parallel::resolve_num_threads(None),
        }
    }

    /// Override the number of workers (0 selects the host parallelism)
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = parallel::resolve_num_threads(Some(num_threads));
        self
    }

    /// Get the lottery configuration
    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    /// Get the number of workers used per run
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Count winners per match level for `target` against `pool`.
    ///
    /// Selections with fewer than `min_matches` matches are not counted.
    pub fn match_picks<S: Selection>(&self, target: &S, pool: &[S]) -> Tally {
        let start = Instant::now();

        let tally = parallel::parallel_split_join(
            pool,
            self.num_threads,
            |chunk| self.tally_chunk(target, chunk),
            || Tally::new(&self.config),
            Tally::merge,
        );

        log::debug!(
            "Matched {} selections on up to {} workers in {:?}",
            pool.len(),
            self.num_threads,
            start.elapsed()
        );

        tally
    }

    /// Tally one chunk on the current worker
    fn tally_chunk<S: Selection>(&self, target: &S, chunk: &[S]) -> Tally {
        let min_matches = self.config.min_matches();
        let mut winners = Tally::new(&self.config);

        for selection in chunk {
            let matches = target.matches(selection);
            if matches >= min_matches {
                winners.record(matches);
            }
        }

        winners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::pick::{BitSelection, PickCodec, SortedSelection};
    use proptest::prelude::*;
    use proptest::sample::subsequence;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn random_pool<S: Selection>(codec: &PickCodec, size: usize, seed: u64) -> Vec<S> {
        let mut rng = StdRng::seed_from_u64(seed);
        let numbers: Vec<i64> = (1..=90).collect();

        (0..size)
            .map(|_| {
                let pick: Vec<i64> = numbers.choose_multiple(&mut rng, 5).copied().collect();
                codec.encode(&pick).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let codec = PickCodec::default();
        let pool: Vec<BitSelection> = ["1 2 3 4 5", "5 6 7 8 9", "1 2 3 89 90"]
            .iter()
            .map(|line| codec.parse(line).unwrap())
            .collect();
        let target: BitSelection = codec.parse("1 2 3 4 90").unwrap();

        let tally = MatchEngine::new(*codec.config()).match_picks(&target, &pool);

        let levels: Vec<(usize, u64)> = tally.levels().collect();
        assert_eq!(levels, vec![(5, 0), (4, 2), (3, 0), (2, 0)]);
    }

    #[test]
    fn test_empty_pool() {
        let codec = PickCodec::default();
        let target: BitSelection = codec.parse("1 2 3 4 5").unwrap();
        let pool: Vec<BitSelection> = Vec::new();

        let tally = MatchEngine::new(*codec.config())
            .with_threads(4)
            .match_picks(&target, &pool);
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.levels().count(), 4);
    }

    #[test]
    fn test_below_minimum_excluded() {
        let config = LotteryConfig::new(5, 3, 1, 90).unwrap();
        let codec = PickCodec::new(config);
        let pool: Vec<BitSelection> = ["1 2 10 11 12", "1 2 3 11 12", "20 21 22 23 24"]
            .iter()
            .map(|line| codec.parse(line).unwrap())
            .collect();
        let target: BitSelection = codec.parse("1 2 3 4 5").unwrap();

        let tally = MatchEngine::new(config).match_picks(&target, &pool);
        assert_eq!(tally.get(3), 1);
        assert_eq!(tally.get(2), 0);
        assert_eq!(tally.total(), 1);
        assert!(!tally.tracks(2));
    }

    #[test]
    fn test_deterministic_across_thread_counts() {
        let codec = PickCodec::default();
        let pool: Vec<BitSelection> = random_pool(&codec, 10_007, 42);
        let target: BitSelection = codec.parse("7 21 33 48 90").unwrap();

        let baseline = MatchEngine::new(*codec.config())
            .with_threads(1)
            .match_picks(&target, &pool);

        for threads in [2, 3, 4, 8, 16] {
            let tally = MatchEngine::new(*codec.config())
                .with_threads(threads)
                .match_picks(&target, &pool);
            assert_eq!(tally, baseline, "threads = {}", threads);
        }
    }

    #[test]
    fn test_bitset_and_sorted_agree() {
        let codec = PickCodec::default();
        let bits: Vec<BitSelection> = random_pool(&codec, 2_000, 7);
        let sorted: Vec<SortedSelection> = random_pool(&codec, 2_000, 7);
        let engine = MatchEngine::new(*codec.config()).with_threads(4);

        let bit_target: BitSelection = codec.parse("1 2 3 4 5").unwrap();
        let sorted_target: SortedSelection = codec.parse("1 2 3 4 5").unwrap();

        assert_eq!(
            engine.match_picks(&bit_target, &bits),
            engine.match_picks(&sorted_target, &sorted)
        );
    }

    #[test]
    fn test_permuted_pool_same_tally() {
        let codec = PickCodec::default();
        let mut pool: Vec<BitSelection> = random_pool(&codec, 5_000, 3);
        let target: BitSelection = codec.parse("10 20 30 40 50").unwrap();
        let engine = MatchEngine::new(*codec.config()).with_threads(4);

        let before = engine.match_picks(&target, &pool);
        pool.shuffle(&mut StdRng::seed_from_u64(99));
        let after = engine.match_picks(&target, &pool);

        assert_eq!(before, after);
    }

    prop_compose! {
        fn pick()(numbers in subsequence((1..=90).collect::<Vec<i64>>(), 5)) -> Vec<i64> {
            numbers
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_tally_independent_of_workers(
            target in pick(),
            pool in proptest::collection::vec(pick(), 0..300),
            threads in 1usize..=8,
        ) {
            let codec = PickCodec::default();
            let target: BitSelection = codec.encode(&target).unwrap();
            let pool: Vec<BitSelection> = pool.iter().map(|p| codec.encode(p).unwrap()).collect();

            let sequential = MatchEngine::new(*codec.config()).with_threads(1).match_picks(&target, &pool);
            let parallel = MatchEngine::new(*codec.config()).with_threads(threads).match_picks(&target, &pool);
            prop_assert_eq!(&sequential, &parallel);

            // Winners never exceed the pool and no level below the minimum exists
            prop_assert!(parallel.total() <= pool.len() as u64);
            prop_assert_eq!(parallel.min_matches(), codec.config().min_matches());
        }
    }
}
