//! # lottery_rust
//!
//! High-performance matching of a winning lottery selection against
//! millions of player selections.
//!
//! Selections are validated by a [`PickCodec`] and stored either as a
//! 128-bit [`BitSelection`] (scored with AND and popcount) or as a
//! [`SortedSelection`] (scored with a sorted merge). The [`MatchEngine`]
//! splits the pool across worker threads and returns a [`Tally`] of
//! winners per match level.
//!
//! ```rust
//! use lottery_rust::{BitSelection, LotteryConfig, MatchEngine, PickCodec};
//!
//! let config = LotteryConfig::new(5, 2, 1, 90).unwrap();
//! let codec = PickCodec::new(config);
//!
//! let pool: Vec<BitSelection> = ["1 2 3 4 5", "5 6 7 8 9", "1 2 3 89 90"]
//!     .iter()
//!     .filter_map(|line| codec.parse(line).ok())
//!     .collect();
//! let target: BitSelection = codec.parse("1 2 3 4 90").unwrap();
//!
//! let tally = MatchEngine::new(config).match_picks(&target, &pool);
//! assert_eq!(tally.get(4), 2);
//! ```

pub mod engines;
pub mod modules;

pub use engines::compute::{MatchEngine, Tally};
pub use engines::{EngineError, EngineResult};
pub use modules::config::{ConfigError, LotteryConfig, Settings};
pub use modules::io::{parse_target, read_player_picks, read_player_picks_file, Ingested, Report};
pub use modules::pick::{BitSelection, PickCodec, Selection, SelectionError, SortedSelection};
