//! Lottery configuration
//!
//! [`LotteryConfig`] is the validated, immutable game definition shared by
//! the codec and the match engine. [`Settings`] is the startup surface that
//! reads it, together with the player file path and the worker count, from
//! environment variables, optionally seeded from a `.env` file.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engines::core::packed::MASK_CAPACITY;
use crate::engines::core::parallel;

pub const DEFAULT_NUMBER_OF_PICKS: usize = 5;
pub const DEFAULT_MIN_MATCHES: usize = 2;
pub const DEFAULT_MIN_PICK: i64 = 1;
pub const DEFAULT_MAX_PICK: i64 = 90;
pub const DEFAULT_PLAYER_NUMBERS_FILE_PATH: &str = "10m-v2.txt";

pub const ENV_NUMBER_OF_PICKS: &str = "NUMBER_OF_PICKS";
pub const ENV_MIN_MATCHES: &str = "MIN_MATCHES";
pub const ENV_MIN_PICK: &str = "MIN_LOTTERY_PICK";
pub const ENV_MAX_PICK: &str = "MAX_LOTTERY_PICK";
pub const ENV_PLAYER_NUMBERS_FILE_PATH: &str = "PLAYER_NUMBERS_FILE_PATH";
pub const ENV_WORKER_THREADS: &str = "WORKER_THREADS";

/// Error type for invalid lottery definitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Number of picks must be at least 1")]
    NoPicks,

    #[error("Minimum matches must be between 1 and {number_of_picks}, got {min_matches}")]
    InvalidMinMatches {
        min_matches: usize,
        number_of_picks: usize,
    },

    #[error("Empty pick range [{min_pick}, {max_pick}]")]
    EmptyRange { min_pick: i64, max_pick: i64 },

    #[error("Pick range [{min_pick}, {max_pick}] is wider than {} numbers", MASK_CAPACITY)]
    RangeTooWide { min_pick: i64, max_pick: i64 },

    #[error("Cannot pick {number_of_picks} distinct numbers from {span} numbers")]
    RangeTooNarrow { number_of_picks: usize, span: usize },
}

/// Configuration of a lottery game
///
/// Deserialized values are validated like [`LotteryConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLotteryConfig")]
pub struct LotteryConfig {
    number_of_picks: usize,
    min_matches: usize,
    min_pick: i64,
    max_pick: i64,
}

impl LotteryConfig {
    /// Create a validated lottery configuration
    pub fn new(
        number_of_picks: usize,
        min_matches: usize,
        min_pick: i64,
        max_pick: i64,
    ) -> Result<Self, ConfigError> {
        if number_of_picks == 0 {
            return Err(ConfigError::NoPicks);
        }

        if min_matches == 0 || min_matches > number_of_picks {
            return Err(ConfigError::InvalidMinMatches {
                min_matches,
                number_of_picks,
            });
        }

        if min_pick > max_pick {
            return Err(ConfigError::EmptyRange { min_pick, max_pick });
        }

        // i128 keeps extreme bounds from overflowing
        let span = max_pick as i128 - min_pick as i128 + 1;
        if span > MASK_CAPACITY as i128 {
            return Err(ConfigError::RangeTooWide { min_pick, max_pick });
        }

        let span = span as usize;
        if number_of_picks > span {
            return Err(ConfigError::RangeTooNarrow {
                number_of_picks,
                span,
            });
        }

        Ok(Self {
            number_of_picks,
            min_matches,
            min_pick,
            max_pick,
        })
    }

    /// Count of numbers per selection
    pub fn number_of_picks(&self) -> usize {
        self.number_of_picks
    }

    /// Smallest match count that is reported
    pub fn min_matches(&self) -> usize {
        self.min_matches
    }

    /// Smallest valid number
    pub fn min_pick(&self) -> i64 {
        self.min_pick
    }

    /// Largest valid number
    pub fn max_pick(&self) -> i64 {
        self.max_pick
    }

    /// Number of distinct valid numbers
    pub fn span(&self) -> usize {
        (self.max_pick - self.min_pick + 1) as usize
    }

    /// Check if a number lies in the valid range
    #[inline]
    pub fn contains(&self, number: i64) -> bool {
        number >= self.min_pick && number <= self.max_pick
    }

    /// Mask slot of an in-range number
    #[inline]
    pub fn slot(&self, number: i64) -> usize {
        debug_assert!(self.contains(number));
        (number - self.min_pick) as usize
    }
}

/// Unvalidated wire form of [`LotteryConfig`]
#[derive(Deserialize)]
struct RawLotteryConfig {
    number_of_picks: usize,
    min_matches: usize,
    min_pick: i64,
    max_pick: i64,
}

impl TryFrom<RawLotteryConfig> for LotteryConfig {
    type Error = ConfigError;

    fn try_from(raw: RawLotteryConfig) -> Result<Self, Self::Error> {
        LotteryConfig::new(raw.number_of_picks, raw.min_matches, raw.min_pick, raw.max_pick)
    }
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            number_of_picks: DEFAULT_NUMBER_OF_PICKS,
            min_matches: DEFAULT_MIN_MATCHES,
            min_pick: DEFAULT_MIN_PICK,
            max_pick: DEFAULT_MAX_PICK,
        }
    }
}

/// Startup settings read once from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The lottery definition
    pub lottery: LotteryConfig,
    /// File holding one player selection per line
    pub player_numbers_path: PathBuf,
    /// Worker count for matching and ingestion
    pub worker_threads: usize,
}

impl Settings {
    /// Load `.env` into the process environment, then read it.
    ///
    /// A missing or malformed `.env` only logs a warning. Variables that
    /// are already set keep their values.
    pub fn load() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            log::warn!("Error loading .env file: {}", err);
        }
        Self::from_env()
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from a dotenv file, with the process environment
    /// taking precedence over its entries
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> dotenvy::Result<Self> {
        Ok(Self::layered(
            read_env_file(path.as_ref())?,
            |key| std::env::var(key).ok(),
        ))
    }

    fn layered<F>(file: HashMap<String, String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| lookup(key).or_else(|| file.get(key).cloned()))
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to their defaults with a
    /// warning, and so does a lottery definition that fails validation.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number_of_picks = parse_or(&lookup, ENV_NUMBER_OF_PICKS, DEFAULT_NUMBER_OF_PICKS);
        let min_matches = parse_or(&lookup, ENV_MIN_MATCHES, DEFAULT_MIN_MATCHES);
        let min_pick = parse_or(&lookup, ENV_MIN_PICK, DEFAULT_MIN_PICK);
        let max_pick = parse_or(&lookup, ENV_MAX_PICK, DEFAULT_MAX_PICK);

        let lottery = LotteryConfig::new(number_of_picks, min_matches, min_pick, max_pick)
            .unwrap_or_else(|err| {
                log::warn!("Invalid lottery configuration ({}), using defaults", err);
                LotteryConfig::default()
            });

        let player_numbers_path = lookup(ENV_PLAYER_NUMBERS_FILE_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAYER_NUMBERS_FILE_PATH));

        let worker_threads = parallel::resolve_num_threads(Some(parse_or(
            &lookup,
            ENV_WORKER_THREADS,
            0,
        )));

        Self {
            lottery,
            player_numbers_path,
            worker_threads,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn read_env_file(path: &Path) -> dotenvy::Result<HashMap<String, String>> {
    dotenvy::from_path_iter(path)?.collect()
}

/// Parse a single setting, falling back to `default`
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}
