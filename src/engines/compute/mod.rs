//! Compute primitives for lottery matching
//!
//! This module provides match scoring, winner tallies and the parallel
//! aggregation engine built on them.

pub mod aggregate;
pub mod scoring;
pub mod tally;

pub use aggregate::MatchEngine;
pub use tally::Tally;
