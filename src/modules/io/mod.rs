//! I/O module
//!
//! This module provides the ingestion and reporting collaborators of the
//! match engine.

pub mod ingest;
pub mod report;

/// Convenience re-exports
pub use ingest::{parse_target, read_player_picks, read_player_picks_file, Ingested, Rejection};
pub use report::{Report, ReportLevel};
