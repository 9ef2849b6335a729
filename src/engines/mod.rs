//! Rust engine components
//!
//! High-performance building blocks for the lottery matcher, and the
//! error type shared by the operations that can fail.

pub mod compute;
pub mod core;

use crate::modules::pick::SelectionError;

/// Engine operation result type
pub type EngineResult<T> = Result<T, EngineError>;

/// Error types for engine operations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to read player picks: {0}")]
    IngestionFailure(#[from] std::io::Error),

    #[error("Invalid lottery pick entry: {0}")]
    TargetParseFailure(#[source] SelectionError),
}
