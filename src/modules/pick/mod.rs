//! Pick module
//!
//! This module provides selection types and the codec that builds them.

pub mod codec;
pub mod selection;

/// Convenience re-exports
pub use codec::{PickCodec, SelectionError, SelectionResult};
pub use selection::{format_selection, BitSelection, Selection, SortedSelection};
