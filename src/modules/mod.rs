//! Lottery functionality modules
//!
//! The game configuration, selection encoding and the ingestion and
//! reporting collaborators around the match engine.

pub mod config;
pub mod io;
pub mod pick;
