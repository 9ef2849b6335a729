//! Core optimization engine
//!
//! Packed bit storage, parallel execution and file reading primitives.

pub mod io;
pub mod packed;
pub mod parallel;
