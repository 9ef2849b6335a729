//! Match reports
//!
//! Turns a finished [`Tally`] into the per-level winner table shown to the
//! user, as text or JSON.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engines::compute::Tally;

/// Winners at one match level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLevel {
    pub matches: usize,
    pub winners: u64,
}

/// Report of a complete match run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Wall time of the run, rounded to milliseconds
    pub elapsed_ms: u64,
    /// Levels from the full pick count down to the minimum, zeros included
    pub levels: Vec<ReportLevel>,
}

impl Report {
    /// Build a report from a tally and the time the run took
    pub fn new(tally: &Tally, elapsed: Duration) -> Self {
        let levels = tally
            .levels()
            .map(|(matches, winners)| ReportLevel { matches, winners })
            .collect();

        Self {
            elapsed_ms: (elapsed.as_secs_f64() * 1000.0).round() as u64,
            levels,
        }
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matching lottery picks took {}ms", self.elapsed_ms)?;
        writeln!(f)?;
        writeln!(f, "{:<16}\t{}", "Numbers matching", "Winners")?;
        for level in &self.levels {
            writeln!(f, "{:<16}\t{}", level.matches, level.winners)?;
        }
        Ok(())
    }
}
