//! Player pick ingestion
//!
//! Reads one selection per line, encodes each through the codec and keeps
//! the valid ones in input order. Rejected lines are logged with their
//! 1-based line number and skipped.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use crate::engines::core::io::{lines, region_lines, split_at_line_boundaries, MemoryMappedReader};
use crate::engines::core::parallel;
use crate::engines::{EngineError, EngineResult};
use crate::modules::pick::{PickCodec, Selection, SelectionError, SelectionResult};

/// A line that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based line number in the source
    pub line: usize,
    /// Why the line was rejected
    pub error: SelectionError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ignored: {}", self.line, self.error)
    }
}

/// Outcome of ingesting a pick source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested<S> {
    /// Valid selections in input order
    pub selections: Vec<S>,
    /// Rejected lines in input order
    pub rejected: Vec<Rejection>,
}

impl<S> Ingested<S> {
    fn new() -> Self {
        Self {
            selections: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Number of lines read
    pub fn lines_read(&self) -> usize {
        self.selections.len() + self.rejected.len()
    }

    fn accept(&mut self, line: usize, result: SelectionResult<S>) {
        match result {
            Ok(selection) => self.selections.push(selection),
            Err(error) => self.reject(line, error),
        }
    }

    fn reject(&mut self, line: usize, error: SelectionError) {
        let rejection = Rejection { line, error };
        log::warn!("{}", rejection);
        self.rejected.push(rejection);
    }

    fn log_summary(&self, source: &str) {
        log::info!(
            "Ingested {} player picks from {} ({} lines ignored)",
            self.selections.len(),
            source,
            self.rejected.len()
        );
    }
}

/// Read player picks from any buffered source, one selection per line.
///
/// End of input ends ingestion; a read failure is returned as
/// [`EngineError::IngestionFailure`].
pub fn read_player_picks<S, R>(codec: &PickCodec, reader: R) -> EngineResult<Ingested<S>>
where
    S: Selection,
    R: BufRead,
{
    let mut ingested = Ingested::new();

    for (idx, line) in lines(reader).enumerate() {
        let line = line?;
        ingested.accept(idx + 1, codec.parse(&line));
    }

    ingested.log_summary("reader");
    Ok(ingested)
}

/// Selections and local rejections of one file region
struct RegionPicks<S> {
    selections: Vec<S>,
    rejected: Vec<(usize, SelectionError)>,
    lines: usize,
}

fn parse_region<S: Selection>(codec: &PickCodec, region: &[u8]) -> RegionPicks<S> {
    let mut picks = RegionPicks {
        selections: Vec::new(),
        rejected: Vec::new(),
        lines: 0,
    };

    for line in region_lines(region) {
        picks.lines += 1;
        match codec.parse(&String::from_utf8_lossy(line)) {
            Ok(selection) => picks.selections.push(selection),
            Err(error) => picks.rejected.push((picks.lines, error)),
        }
    }

    picks
}

/// Read player picks from a file, parsing in parallel.
///
/// The file is memory-mapped and split at line boundaries into at most
/// `num_workers` regions. Selections and rejections are reassembled in
/// input order, so the result equals [`read_player_picks`] on the same
/// bytes.
pub fn read_player_picks_file<S, P>(
    codec: &PickCodec,
    path: P,
    num_workers: usize,
) -> EngineResult<Ingested<S>>
where
    S: Selection,
    P: AsRef<Path>,
{
    let reader = MemoryMappedReader::open(path.as_ref())?;
    let regions = split_at_line_boundaries(reader.as_slice(), num_workers);

    let parsed: Vec<RegionPicks<S>> =
        parallel::parallel_map(&regions, num_workers, |region| parse_region(codec, region));

    let mut ingested = Ingested::new();
    ingested.selections.reserve(parsed.iter().map(|r| r.selections.len()).sum());

    // Region-local line numbers become file line numbers
    let mut offset = 0;
    for region in parsed {
        ingested.selections.extend(region.selections);
        for (line, error) in region.rejected {
            ingested.reject(offset + line, error);
        }
        offset += region.lines;
    }

    ingested.log_summary(reader.path());
    Ok(ingested)
}

/// Parse the winning entry.
///
/// Codec failures are reported as [`EngineError::TargetParseFailure`];
/// the caller may simply ask for another entry.
pub fn parse_target<S: Selection>(codec: &PickCodec, line: &str) -> EngineResult<S> {
    codec.parse(line).map_err(EngineError::TargetParseFailure)
}
