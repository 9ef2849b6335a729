//! High-performance I/O operations
//!
//! This module provides the readers used to ingest player pick files:
//! a line iterator for any buffered source and a memory-mapped reader
//! whose contents can be split into line-aligned regions for parallel
//! parsing.

use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Iterate over the lines of any buffered source
pub fn lines<B: BufRead>(reader: B) -> Lines<B> {
    Lines {
        reader,
        buffer: Vec::new(),
    }
}

/// Iterator over lines of a buffered source.
///
/// Line terminators (`\n` or `\r\n`) are stripped. Bytes that are not
/// valid UTF-8 are replaced rather than failing the whole read.
pub struct Lines<B> {
    reader: B,
    buffer: Vec<u8>,
}

impl<B: BufRead> Iterator for Lines<B> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None, // EOF
            Ok(_) => Some(Ok(String::from_utf8_lossy(trim_line(&self.buffer)).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Strip a trailing `\n` and then a trailing `\r`
pub fn trim_line(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Memory-mapped file reader for efficient processing of large pick files
pub struct MemoryMappedReader {
    // Empty files are not mapped
    mmap: Option<Mmap>,
    path: String,
}

impl MemoryMappedReader {
    /// Create a new memory-mapped reader for the given file path
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();

        let mmap = if len == 0 {
            None
        } else {
            // The file is only read; callers must not truncate it while mapped
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        Ok(Self {
            mmap,
            path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    /// Get a slice of the entire memory-mapped file
    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    /// Get the length of the memory-mapped file
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Check if the memory-mapped file is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the path of the file being read
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Split data into at most `parts` regions that each end on a line
/// boundary.
///
/// Every region except possibly the last ends with `\n`, so no line is
/// split between two regions. Concatenating the regions yields `data`.
pub fn split_at_line_boundaries(data: &[u8], parts: usize) -> Vec<&[u8]> {
    if data.is_empty() {
        return Vec::new();
    }

    let target = (data.len() + parts.max(1) - 1) / parts.max(1);
    let mut regions = Vec::with_capacity(parts.max(1));
    let mut start = 0;

    while start < data.len() {
        let tentative = (start + target).min(data.len());

        // Extend to the end of the line the tentative cut falls into
        let end = match data[tentative - 1..].iter().position(|&b| b == b'\n') {
            Some(offset) => tentative + offset,
            None => data.len(),
        };

        regions.push(&data[start..end]);
        start = end;
    }

    regions
}

/// Iterate over the lines of a line-aligned region.
///
/// A final empty fragment after the last `\n` is not a line.
pub fn region_lines(region: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = region.strip_suffix(b"\n").unwrap_or(region);
    let pieces = if region.is_empty() {
        None
    } else {
        Some(body.split(|&b| b == b'\n'))
    };

    pieces.into_iter().flatten().map(trim_line)
}
