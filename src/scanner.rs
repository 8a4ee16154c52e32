//! Line reading and start-of-data detection.
//!
//! A GNU ld map file opens with archive member lists, discarded sections and
//! the memory configuration. The layout we care about only starts after the
//! "Linker script and memory map" line, so the scanner consumes everything up
//! to and including that line.

use std::io::BufRead;

use crate::error::{MapError, Result};

/// The line that introduces the memory map proper.
pub const MARKER: &str = "Linker script and memory map";

/// Reads lines from a map file, decoding lossily and tracking line numbers.
pub struct MapLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> MapLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next line without its line terminator.
    /// Returns `Ok(None)` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut end = self.buf.len();
        if end > 0 && self.buf[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && self.buf[end - 1] == b'\r' {
                end -= 1;
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.buf[..end]).into_owned()))
    }

    /// Consumes lines up to and including the [`MARKER`] line.
    ///
    /// On success the reader is positioned on the first line of map data.
    /// Running out of input first is fatal.
    pub fn skip_to_marker(&mut self) -> Result<()> {
        while let Some(line) = self.next_line()? {
            if line.trim() == MARKER {
                tracing::debug!("Found memory map marker at line {}", self.line_number);
                return Ok(());
            }
        }
        Err(MapError::MarkerNotFound { marker: MARKER })
    }
}

impl<R: BufRead> Iterator for MapLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
