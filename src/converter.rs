//! Core conversion logic.
//!
//! This module contains the `Converter` struct which drives a conversion:
//! 1. Scanning: Skips everything before the memory map marker.
//! 2. Classification: Threads the carried state through the dialect, line by line.
//! 3. Output: Writes each produced record to the CSV sink as soon as it exists.

use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::config::{ConvertOptions, SizeFormat};
use crate::dialect::{ClassifierState, Dialect, DialectKind, Flat, Sectioned};
use crate::error::Result;
use crate::scanner::MapLines;
use crate::writer::RowWriter;

/// Counters reported once a conversion completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// CSV lines written, header included.
    pub lines: usize,
    /// Section transitions or object files, depending on the dialect.
    pub boundaries: usize,
    /// What `boundaries` counts ("sections" or "object files").
    pub boundary_label: &'static str,
    /// Lines that matched the field grammar.
    pub symbols: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wrote:")?;
        writeln!(f, "\t{} lines", self.lines)?;
        writeln!(f, "\t{} {}", self.boundaries, self.boundary_label)?;
        write!(f, "\t{} symbols", self.symbols)
    }
}

pub struct Converter<D: Dialect> {
    dialect: D,
    size_format: SizeFormat,
}

impl<D: Dialect> Converter<D> {
    pub fn new(dialect: D, size_format: SizeFormat) -> Self {
        Self {
            dialect,
            size_format,
        }
    }

    /// Classifies every remaining line of `lines` and writes the rows to `out`.
    ///
    /// `lines` must already be positioned past the marker.
    pub fn run<R: BufRead, W: Write>(&self, lines: &mut MapLines<R>, out: W) -> Result<Summary> {
        let mut sink = RowWriter::new(out, self.dialect.headers())?;
        let mut state = ClassifierState::default();

        while let Some(line) = lines.next_line()? {
            let (next, record) = self.dialect.classify(state, &line, self.size_format);
            state = next;
            if let Some(record) = record {
                tracing::trace!("line {}: {:?}", lines.line_number(), record);
                sink.write(&record)?;
            }
        }

        tracing::debug!("Read {} lines, wrote {} rows", lines.line_number(), sink.lines());
        Ok(Summary {
            lines: sink.finish()?,
            boundaries: state.boundaries,
            boundary_label: self.dialect.boundary_label(),
            symbols: state.symbols,
        })
    }
}

fn run_dialect<R: BufRead, W: Write>(
    lines: &mut MapLines<R>,
    out: W,
    options: &ConvertOptions,
) -> Result<Summary> {
    match options.dialect {
        DialectKind::Sectioned => Converter::new(Sectioned, options.size_format).run(lines, out),
        DialectKind::Flat => Converter::new(Flat, options.size_format).run(lines, out),
    }
}

/// Converts map text read from `reader` into CSV written to `writer`.
///
/// Nothing is written when the marker line is missing.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    options: &ConvertOptions,
) -> Result<Summary> {
    let mut lines = MapLines::new(reader);
    lines.skip_to_marker()?;
    run_dialect(&mut lines, writer, options)
}

/// Converts the map file at `input` into a CSV file at `output`.
///
/// The output file is only created once the marker line has been found.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<Summary> {
    let file = File::open(input)?;
    // Map the input file into memory
    let mmap = unsafe { Mmap::map(&file)? };
    tracing::info!("Reading {} ({} bytes)", input.display(), mmap.len());

    let mut lines = MapLines::new(&mmap[..]);
    lines.skip_to_marker()?;

    let out = BufWriter::new(File::create(output)?);
    let summary = run_dialect(&mut lines, out, options)?;
    tracing::info!("Wrote {} lines to {}", summary.lines, output.display());
    Ok(summary)
}
