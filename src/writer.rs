//! CSV row sink.
//!
//! This module handles writing the table: one header row, then one row per
//! record in the order records are produced.

use std::io::Write;

use crate::error::Result;
use crate::record::{Field, Record};

/// Quotes a text cell, doubling embedded quote characters.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn render(field: &Field) -> String {
    match field {
        Field::Text(text) => quote(text),
        Field::Number(value) => value.to_string(),
    }
}

/// Writes records as CSV. Text cells are always quoted and numbers never are,
/// whatever the text looks like.
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    lines: usize,
}

impl<W: Write> RowWriter<W> {
    /// Creates the writer and emits the header row.
    pub fn new(inner: W, headers: &[&str]) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(headers.iter().map(|header| quote(header)))?;
        Ok(Self { writer, lines: 1 })
    }

    pub fn write(&mut self, record: &Record) -> Result<()> {
        self.writer
            .write_record(record.cells().iter().map(render))?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far, header included.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes buffered rows and returns the line count.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.lines)
    }
}
