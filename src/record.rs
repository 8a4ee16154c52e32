//! Output records.
//!
//! A [`Record`] is one row of the emitted table. It is built by a dialect from a
//! single map line plus the carried state, written straight to the sink and
//! dropped.

use std::fmt;

use crate::config::SizeFormat;
use crate::utils::parse_hex;

/// A size value as it appears in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Size {
    /// A converted size (also the initial carried size).
    Decimal(u64),
    /// A size kept in its original `0x...` spelling.
    Hex(String),
}

impl Size {
    /// Converts the raw `0x...` text of a size field according to `format`.
    ///
    /// Decimal conversion that does not fit in a `u64` keeps the hex text.
    pub fn from_field(raw: &str, format: SizeFormat) -> Self {
        match format {
            SizeFormat::Hex => Size::Hex(raw.to_string()),
            SizeFormat::Decimal => match parse_hex(raw) {
                Some(value) => Size::Decimal(value),
                None => {
                    tracing::warn!("size {} does not fit in 64 bits, keeping hex", raw);
                    Size::Hex(raw.to_string())
                }
            },
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::Decimal(0)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Decimal(value) => write!(f, "{}", value),
            Size::Hex(raw) => f.write_str(raw),
        }
    }
}

/// One row of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Section name (e.g. ".text"); empty in the flat dialect until one is seen.
    pub section: String,
    /// Sub-section suffix (e.g. ".main"). `None` for dialects without the column.
    pub subsection: Option<String>,
    /// Hex address, or empty when the line has none.
    pub address: String,
    /// Size given on this very line, if any.
    pub size: Option<Size>,
    /// Object name (sectioned) or object file (flat) carried from earlier lines.
    pub object: String,
    /// Most recent explicit size at or before this line.
    pub object_size: Size,
    /// Trailing symbol or path text, possibly empty.
    pub symbol: String,
}

/// A single table cell, typed so that quoting follows the column rather than
/// whatever the text happens to look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Text(String),
    Number(u64),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(text) => f.write_str(text),
            Field::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<&Size> for Field {
    fn from(size: &Size) -> Self {
        match size {
            Size::Decimal(value) => Field::Number(*value),
            Size::Hex(raw) => Field::Text(raw.clone()),
        }
    }
}

impl Record {
    /// Typed cells of the record, in header order.
    pub fn cells(&self) -> Vec<Field> {
        let mut cells = Vec::with_capacity(7);
        cells.push(Field::Text(self.section.clone()));
        if let Some(subsection) = &self.subsection {
            cells.push(Field::Text(subsection.clone()));
        }
        cells.push(Field::Text(self.address.clone()));
        cells.push(
            self.size
                .as_ref()
                .map(Field::from)
                .unwrap_or_else(|| Field::Text(String::new())),
        );
        cells.push(Field::Text(self.object.clone()));
        cells.push(Field::from(&self.object_size));
        cells.push(Field::Text(self.symbol.clone()));
        cells
    }

    /// Renders the record as plain text fields, in header order.
    pub fn fields(&self) -> Vec<String> {
        self.cells().iter().map(Field::to_string).collect()
    }
}
