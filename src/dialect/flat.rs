//! Flat, object-file aware dialect.
//!
//! Implements the `Dialect` trait for maps read as single-segment sections:
//! `.text.startup` is reported under `.text`, with no sub-section column.
//! Every matching line is a row; a trailing name ending in `.o` marks the start
//! of a new contributing object file, which is carried until the next one.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ClassifierState, Dialect};
use crate::config::SizeFormat;
use crate::record::{Record, Size};

/// Optional section token, optional address, optional size, trailing text.
/// A dotted input section name (`.text.startup`) is consumed whole, but only
/// its first segment is captured.
static FIELDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(\.[A-Za-z0-9_-]+)(?:\.[A-Za-z0-9_-]+)*)?(?:\s+|$)(0x[0-9a-fA-F]+)?\s*(0x[0-9a-fA-F]+)?\s*(.*)$",
    )
    .unwrap()
});

/// Suffix that marks an object file.
const OBJECT_SUFFIX: &str = ".o";

const HEADERS: &[&str] = &[
    "Section",
    "Address",
    "Size",
    "Object File",
    "Object Size",
    "Symbol",
];

/// The flat dialect backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat;

impl Dialect for Flat {
    fn headers(&self) -> &'static [&'static str] {
        HEADERS
    }

    fn boundary_label(&self) -> &'static str {
        "object files"
    }

    fn classify(
        &self,
        mut state: ClassifierState,
        line: &str,
        format: SizeFormat,
    ) -> (ClassifierState, Option<Record>) {
        let Some(caps) = FIELDS.captures(line) else {
            return (state, None);
        };

        let section = caps.get(1).map(|m| m.as_str());
        let address = caps.get(2).map_or("", |m| m.as_str());
        let raw_size = caps.get(3).map(|m| m.as_str());
        let symbol = caps.get(4).map_or("", |m| m.as_str());

        // Blank lines match trivially.
        if section.is_none() && address.is_empty() && raw_size.is_none() && symbol.is_empty() {
            return (state, None);
        }

        if let Some(section) = section {
            if state.section.as_deref() != Some(section) {
                tracing::debug!("Entering section {}", section);
                state.section = Some(section.to_string());
            }
        }

        state.symbols += 1;
        let size = raw_size.map(|raw| Size::from_field(raw, format));
        if let Some(size) = &size {
            state.object_size = size.clone();
        }

        // Any trailing text ending in ".o" counts, whether or not it is a file.
        if symbol.ends_with(OBJECT_SUFFIX) {
            tracing::trace!("Object file {}", symbol);
            state.object = symbol.to_string();
            state.boundaries += 1;
        }

        let record = Record {
            section: state.section.clone().unwrap_or_default(),
            subsection: None,
            address: address.to_string(),
            size,
            object: state.object.clone(),
            object_size: state.object_size.clone(),
            symbol: symbol.to_string(),
        };
        (state, Some(record))
    }
}
