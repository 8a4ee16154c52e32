//! Map file dialect abstraction.
//!
//! This module defines the `Dialect` trait, which encapsulates the grammar of one
//! flavor of map report. The converter stays generic while each dialect decides
//! how a line updates the carried state and whether it yields a row.

use clap::ValueEnum;

use crate::config::SizeFormat;
use crate::record::{Record, Size};

pub mod flat;
pub mod sectioned;

pub use flat::Flat;
pub use sectioned::Sectioned;

/// Selects a dialect at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DialectKind {
    /// Section/sub-section aware grammar (`.text.foo` splits into `.text` and `.foo`).
    #[default]
    Sectioned,
    /// Single-segment sections, object files detected by a `.o` suffix.
    Flat,
}

/// State carried from one line to the next.
///
/// Starts empty and is only ever replaced field by field as lines introduce a
/// new section, sub-section, object or explicit size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Current section name, `None` until the first section token.
    pub section: Option<String>,
    /// Current sub-section suffix (sectioned dialect only).
    pub subsection: String,
    /// Current object name or object file.
    pub object: String,
    /// Last explicit size seen.
    pub object_size: Size,
    /// Section transitions (sectioned) or object file transitions (flat).
    pub boundaries: usize,
    /// Lines that matched the field grammar.
    pub symbols: usize,
}

/// A trait representing one map report grammar.
pub trait Dialect {
    /// Column names, in the order `Record::fields` renders them.
    fn headers(&self) -> &'static [&'static str];

    /// What `ClassifierState::boundaries` counts, for the summary.
    fn boundary_label(&self) -> &'static str;

    /// Classifies one line.
    ///
    /// # Arguments
    /// * `state` - The state carried from the previous line.
    /// * `line` - The line, without its terminator.
    /// * `format` - How explicit sizes are converted.
    ///
    /// Returns the state for the next line and the row this line produces, if any.
    fn classify(
        &self,
        state: ClassifierState,
        line: &str,
        format: SizeFormat,
    ) -> (ClassifierState, Option<Record>);
}
