//! Configuration module.
//!
//! This module defines the command-line interface (CLI) using `clap`, and the
//! library-level [`ConvertOptions`] the CLI is reduced to before conversion.

use clap::Parser;
use std::path::PathBuf;

use crate::dialect::DialectKind;

/// Convert a GNU ld memory map report into a CSV table.
///
/// Everything before the "Linker script and memory map" line is skipped; each
/// remaining line that carries an address becomes one CSV row.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The input .map file
    pub input: PathBuf,

    /// The output .csv file (overwritten if it exists)
    pub output: PathBuf,

    /// Emit 'size' values as hex strings rather than decimal integers
    #[arg(long)]
    pub hex_size: bool,

    /// Map file grammar to parse with
    #[arg(long, value_enum, default_value_t = DialectKind::Sectioned)]
    pub dialect: DialectKind,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,
}

impl Config {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            dialect: self.dialect,
            size_format: if self.hex_size {
                SizeFormat::Hex
            } else {
                SizeFormat::Decimal
            },
        }
    }
}

/// How explicit `0x...` sizes are written to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeFormat {
    /// Parse the hex digits into an unsigned integer.
    #[default]
    Decimal,
    /// Pass the original text through, `0x` prefix included.
    Hex,
}

/// Options controlling a single conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub dialect: DialectKind,
    pub size_format: SizeFormat,
}
