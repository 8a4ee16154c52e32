//! Linker map to CSV converter.
//!
//! This library turns a GNU ld memory map report into a CSV table.
//! It is organized into several modules:
//! - `config`: CLI configuration and conversion options.
//! - `scanner`: Line reading and start-of-data detection.
//! - `dialect`: Map grammar backends and the carried classifier state.
//! - `converter`: The main conversion orchestration.
//! - `record`: Output rows.
//! - `writer`: CSV output.

pub mod config;
pub mod converter;
pub mod dialect;
pub mod error;
pub mod record;
pub mod scanner;
pub mod utils;
pub mod writer;

pub use config::{ConvertOptions, SizeFormat};
pub use converter::{convert, convert_file, Converter, Summary};
pub use dialect::DialectKind;
pub use error::{MapError, Result};
