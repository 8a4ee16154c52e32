//! Error types for map file conversion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("unable to find start of sections in map file (no \"{marker}\" line)")]
    MarkerNotFound { marker: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
