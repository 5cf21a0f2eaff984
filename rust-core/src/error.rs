//! Error type shared by the tracker core and its loaders

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No peak estimates to summarize (signal shorter than one window or band never hit)")]
    NoData,

    #[error("FFT processing failed: {0}")]
    Fft(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to decode WAV: {0}")]
    Wav(#[from] hound::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl TrackerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TrackerError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
