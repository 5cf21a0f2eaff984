//! Signal loaders and CSV reports
//!
//! These sit outside the tracker core: they turn files into a [`Signal`]
//! and drift results back into delimited text.

pub mod report;
pub mod text;
pub mod wav;

pub use report::{write_drift_csv, write_file_peaks_csv};
pub use text::{infer_sample_rate, load_text};
pub use wav::load_wav;

use crate::error::Result;
use crate::signal::Signal;
use std::path::Path;

/// Load `.wav` with hound, anything else as text columns
///
/// # Arguments
/// * `path` - Input file
/// * `sample_rate` - Required for single-column text, ignored otherwise
pub fn load_signal(path: &Path, sample_rate: Option<f64>) -> Result<Signal> {
    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    if is_wav {
        load_wav(path)
    } else {
        load_text(path, sample_rate)
    }
}
