//! Per-file peak tracking
//!
//! Each file is one whole-record spectrum; the drift is read across files
//! in sorted path order rather than across time windows.

use crate::error::Result;
use crate::io::load_signal;
use crate::spectrum::{compute_spectrum, BandPeak};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Peak near the centre frequency for one input file
#[derive(Debug, Clone, PartialEq)]
pub struct FilePeak {
    pub path: PathBuf,
    pub peak: BandPeak,
}

/// Locate the peak in `[center - half_band, center + half_band]` per file
///
/// # Arguments
/// * `paths` - Input files; processed in sorted order
/// * `sample_rate` - Needed for single-column text inputs
/// * `center_hz` - Band centre
/// * `half_band_hz` - Half-width of the band
pub fn track_files<P: AsRef<Path>>(
    paths: &[P],
    sample_rate: Option<f64>,
    center_hz: f64,
    half_band_hz: f64,
) -> Result<Vec<FilePeak>> {
    let mut sorted: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    sorted.sort();

    let mut rows = Vec::with_capacity(sorted.len());
    for path in sorted {
        let signal = load_signal(&path, sample_rate)?;
        let spectrum = compute_spectrum(signal.samples(), signal.sample_rate())?;
        let peak = spectrum.band_peak(center_hz - half_band_hz, center_hz + half_band_hz);

        match peak {
            BandPeak::Found {
                frequency,
                amplitude,
            } => info!(
                "{}: peak {frequency:.6} Hz, amp {amplitude:.3e}",
                path.display()
            ),
            BandPeak::NotFound => info!("{}: no bin within band", path.display()),
        }
        debug!(
            "{}: {} bins at {:.6} Hz spacing",
            path.display(),
            spectrum.len(),
            spectrum.bin_spacing()
        );

        rows.push(FilePeak { path, peak });
    }

    Ok(rows)
}
