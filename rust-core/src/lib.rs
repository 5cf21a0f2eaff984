//! Drift Tracker - sliding-window spectral peak tracking
//!
//! Locates the dominant component near a target frequency in each window of
//! a sampled signal, refines it below bin resolution, and reports how it
//! drifts over time (in Hz and ppm).

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod io;
pub mod signal;
pub mod spectrum;
pub mod tracker;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, TrackerError};
pub use signal::Signal;
pub use spectrum::{compute_spectrum, locate_band_peak, BandPeak, Spectrum, SpectrumEngine, WindowType};
pub use tracker::{
    drift_points, scan_drift, DriftPoint, DriftSeries, DriftSummary, PeakEstimate,
    SlidingWindowScanner, TrackerConfig,
};
