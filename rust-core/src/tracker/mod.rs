//! Drift tracking over time

pub mod config;
pub mod files;
pub mod scanner;
pub mod summary;

pub use config::TrackerConfig;
pub use files::{track_files, FilePeak};
pub use scanner::{scan_drift, DriftSeries, PeakEstimate, SlidingWindowScanner};
pub use summary::{drift_points, drift_ppm, DriftPoint, DriftSummary};
