//! Tracker configuration
//!
//! Passed explicitly to the scanner; nothing here is read from the
//! environment.

use crate::error::{Result, TrackerError};
use crate::signal::check_sample_rate;
use crate::spectrum::{WindowType, MIN_BLOCK_LEN};

/// Sliding-window drift tracker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Frequency the drift is measured against, in Hz
    pub target_hz: f64,

    /// Full width of the search band centred on the target, in Hz
    pub band_width_hz: f64,

    /// Analysis window duration in seconds
    pub window_seconds: f64,

    /// Hop between window starts in seconds
    pub step_seconds: f64,

    /// Taper applied to each window
    pub window_type: WindowType,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            target_hz: 1000.0,
            band_width_hz: 20.0,
            window_seconds: 0.5,
            step_seconds: 0.25,
            window_type: WindowType::Hann,
        }
    }
}

impl TrackerConfig {
    pub fn new(target_hz: f64, band_width_hz: f64) -> Self {
        Self {
            target_hz,
            band_width_hz,
            ..Self::default()
        }
    }

    pub fn with_window_seconds(mut self, window_seconds: f64) -> Self {
        self.window_seconds = window_seconds;
        self
    }

    pub fn with_step_seconds(mut self, step_seconds: f64) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    pub fn with_window_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Check every field for a usable value
    pub fn validate(&self) -> Result<()> {
        if !(self.target_hz.is_finite() && self.target_hz > 0.0) {
            return Err(TrackerError::invalid(format!(
                "target frequency must be positive (got {})",
                self.target_hz
            )));
        }
        if !(self.band_width_hz.is_finite() && self.band_width_hz >= 0.0) {
            return Err(TrackerError::invalid(format!(
                "band width must be non-negative (got {})",
                self.band_width_hz
            )));
        }
        if !(self.window_seconds.is_finite() && self.window_seconds > 0.0) {
            return Err(TrackerError::invalid(format!(
                "window duration must be positive (got {})",
                self.window_seconds
            )));
        }
        if !(self.step_seconds.is_finite() && self.step_seconds > 0.0) {
            return Err(TrackerError::invalid(format!(
                "step duration must be positive (got {})",
                self.step_seconds
            )));
        }
        Ok(())
    }

    /// Inclusive search band `(min, max)` in Hz
    pub fn band(&self) -> (f64, f64) {
        let half = self.band_width_hz / 2.0;
        (self.target_hz - half, self.target_hz + half)
    }

    /// Window length in samples, never below the minimum FFT size
    pub fn window_len(&self, sample_rate: f64) -> Result<usize> {
        check_sample_rate(sample_rate)?;
        Ok(seconds_to_samples(self.window_seconds, sample_rate).max(MIN_BLOCK_LEN))
    }

    /// Step length in samples, at least one
    pub fn step_len(&self, sample_rate: f64) -> Result<usize> {
        check_sample_rate(sample_rate)?;
        Ok(seconds_to_samples(self.step_seconds, sample_rate).max(1))
    }
}

fn seconds_to_samples(seconds: f64, sample_rate: f64) -> usize {
    // Negative or NaN products saturate to zero
    (seconds * sample_rate).round() as usize
}
