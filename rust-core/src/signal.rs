//! Sampled signal handed to the tracker by any loader

use crate::error::{Result, TrackerError};

/// Uniformly sampled real-valued signal
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Signal {
    /// Create a validated signal
    ///
    /// # Arguments
    /// * `samples` - Sample amplitudes (at least one)
    /// * `sample_rate` - Sample rate in Hz (positive, finite)
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if samples.is_empty() {
            return Err(TrackerError::invalid("signal has no samples"));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(TrackerError::invalid(format!(
            "sample rate must be positive and finite (got {sample_rate})"
        )));
    }
    Ok(())
}
