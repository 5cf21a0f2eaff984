//! FFT engine using realfft for real-valued blocks
//!
//! One plan per block length; buffers are reused across calls so a sliding
//! scan does not reallocate per window.

use crate::error::{Result, TrackerError};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (clobbered by the transform)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute |X[k]| for k = 0..=fft_size/2
    ///
    /// # Arguments
    /// * `block` - Exactly `fft_size` samples (already windowed)
    pub fn compute_magnitude(&mut self, block: &[f64]) -> Result<Vec<f64>> {
        if block.len() != self.fft_size {
            return Err(TrackerError::invalid(format!(
                "block has {} samples, engine planned for {}",
                block.len(),
                self.fft_size
            )));
        }

        self.input_buffer.copy_from_slice(block);
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| TrackerError::Fft(e.to_string()))?;

        Ok(self.output_buffer.iter().map(|c| c.norm()).collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Bin spacing in Hz
    pub fn bin_spacing(&self, sample_rate: f64) -> f64 {
        sample_rate / self.fft_size as f64
    }

    /// Frequency axis in Hz, 0 to Nyquist
    pub fn frequency_axis(&self, sample_rate: f64) -> Vec<f64> {
        let spacing = self.bin_spacing(sample_rate);
        (0..self.num_bins()).map(|bin| bin as f64 * spacing).collect()
    }
}
