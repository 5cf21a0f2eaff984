//! One-sided amplitude spectrum of a single analysis block
//!
//! Combines DC removal, windowing and the FFT engine. Amplitudes are scaled
//! by 2/Σw so an isolated tone reads close to its peak amplitude.

use super::fft::FftEngine;
use super::peak::{locate_band_peak, BandPeak};
use super::windowing::{generate_window, one_sided_amplitude_scale, WindowType};
use crate::error::{Result, TrackerError};
use crate::signal::check_sample_rate;

/// Smallest block the engine will transform
pub const MIN_BLOCK_LEN: usize = 8;

/// Frequencies (Hz, ascending from 0) paired with amplitudes
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
    bin_spacing: f64,
}

impl Spectrum {
    /// Spacing between adjacent bins in Hz (sample_rate / n)
    pub fn bin_spacing(&self) -> f64 {
        self.bin_spacing
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Strongest component in `[band_min, band_max]`
    pub fn band_peak(&self, band_min: f64, band_max: f64) -> BandPeak {
        locate_band_peak(&self.frequencies, &self.amplitudes, band_min, band_max)
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.frequencies, self.amplitudes)
    }
}

/// Reusable spectrum engine for a fixed block length
///
/// Window coefficients, the amplitude scale and the FFT plan are computed
/// once; `analyze` can then be called for every block of that length.
pub struct SpectrumEngine {
    block_len: usize,
    sample_rate: f64,
    window: Vec<f64>,
    scale: f64,
    fft_engine: FftEngine,
    frequencies: Vec<f64>,
    scratch: Vec<f64>,
}

impl SpectrumEngine {
    /// Create new spectrum engine
    ///
    /// # Arguments
    /// * `block_len` - Samples per block (at least 8)
    /// * `sample_rate` - Sample rate in Hz
    /// * `window_type` - Taper applied after DC removal
    pub fn new(block_len: usize, sample_rate: f64, window_type: WindowType) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if block_len < MIN_BLOCK_LEN {
            return Err(TrackerError::invalid(format!(
                "window length {block_len} is below the minimum of {MIN_BLOCK_LEN} samples"
            )));
        }

        let window = generate_window(window_type, block_len);
        let scale = one_sided_amplitude_scale(&window);
        let fft_engine = FftEngine::new(block_len);
        let frequencies = fft_engine.frequency_axis(sample_rate);

        Ok(Self {
            block_len,
            sample_rate,
            window,
            scale,
            fft_engine,
            frequencies,
            scratch: vec![0.0; block_len],
        })
    }

    /// Compute the amplitude spectrum of one block
    ///
    /// # Arguments
    /// * `block` - Exactly `block_len` samples
    pub fn analyze(&mut self, block: &[f64]) -> Result<Spectrum> {
        if block.len() != self.block_len {
            return Err(TrackerError::invalid(format!(
                "expected a block of {} samples, got {}",
                self.block_len,
                block.len()
            )));
        }

        let mean = block.iter().sum::<f64>() / block.len() as f64;
        for ((dst, &s), &w) in self.scratch.iter_mut().zip(block).zip(&self.window) {
            *dst = (s - mean) * w;
        }

        let mut amplitudes = self.fft_engine.compute_magnitude(&self.scratch)?;
        for a in amplitudes.iter_mut() {
            *a *= self.scale;
        }

        Ok(Spectrum {
            frequencies: self.frequencies.clone(),
            amplitudes,
            bin_spacing: self.fft_engine.bin_spacing(self.sample_rate),
        })
    }

    pub fn block_len(&self) -> usize {
        self.block_len
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of bins per spectrum (block_len/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }
}

/// Hann-windowed amplitude spectrum of a whole block
///
/// Convenience wrapper that plans a [`SpectrumEngine`] for `samples.len()`.
pub fn compute_spectrum(samples: &[f64], sample_rate: f64) -> Result<Spectrum> {
    SpectrumEngine::new(samples.len(), sample_rate, WindowType::Hann)?.analyze(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq_hz: f64, amplitude: f64, sample_rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_bin_spacing_invariant() {
        let fs = 1000.0;
        let n = 250;
        let spectrum = compute_spectrum(&tone(50.0, 1.0, fs, n), fs).unwrap();

        assert_eq!(spectrum.len(), n / 2 + 1);
        assert_eq!(spectrum.frequencies[0], 0.0);
        assert!((spectrum.bin_spacing() - fs / n as f64).abs() < 1e-12);
        for pair in spectrum.frequencies.windows(2) {
            assert!((pair[1] - pair[0] - fs / n as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_amplitude_of_on_bin_tone() {
        // 64 Hz on a 4 Hz grid lands exactly on bin 16
        let fs = 1024.0;
        let spectrum = compute_spectrum(&tone(64.0, 0.5, fs, 256), fs).unwrap();

        let peak = spectrum.amplitudes[16];
        assert!((peak - 0.5).abs() < 0.02, "peak amplitude {peak}");
        assert!(spectrum.amplitudes.iter().all(|&a| a >= 0.0));
    }

    #[test]
    fn test_dc_is_removed() {
        let fs = 100.0;
        let samples: Vec<f64> = tone(10.0, 1.0, fs, 200).iter().map(|s| s + 5.0).collect();
        let spectrum = compute_spectrum(&samples, fs).unwrap();

        assert!(spectrum.amplitudes[0] < 0.05);
    }

    #[test]
    fn test_deterministic() {
        let fs = 8000.0;
        let samples = tone(440.0, 1.0, fs, 1000);
        let a = compute_spectrum(&samples, fs).unwrap();
        let b = compute_spectrum(&samples, fs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_short_block_and_bad_rate() {
        assert!(matches!(
            compute_spectrum(&[0.0; 7], 100.0),
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_spectrum(&[0.0; 16], 0.0),
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(compute_spectrum(&[0.0; 8], 100.0).is_ok());
    }

    #[test]
    fn test_engine_rejects_mismatched_block() {
        let mut engine = SpectrumEngine::new(64, 1000.0, WindowType::Hann).unwrap();
        assert_eq!(engine.num_bins(), 33);
        assert!(engine.analyze(&[0.0; 63]).is_err());
        assert!(engine.analyze(&[0.0; 64]).is_ok());
    }
}
