//! Window functions applied to each analysis block before the FFT
//!
//! All windows are symmetric (endpoints equal), matching the usual
//! `0.5 - 0.5*cos(2πn/(M-1))` definition for Hann.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    /// Zero at both edges, sidelobes ~-31 dB
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// Rectangular window (no weighting)
    Rectangular,
}

impl WindowType {
    /// Parse a window name as used on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Some(WindowType::Hann),
            "hamming" => Some(WindowType::Hamming),
            "blackman" => Some(WindowType::Blackman),
            "rect" | "rectangular" | "boxcar" => Some(WindowType::Rectangular),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::Rectangular => "rectangular",
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    // Symmetric definitions divide by M-1; a single point is just 1.0
    if length <= 1 {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;
    let phase = |n: usize| 2.0 * PI * n as f64 / denom;

    match window_type {
        WindowType::Hann => (0..length).map(|n| 0.5 - 0.5 * phase(n).cos()).collect(),
        WindowType::Hamming => (0..length).map(|n| 0.54 - 0.46 * phase(n).cos()).collect(),
        WindowType::Blackman => (0..length)
            .map(|n| 0.42 - 0.5 * phase(n).cos() + 0.08 * (2.0 * phase(n)).cos())
            .collect(),
        WindowType::Rectangular => vec![1.0; length],
    }
}

/// Amplitude scale for a one-sided spectrum: 2 / Σw
///
/// Multiplying |X[k]| by this recovers the peak amplitude of an isolated
/// sinusoid (window gain plus the folded negative-frequency half).
pub fn one_sided_amplitude_scale(window: &[f64]) -> f64 {
    let sum: f64 = window.iter().sum();
    if sum > 0.0 {
        2.0 / sum
    } else {
        0.0
    }
}
