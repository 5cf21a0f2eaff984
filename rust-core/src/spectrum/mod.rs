//! Spectral analysis: windowed FFT and band peak search

pub mod analysis;
pub mod fft;
pub mod peak;
pub mod windowing;

pub use analysis::{compute_spectrum, Spectrum, SpectrumEngine, MIN_BLOCK_LEN};
pub use fft::FftEngine;
pub use peak::{locate_band_peak, parabolic_vertex, BandPeak};
pub use windowing::{generate_window, WindowType};
