//! Sliding-window scan producing a drift series
//!
//! Windows start at 0, step, 2*step, ... while they fit in the signal. Each
//! window gets its own spectrum and band peak; windows with no bin in the
//! band contribute nothing.

use super::config::TrackerConfig;
use crate::error::{Result, TrackerError};
use crate::signal::{check_sample_rate, Signal};
use crate::spectrum::{BandPeak, SpectrumEngine};
use log::{debug, info, warn};

/// Peak found in one analysis window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakEstimate {
    /// Midpoint of the window in seconds from the start of the signal
    pub time_s: f64,
    pub frequency_hz: f64,
    pub amplitude: f64,
}

/// Time-ordered peak estimates from one scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftSeries {
    pub estimates: Vec<PeakEstimate>,

    /// Windows that fit in the signal, including those that missed the band
    pub windows_scanned: usize,
}

impl DriftSeries {
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// True when the signal was shorter than a single window
    pub fn no_windows_scanned(&self) -> bool {
        self.windows_scanned == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeakEstimate> {
        self.estimates.iter()
    }

    pub fn times(&self) -> Vec<f64> {
        self.estimates.iter().map(|e| e.time_s).collect()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.estimates.iter().map(|e| e.frequency_hz).collect()
    }

    pub fn amplitudes(&self) -> Vec<f64> {
        self.estimates.iter().map(|e| e.amplitude).collect()
    }
}

impl<'a> IntoIterator for &'a DriftSeries {
    type Item = &'a PeakEstimate;
    type IntoIter = std::slice::Iter<'a, PeakEstimate>;

    fn into_iter(self) -> Self::IntoIter {
        self.estimates.iter()
    }
}

/// Sliding-window spectral peak tracker
#[derive(Debug, Clone)]
pub struct SlidingWindowScanner {
    config: TrackerConfig,
}

impl SlidingWindowScanner {
    /// Create a scanner from a validated configuration
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn scan_signal(&self, signal: &Signal) -> Result<DriftSeries> {
        self.scan(signal.samples(), signal.sample_rate())
    }

    /// Scan a full record
    ///
    /// # Arguments
    /// * `samples` - Signal samples (at least one)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    /// The drift series; empty (with `windows_scanned == 0`) when the signal
    /// is shorter than one window.
    pub fn scan(&self, samples: &[f64], sample_rate: f64) -> Result<DriftSeries> {
        check_sample_rate(sample_rate)?;
        if samples.is_empty() {
            return Err(TrackerError::invalid("signal has no samples"));
        }

        let nwin = self.config.window_len(sample_rate)?;
        let nstep = self.config.step_len(sample_rate)?;
        let (band_min, band_max) = self.config.band();

        if samples.len() < nwin {
            warn!(
                "signal has {} samples, shorter than one {}-sample window; nothing scanned",
                samples.len(),
                nwin
            );
            return Ok(DriftSeries::default());
        }

        let mut engine = SpectrumEngine::new(nwin, sample_rate, self.config.window_type)?;
        let mut series = DriftSeries {
            estimates: Vec::with_capacity((samples.len() - nwin) / nstep + 1),
            windows_scanned: 0,
        };

        debug!(
            "scanning {} samples at {} Hz: window {} / step {} samples, band [{}, {}] Hz",
            samples.len(),
            sample_rate,
            nwin,
            nstep,
            band_min,
            band_max
        );

        // nwin <= len here, so the last valid start is len - nwin
        let last_start = samples.len() - nwin;
        let mut start = 0;
        while start <= last_start {
            let spectrum = engine.analyze(&samples[start..start + nwin])?;
            series.windows_scanned += 1;

            let time_s = (start as f64 + nwin as f64 / 2.0) / sample_rate;
            match spectrum.band_peak(band_min, band_max) {
                BandPeak::Found {
                    frequency,
                    amplitude,
                } => {
                    debug!("t={time_s:.4}s peak {frequency:.6} Hz amp {amplitude:.3e}");
                    series.estimates.push(PeakEstimate {
                        time_s,
                        frequency_hz: frequency,
                        amplitude,
                    });
                }
                BandPeak::NotFound => debug!("t={time_s:.4}s no bin in band"),
            }

            start = match start.checked_add(nstep) {
                Some(next) => next,
                None => break,
            };
        }

        if series.is_empty() {
            warn!(
                "{} windows scanned but none had a bin in [{}, {}] Hz",
                series.windows_scanned, band_min, band_max
            );
        } else {
            info!(
                "scanned {} windows, kept {} peak estimates",
                series.windows_scanned,
                series.len()
            );
        }

        Ok(series)
    }
}

/// Track the peak near `target` across a signal
///
/// # Arguments
/// * `signal` - Samples
/// * `sample_rate` - Sample rate in Hz
/// * `target` - Band centre and drift reference in Hz
/// * `band_width` - Full band width in Hz
/// * `window_seconds` - Window duration
/// * `step_seconds` - Hop between windows
pub fn scan_drift(
    signal: &[f64],
    sample_rate: f64,
    target: f64,
    band_width: f64,
    window_seconds: f64,
    step_seconds: f64,
) -> Result<DriftSeries> {
    let config = TrackerConfig::new(target, band_width)
        .with_window_seconds(window_seconds)
        .with_step_seconds(step_seconds);
    SlidingWindowScanner::new(config)?.scan(signal, sample_rate)
}
