//! Python bindings for spectrum, band peak and drift scanning

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::error::TrackerError;
use crate::spectrum::{self, WindowType};
use crate::tracker::{self, DriftSeries, DriftSummary, SlidingWindowScanner, TrackerConfig};

impl From<TrackerError> for PyErr {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidInput(_) | TrackerError::NoData | TrackerError::Parse { .. } => {
                PyValueError::new_err(err.to_string())
            }
            TrackerError::Io { .. } | TrackerError::Wav(_) | TrackerError::Csv(_) => {
                PyIOError::new_err(err.to_string())
            }
            TrackerError::Fft(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

fn contiguous<'a>(array: &'a PyReadonlyArray1<f64>) -> PyResult<&'a [f64]> {
    array
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

type SeriesArrays<'py> = (&'py PyArray1<f64>, &'py PyArray1<f64>, &'py PyArray1<f64>);

fn series_arrays(py: Python<'_>, series: DriftSeries) -> SeriesArrays<'_> {
    (
        PyArray1::from_vec(py, series.times()),
        PyArray1::from_vec(py, series.frequencies()),
        PyArray1::from_vec(py, series.amplitudes()),
    )
}

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Hann-windowed one-sided amplitude spectrum
///
/// Args:
///     samples: Block of samples (at least 8)
///     sample_rate: Sample rate in Hz
///
/// Returns:
///     Tuple of (frequencies, amplitudes) numpy arrays
#[pyfunction]
fn compute_spectrum<'py>(
    py: Python<'py>,
    samples: PyReadonlyArray1<f64>,
    sample_rate: f64,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let spectrum = spectrum::compute_spectrum(contiguous(&samples)?, sample_rate)?;
    let (frequencies, amplitudes) = spectrum.into_parts();

    Ok((PyArray1::from_vec(py, frequencies), PyArray1::from_vec(py, amplitudes)))
}

/// Strongest component within [band_min, band_max]
///
/// Returns:
///     (frequency, amplitude) or None when the band holds no bins
#[pyfunction]
fn locate_band_peak(
    frequencies: PyReadonlyArray1<f64>,
    amplitudes: PyReadonlyArray1<f64>,
    band_min: f64,
    band_max: f64,
) -> PyResult<Option<(f64, f64)>> {
    let peak = spectrum::locate_band_peak(
        contiguous(&frequencies)?,
        contiguous(&amplitudes)?,
        band_min,
        band_max,
    );
    Ok(peak.into_option())
}

/// Sliding-window peak track around a target frequency
///
/// Returns:
///     Tuple of (time_s, frequency_hz, amplitude) numpy arrays
#[pyfunction]
#[pyo3(signature = (samples, sample_rate, target, band_width=20.0, window_seconds=0.5, step_seconds=0.25))]
fn scan_drift<'py>(
    py: Python<'py>,
    samples: PyReadonlyArray1<f64>,
    sample_rate: f64,
    target: f64,
    band_width: f64,
    window_seconds: f64,
    step_seconds: f64,
) -> PyResult<SeriesArrays<'py>> {
    let series = tracker::scan_drift(
        contiguous(&samples)?,
        sample_rate,
        target,
        band_width,
        window_seconds,
        step_seconds,
    )?;
    Ok(series_arrays(py, series))
}

/// Drift tracker with a fixed configuration
#[pyclass(name = "DriftTracker")]
pub struct PyDriftTracker {
    scanner: SlidingWindowScanner,
}

#[pymethods]
impl PyDriftTracker {
    /// Create a new drift tracker
    ///
    /// Args:
    ///     target_hz: Band centre and drift reference
    ///     band_width_hz: Full band width
    ///     window_seconds: Analysis window duration
    ///     step_seconds: Hop between windows
    ///     window_type: Taper applied to each window
    #[new]
    #[pyo3(signature = (target_hz, band_width_hz=20.0, window_seconds=0.5, step_seconds=0.25, window_type=PyWindowType::Hann))]
    fn new(
        target_hz: f64,
        band_width_hz: f64,
        window_seconds: f64,
        step_seconds: f64,
        window_type: PyWindowType,
    ) -> PyResult<Self> {
        let config = TrackerConfig::new(target_hz, band_width_hz)
            .with_window_seconds(window_seconds)
            .with_step_seconds(step_seconds)
            .with_window_type(window_type.into());

        Ok(Self {
            scanner: SlidingWindowScanner::new(config)?,
        })
    }

    /// Scan a signal
    ///
    /// Returns:
    ///     Tuple of (time_s, frequency_hz, amplitude) numpy arrays
    fn scan<'py>(
        &self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
        sample_rate: f64,
    ) -> PyResult<SeriesArrays<'py>> {
        let series = self.scanner.scan(contiguous(&samples)?, sample_rate)?;
        Ok(series_arrays(py, series))
    }

    /// Scan and summarize; raises ValueError when no estimates were produced
    fn summary<'py>(
        &self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
        sample_rate: f64,
    ) -> PyResult<&'py PyDict> {
        let series = self.scanner.scan(contiguous(&samples)?, sample_rate)?;
        let summary = DriftSummary::from_series(&series, self.scanner.config().target_hz)?;

        let dict = PyDict::new(py);
        dict.set_item("count", summary.count)?;
        dict.set_item("windows_scanned", summary.windows_scanned)?;
        dict.set_item("min_hz", summary.min_hz)?;
        dict.set_item("max_hz", summary.max_hz)?;
        dict.set_item("median_hz", summary.median_hz)?;
        dict.set_item("mean_hz", summary.mean_hz)?;
        dict.set_item("range_hz", summary.range_hz)?;
        dict.set_item("min_ppm", summary.min_ppm)?;
        dict.set_item("max_ppm", summary.max_ppm)?;
        dict.set_item("median_ppm", summary.median_ppm)?;
        Ok(dict)
    }

    /// Get target frequency
    fn get_target_hz(&self) -> f64 {
        self.scanner.config().target_hz
    }

    /// Get search band as (min, max)
    fn get_band(&self) -> (f64, f64) {
        self.scanner.config().band()
    }
}

pub(super) fn register(m: &PyModule) -> PyResult<()> {
    m.add_class::<PyWindowType>()?;
    m.add_class::<PyDriftTracker>()?;
    m.add_function(wrap_pyfunction!(compute_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(locate_band_peak, m)?)?;
    m.add_function(wrap_pyfunction!(scan_drift, m)?)?;
    Ok(())
}
