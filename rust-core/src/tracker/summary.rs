//! Whole-record drift statistics
//!
//! Pure aggregation over a [`DriftSeries`]; formatting and persistence are
//! left to the caller.

use super::scanner::DriftSeries;
use crate::error::{Result, TrackerError};

/// Offset of `frequency_hz` from `target_hz` in parts per million
pub fn drift_ppm(frequency_hz: f64, target_hz: f64) -> f64 {
    (frequency_hz - target_hz) / target_hz * 1e6
}

/// One report row: a peak estimate with its ppm offset attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftPoint {
    pub time_s: f64,
    pub frequency_hz: f64,
    pub amplitude: f64,
    pub drift_ppm: f64,
}

/// Attach ppm offsets to every estimate, preserving order
pub fn drift_points(series: &DriftSeries, target_hz: f64) -> Vec<DriftPoint> {
    series
        .iter()
        .map(|e| DriftPoint {
            time_s: e.time_s,
            frequency_hz: e.frequency_hz,
            amplitude: e.amplitude,
            drift_ppm: drift_ppm(e.frequency_hz, target_hz),
        })
        .collect()
}

/// Aggregate drift statistics for one scan
#[derive(Debug, Clone, PartialEq)]
pub struct DriftSummary {
    pub target_hz: f64,
    pub count: usize,
    pub windows_scanned: usize,
    pub min_hz: f64,
    pub max_hz: f64,
    pub median_hz: f64,
    pub mean_hz: f64,
    /// max_hz - min_hz
    pub range_hz: f64,
    pub min_ppm: f64,
    pub max_ppm: f64,
    pub median_ppm: f64,
    pub first_time_s: f64,
    pub last_time_s: f64,
}

impl DriftSummary {
    /// Summarize a non-empty series
    ///
    /// # Errors
    /// `NoData` when the series holds no estimates, `InvalidInput` for a
    /// non-positive target.
    pub fn from_series(series: &DriftSeries, target_hz: f64) -> Result<Self> {
        if !(target_hz.is_finite() && target_hz > 0.0) {
            return Err(TrackerError::invalid(format!(
                "target frequency must be positive (got {target_hz})"
            )));
        }
        let (first, last) = match (series.estimates.first(), series.estimates.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TrackerError::NoData),
        };

        let mut freqs = series.frequencies();
        freqs.sort_by(f64::total_cmp);

        let count = freqs.len();
        let min_hz = freqs[0];
        let max_hz = freqs[count - 1];
        let median_hz = median_of_sorted(&freqs);
        let mean_hz = freqs.iter().sum::<f64>() / count as f64;

        Ok(Self {
            target_hz,
            count,
            windows_scanned: series.windows_scanned,
            min_hz,
            max_hz,
            median_hz,
            mean_hz,
            range_hz: max_hz - min_hz,
            min_ppm: drift_ppm(min_hz, target_hz),
            max_ppm: drift_ppm(max_hz, target_hz),
            median_ppm: drift_ppm(median_hz, target_hz),
            first_time_s: first.time_s,
            last_time_s: last.time_s,
        })
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::scanner::PeakEstimate;

    fn series(freqs: &[f64]) -> DriftSeries {
        DriftSeries {
            estimates: freqs
                .iter()
                .enumerate()
                .map(|(i, &f)| PeakEstimate {
                    time_s: 0.5 * i as f64,
                    frequency_hz: f,
                    amplitude: 1.0,
                })
                .collect(),
            windows_scanned: freqs.len(),
        }
    }

    #[test]
    fn test_ppm() {
        assert!((drift_ppm(1000.001, 1000.0) - 1.0).abs() < 1e-6);
        assert!((drift_ppm(995.0, 1000.0) + 5000.0).abs() < 1e-9);
        assert_eq!(drift_ppm(1000.0, 1000.0), 0.0);
    }

    #[test]
    fn test_summary_statistics() {
        let summary = DriftSummary::from_series(&series(&[1001.0, 999.0, 1003.0, 1000.0]), 1000.0)
            .unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.min_hz, 999.0);
        assert_eq!(summary.max_hz, 1003.0);
        assert_eq!(summary.median_hz, 1000.5);
        assert_eq!(summary.range_hz, 4.0);
        assert!((summary.mean_hz - 1000.75).abs() < 1e-12);
        assert!((summary.min_ppm + 1000.0).abs() < 1e-9);
        assert!((summary.max_ppm - 3000.0).abs() < 1e-9);
        assert_eq!(summary.first_time_s, 0.0);
        assert_eq!(summary.last_time_s, 1.5);
    }

    #[test]
    fn test_odd_count_median() {
        let summary = DriftSummary::from_series(&series(&[5.0, 1.0, 3.0]), 2.0).unwrap();
        assert_eq!(summary.median_hz, 3.0);
        assert!((summary.median_ppm - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let empty = DriftSeries::default();
        assert!(matches!(
            DriftSummary::from_series(&empty, 1000.0),
            Err(TrackerError::NoData)
        ));
    }

    #[test]
    fn test_bad_target_is_rejected() {
        assert!(matches!(
            DriftSummary::from_series(&series(&[1.0]), 0.0),
            Err(TrackerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_drift_points_keep_order() {
        let points = drift_points(&series(&[1000.0, 1000.5, 999.5]), 1000.0);

        assert_eq!(points.len(), 3);
        assert_eq!(points[1].time_s, 0.5);
        assert!((points[1].drift_ppm - 500.0).abs() < 1e-9);
        assert!((points[2].drift_ppm + 500.0).abs() < 1e-9);
    }
}
