//! Plain-text sample files
//!
//! One column: samples, sample rate supplied by the caller.
//! Two or more columns: time in column 0, value in column 1; the sample
//! rate is the reciprocal of the median time step.

use crate::error::{Result, TrackerError};
use crate::signal::Signal;
use std::path::Path;

/// Read and parse a text sample file
pub fn load_text(path: &Path, sample_rate: Option<f64>) -> Result<Signal> {
    let text = std::fs::read_to_string(path).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_text(&text, path, sample_rate)
}

/// Parse whitespace/comma separated columns, ignoring blank and `#` lines
pub fn parse_text(text: &str, path: &Path, sample_rate: Option<f64>) -> Result<Signal> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let row = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .map(|field| field.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| TrackerError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("{e}: {trimmed}"),
            })?;
        rows.push(row);
    }

    let width = match rows.first() {
        Some(row) => row.len(),
        None => {
            return Err(TrackerError::invalid(format!(
                "{}: no numeric samples found",
                path.display()
            )))
        }
    };
    if let Some(line) = rows.iter().position(|row| row.len() < width.min(2)) {
        return Err(TrackerError::invalid(format!(
            "{}: data row {} has fewer columns than the first",
            path.display(),
            line + 1
        )));
    }

    if width == 1 {
        let sample_rate = sample_rate.ok_or_else(|| {
            TrackerError::invalid(format!(
                "{}: single-column text needs an explicit sample rate",
                path.display()
            ))
        })?;
        return Signal::new(rows.into_iter().map(|row| row[0]).collect(), sample_rate);
    }

    let times: Vec<f64> = rows.iter().map(|row| row[0]).collect();
    let values: Vec<f64> = rows.iter().map(|row| row[1]).collect();
    let sample_rate = infer_sample_rate(&times).map_err(|e| match e {
        TrackerError::InvalidInput(msg) => {
            TrackerError::InvalidInput(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;

    Signal::new(values, sample_rate)
}

/// Sample rate from a time column: 1 / median(diff(t))
pub fn infer_sample_rate(times: &[f64]) -> Result<f64> {
    if times.len() < 2 {
        return Err(TrackerError::invalid(
            "need at least two time stamps to infer a sample rate",
        ));
    }

    let mut steps: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
    steps.sort_by(f64::total_cmp);
    let mid = steps.len() / 2;
    let dt = if steps.len() % 2 == 0 {
        0.5 * (steps[mid - 1] + steps[mid])
    } else {
        steps[mid]
    };

    if !(dt > 0.0) {
        return Err(TrackerError::invalid(
            "non-increasing time column; cannot infer sample rate",
        ));
    }
    Ok(1.0 / dt)
}
