//! CSV output for drift series and per-file peaks

use crate::error::{Result, TrackerError};
use crate::tracker::{drift_ppm, DriftPoint, FilePeak};
use csv::Writer;
use std::io::Write;
use std::path::Path;

pub const DRIFT_HEADER: [&str; 4] = ["time_s", "frequency_hz", "amplitude", "drift_ppm"];
pub const FILE_PEAK_HEADER: [&str; 5] = ["file", "peak_hz", "amplitude", "drift_ppm", "timestamp"];

/// Write drift rows to any writer
pub fn write_drift_points<W: Write>(writer: W, points: &[DriftPoint]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(DRIFT_HEADER)?;
    for point in points {
        wtr.write_record(&[
            point.time_s.to_string(),
            point.frequency_hz.to_string(),
            point.amplitude.to_string(),
            point.drift_ppm.to_string(),
        ])?;
    }
    flush(wtr)
}

/// Write per-file peaks; a missed peak leaves its numeric fields empty
///
/// The `timestamp` column carries the file's base name, which is where
/// recordings encode their capture time (e.g. `20240101_1200.wav`).
pub fn write_file_peaks<W: Write>(writer: W, peaks: &[FilePeak], center_hz: f64) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(FILE_PEAK_HEADER)?;
    for row in peaks {
        let file = row.path.display().to_string();
        let timestamp = row
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let record = match row.peak.into_option() {
            Some((frequency, amplitude)) => [
                file,
                frequency.to_string(),
                amplitude.to_string(),
                drift_ppm(frequency, center_hz).to_string(),
                timestamp,
            ],
            None => [file, String::new(), String::new(), String::new(), timestamp],
        };
        wtr.write_record(&record)?;
    }
    flush(wtr)
}

pub fn write_drift_csv(path: &Path, points: &[DriftPoint]) -> Result<()> {
    write_drift_points(create(path)?, points)
}

pub fn write_file_peaks_csv(path: &Path, peaks: &[FilePeak], center_hz: f64) -> Result<()> {
    write_file_peaks(create(path)?, peaks, center_hz)
}

fn create(path: &Path) -> Result<std::fs::File> {
    let io_err = |source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::File::create(path).map_err(io_err)
}

fn flush<W: Write>(mut wtr: Writer<W>) -> Result<()> {
    wtr.flush().map_err(|e| TrackerError::Csv(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::BandPeak;
    use std::path::PathBuf;

    #[test]
    fn test_drift_csv_layout() {
        let points = [DriftPoint {
            time_s: 0.25,
            frequency_hz: 1000.5,
            amplitude: 0.5,
            drift_ppm: 500.0,
        }];
        let mut out = Vec::new();
        write_drift_points(&mut out, &points).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "time_s,frequency_hz,amplitude,drift_ppm\n0.25,1000.5,0.5,500\n"
        );
    }

    #[test]
    fn test_missing_peak_leaves_blank_fields() {
        let peaks = [
            FilePeak {
                path: PathBuf::from("runs/20240101_1200.wav"),
                peak: BandPeak::Found {
                    frequency: 100.5,
                    amplitude: 2.0,
                },
            },
            FilePeak {
                path: PathBuf::from("b.wav"),
                peak: BandPeak::NotFound,
            },
        ];
        let mut out = Vec::new();
        write_file_peaks(&mut out, &peaks, 100.0).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "file,peak_hz,amplitude,drift_ppm,timestamp");
        assert_eq!(lines[1], "runs/20240101_1200.wav,100.5,2,5000,20240101_1200.wav");
        assert_eq!(lines[2], "b.wav,,,,b.wav");
    }
}
