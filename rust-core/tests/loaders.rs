use drift_tracker::io::{load_signal, write_drift_csv, write_file_peaks_csv};
use drift_tracker::tracker::track_files;
use drift_tracker::{drift_points, scan_drift, TrackerError};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::f64::consts::PI;
use std::path::Path;

fn write_wav_tone(path: &Path, freq_hz: f64, sample_rate: u32, seconds: f64) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let n = (sample_rate as f64 * seconds) as usize;
    for i in 0..n {
        let s = 0.5 * (2.0 * PI * freq_hz * i as f64 / sample_rate as f64).sin();
        writer.write_sample((s * i16::MAX as f64) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn wav_and_text_dispatch_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let wav = dir.path().join("tone.WAV");
    write_wav_tone(&wav, 440.0, 8000, 0.5);
    let signal = load_signal(&wav, None).unwrap();
    assert_eq!(signal.sample_rate(), 8000.0);
    assert_eq!(signal.len(), 4000);

    let txt = dir.path().join("series.dat");
    std::fs::write(&txt, "0.0 1\n0.01 2\n0.02 3\n").unwrap();
    let signal = load_signal(&txt, None).unwrap();
    assert!((signal.sample_rate() - 100.0).abs() < 1e-6);

    let single = dir.path().join("single.txt");
    std::fs::write(&single, "1\n2\n3\n").unwrap();
    assert!(matches!(
        load_signal(&single, None),
        Err(TrackerError::InvalidInput(_))
    ));
    assert_eq!(load_signal(&single, Some(50.0)).unwrap().len(), 3);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    assert!(matches!(
        load_signal(&missing, Some(1.0)),
        Err(TrackerError::Io { .. })
    ));
}

#[test]
fn wav_scan_round_trip_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("carrier.wav");
    write_wav_tone(&wav, 1501.2, 16000, 2.0);

    let signal = load_signal(&wav, None).unwrap();
    let series = scan_drift(signal.samples(), signal.sample_rate(), 1500.0, 10.0, 0.5, 0.5).unwrap();
    assert_eq!(series.len(), 4);
    for estimate in &series {
        assert!((estimate.frequency_hz - 1501.2).abs() < 0.15);
        assert!((estimate.amplitude - 0.5).abs() < 0.05);
    }

    let out = dir.path().join("nested/out/drift.csv");
    write_drift_csv(&out, &drift_points(&series, 1500.0)).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "time_s,frequency_hz,amplitude,drift_ppm");
    assert!(lines[1].starts_with("0.25,"));
}

#[test]
fn per_file_peaks_written_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let late = dir.path().join("2024_02.wav");
    let early = dir.path().join("2024_01.wav");
    write_wav_tone(&late, 7468.3, 32000, 1.0);
    write_wav_tone(&early, 7467.8, 32000, 1.0);

    let rows = track_files(&[late, early], None, 7467.779, 3.0).unwrap();
    assert!(rows[0].path.ends_with("2024_01.wav"));
    assert!((rows[0].peak.frequency().unwrap() - 7467.8).abs() < 0.1);
    assert!((rows[1].peak.frequency().unwrap() - 7468.3).abs() < 0.1);

    let out = dir.path().join("drift.csv");
    write_file_peaks_csv(&out, &rows, 7467.779).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text.lines().next(), Some("file,peak_hz,amplitude,drift_ppm,timestamp"));
    assert!(text.lines().nth(1).unwrap().ends_with(",2024_01.wav"));
}
