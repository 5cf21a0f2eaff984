use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use drift_tracker::{
    compute_spectrum, drift_points,
    io::{load_signal, write_drift_csv, write_file_peaks_csv},
    tracker::track_files,
    BandPeak, DriftSummary, SlidingWindowScanner, TrackerConfig, WindowType,
};
use env_logger::Env;
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "drift-tracker",
    version,
    about = "Track the frequency drift of a tone near a target frequency"
)]
struct Cli {
    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

fn parse_window(name: &str) -> Result<WindowType, String> {
    WindowType::from_name(name).ok_or_else(|| {
        format!("unknown window '{name}' (expected hann, hamming, blackman or rectangular)")
    })
}

#[derive(Subcommand)]
enum Commands {
    /// Sliding-window drift of one recording (.wav or text columns)
    Scan {
        #[arg(long)]
        input: PathBuf,
        /// Target frequency in Hz (band centre and ppm reference)
        #[arg(long)]
        target: f64,
        /// Full band width in Hz
        #[arg(long, default_value_t = 20.0)]
        band: f64,
        /// Window duration in seconds
        #[arg(long, default_value_t = 0.5)]
        window: f64,
        /// Step between windows in seconds
        #[arg(long, default_value_t = 0.25)]
        step: f64,
        /// Needed for single-column text input
        #[arg(long)]
        sample_rate: Option<f64>,
        /// Window function (hann, hamming, blackman, rectangular)
        #[arg(long, default_value = "hann", value_parser = parse_window)]
        window_fn: WindowType,
        #[arg(long)]
        out_csv: Option<PathBuf>,
    },
    /// Whole-file peak near a centre frequency, one row per input
    Files {
        /// Files or glob patterns (e.g. 'data/*.wav')
        #[arg(long, num_args = 1.., required = true)]
        inputs: Vec<String>,
        /// Centre frequency in Hz
        #[arg(long)]
        center: f64,
        /// Half-width of the band (+/- Hz around the centre)
        #[arg(long, default_value_t = 2.0)]
        band: f64,
        #[arg(long)]
        sample_rate: Option<f64>,
        #[arg(long)]
        out_csv: Option<PathBuf>,
    },
    /// Strongest component near a frequency in one whole recording
    Spectrum {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        center: f64,
        /// Half-width of the band (+/- Hz around the centre)
        #[arg(long, default_value_t = 5.0)]
        band: f64,
        #[arg(long)]
        sample_rate: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    match cli.command {
        Commands::Scan {
            input,
            target,
            band,
            window,
            step,
            sample_rate,
            window_fn,
            out_csv,
        } => {
            let config = TrackerConfig::new(target, band)
                .with_window_seconds(window)
                .with_step_seconds(step)
                .with_window_type(window_fn);
            run_scan(input, config, sample_rate, out_csv)
        }
        Commands::Files {
            inputs,
            center,
            band,
            sample_rate,
            out_csv,
        } => run_files(inputs, center, band, sample_rate, out_csv),
        Commands::Spectrum {
            input,
            center,
            band,
            sample_rate,
        } => run_spectrum(input, center, band, sample_rate),
    }
}

fn run_scan(
    input: PathBuf,
    config: TrackerConfig,
    sample_rate: Option<f64>,
    out_csv: Option<PathBuf>,
) -> Result<()> {
    let target = config.target_hz;
    let scanner = SlidingWindowScanner::new(config)?;
    let signal = load_signal(&input, sample_rate)
        .with_context(|| format!("loading {}", input.display()))?;
    info!(
        "Loaded {} samples at {} Hz ({:.3} s), {} window",
        signal.len(),
        signal.sample_rate(),
        signal.duration(),
        scanner.config().window_type.name()
    );

    let series = scanner.scan_signal(&signal)?;
    let points = drift_points(&series, target);
    for p in &points {
        debug!(
            "t={:.3}s {:.6} Hz amp {:.3e} ({:+.3} ppm)",
            p.time_s, p.frequency_hz, p.amplitude, p.drift_ppm
        );
    }

    if let Some(path) = &out_csv {
        write_drift_csv(path, &points).with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {} rows to {}", points.len(), path.display());
    }

    if series.no_windows_scanned() {
        println!(
            "No data: {} is shorter than one {:.3} s window",
            input.display(),
            scanner.config().window_seconds
        );
        return Ok(());
    }

    match DriftSummary::from_series(&series, target) {
        Ok(summary) => {
            println!(
                "{} estimates from {} windows ({:.3}s to {:.3}s)",
                summary.count, summary.windows_scanned, summary.first_time_s, summary.last_time_s
            );
            println!(
                "frequency: min {:.6} Hz, median {:.6} Hz, max {:.6} Hz, range {:.6} Hz",
                summary.min_hz, summary.median_hz, summary.max_hz, summary.range_hz
            );
            println!(
                "drift vs {} Hz: min {:+.3} ppm, median {:+.3} ppm, max {:+.3} ppm",
                target, summary.min_ppm, summary.median_ppm, summary.max_ppm
            );
        }
        Err(drift_tracker::TrackerError::NoData) => {
            let (lo, hi) = scanner.config().band();
            println!(
                "No data: {} windows scanned, none had a bin in [{lo}, {hi}] Hz",
                series.windows_scanned
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Expand each pattern; a pattern matching nothing is kept as a literal path
fn expand_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let matches: Vec<PathBuf> = match glob::glob(pattern) {
            Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
            Err(e) => {
                debug!("{pattern} is not a valid glob ({e}), using it as a path");
                Vec::new()
            }
        };
        if matches.is_empty() {
            files.push(PathBuf::from(pattern));
        } else {
            debug!("{pattern} matched {} file(s)", matches.len());
            files.extend(matches);
        }
    }
    files
}

fn run_files(
    inputs: Vec<String>,
    center: f64,
    band: f64,
    sample_rate: Option<f64>,
    out_csv: Option<PathBuf>,
) -> Result<()> {
    let (found, missing): (Vec<PathBuf>, Vec<PathBuf>) =
        expand_inputs(&inputs).into_iter().partition(|path| path.exists());
    for path in &missing {
        warn!("Skipping missing input {}", path.display());
    }
    if found.is_empty() {
        bail!("No input files found.");
    }

    let rows = track_files(&found, sample_rate, center, band)?;
    for row in &rows {
        match row.peak {
            BandPeak::Found {
                frequency,
                amplitude,
            } => println!(
                "{}: peak {frequency:.6} Hz, amp {amplitude:.3e}",
                row.path.display()
            ),
            BandPeak::NotFound => println!("{}: no peak in band", row.path.display()),
        }
    }

    if let Some(path) = &out_csv {
        write_file_peaks_csv(path, &rows, center)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}

fn run_spectrum(input: PathBuf, center: f64, band: f64, sample_rate: Option<f64>) -> Result<()> {
    let signal = load_signal(&input, sample_rate)
        .with_context(|| format!("loading {}", input.display()))?;
    println!("Loaded {} samples at {} Hz", signal.len(), signal.sample_rate());

    let spectrum = compute_spectrum(signal.samples(), signal.sample_rate())?;
    info!(
        "{} bins, {:.6} Hz resolution",
        spectrum.len(),
        spectrum.bin_spacing()
    );

    match spectrum.band_peak(center - band, center + band) {
        BandPeak::Found {
            frequency,
            amplitude,
        } => println!("Peak near {center} Hz: {frequency:.6} Hz, amplitude {amplitude:.3e}"),
        BandPeak::NotFound => println!("No spectral bin within {center} +/- {band} Hz"),
    }

    Ok(())
}
