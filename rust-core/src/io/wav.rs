//! WAV decoding with hound
//!
//! Integer PCM is scaled by the largest positive code so full scale maps to
//! about ±1.0. Multi-channel files keep the channel with the largest
//! variance.

use crate::error::{Result, TrackerError};
use crate::signal::Signal;
use hound::{SampleFormat, WavReader};
use log::debug;
use std::io::Read;
use std::path::Path;

/// Decode a WAV file into a mono signal
pub fn load_wav(path: &Path) -> Result<Signal> {
    let reader = WavReader::open(path)?;
    let signal = decode_wav(reader)?;
    debug!(
        "{}: {} samples at {} Hz",
        path.display(),
        signal.len(),
        signal.sample_rate()
    );
    Ok(signal)
}

/// Decode from any WAV reader (file or in-memory)
pub fn decode_wav<R: Read>(mut reader: WavReader<R>) -> Result<Signal> {
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Int => {
            let full_scale = ((1_i64 << (spec.bits_per_sample - 1)) - 1) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / full_scale))
                .collect::<std::result::Result<_, _>>()?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
    };

    let samples = if channels == 1 {
        interleaved
    } else {
        let channel = loudest_channel(&interleaved, channels);
        debug!("selected channel {channel} of {channels} by variance");
        interleaved
            .iter()
            .skip(channel)
            .step_by(channels)
            .copied()
            .collect()
    };

    if samples.is_empty() {
        return Err(TrackerError::invalid("WAV file contains no samples"));
    }
    Signal::new(samples, f64::from(spec.sample_rate))
}

/// Index of the channel with the largest variance
fn loudest_channel(interleaved: &[f64], channels: usize) -> usize {
    let variance = |channel: usize| {
        let values: Vec<f64> = interleaved
            .iter()
            .skip(channel)
            .step_by(channels)
            .copied()
            .collect();
        if values.is_empty() {
            return 0.0;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
    };

    let mut best = 0;
    let mut best_var = variance(0);
    for channel in 1..channels {
        let var = variance(channel);
        if var > best_var {
            best = channel;
            best_var = var;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    fn write_wav(spec: WavSpec, frames: &[Vec<i16>]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for frame in frames {
                for &s in frame {
                    writer.write_sample(s).unwrap();
                }
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_mono_int16_is_scaled() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = write_wav(spec, &[vec![32767], vec![0], vec![-16384]]);

        let signal = decode_wav(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();

        assert_eq!(signal.sample_rate(), 8000.0);
        assert_eq!(signal.len(), 3);
        assert!((signal.samples()[0] - 1.0).abs() < 1e-12);
        assert!((signal.samples()[2] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_stereo_picks_loudest_channel() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let frames: Vec<Vec<i16>> = (0..100)
            .map(|i| vec![10, if i % 2 == 0 { 20000 } else { -20000 }])
            .collect();
        let bytes = write_wav(spec, &frames);

        let signal = decode_wav(WavReader::new(Cursor::new(bytes)).unwrap()).unwrap();

        assert_eq!(signal.len(), 100);
        assert!(signal.samples()[0] > 0.6);
        assert!(signal.samples()[1] < -0.6);
    }

    #[test]
    fn test_float_samples() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 1000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            writer.write_sample(0.25_f32).unwrap();
            writer.write_sample(-0.75_f32).unwrap();
            writer.finalize().unwrap();
        }

        let signal = decode_wav(WavReader::new(Cursor::new(cursor.into_inner())).unwrap()).unwrap();
        assert_eq!(signal.samples(), &[0.25, -0.75]);
    }
}
