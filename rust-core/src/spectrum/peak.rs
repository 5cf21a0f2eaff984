//! Band-limited peak search with parabolic sub-bin refinement

/// Result of a band-limited peak search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandPeak {
    Found { frequency: f64, amplitude: f64 },
    /// No spectral bin falls inside the band
    NotFound,
}

impl BandPeak {
    pub fn is_found(&self) -> bool {
        matches!(self, BandPeak::Found { .. })
    }

    /// `(frequency, amplitude)` when found
    pub fn into_option(self) -> Option<(f64, f64)> {
        match self {
            BandPeak::Found {
                frequency,
                amplitude,
            } => Some((frequency, amplitude)),
            BandPeak::NotFound => None,
        }
    }

    pub fn frequency(&self) -> Option<f64> {
        self.into_option().map(|(f, _)| f)
    }

    pub fn amplitude(&self) -> Option<f64> {
        self.into_option().map(|(_, a)| a)
    }
}

/// Vertex of the parabola through three equally spaced points
///
/// Returns `(delta, amplitude)` where `delta` is the offset of the vertex
/// from the centre point in bins. A flat triple (zero curvature) returns
/// `(0.0, y1)`.
pub fn parabolic_vertex(y0: f64, y1: f64, y2: f64) -> (f64, f64) {
    let denom = y0 - 2.0 * y1 + y2;
    if denom == 0.0 {
        return (0.0, y1);
    }

    let delta = 0.5 * (y0 - y2) / denom;
    (delta, y1 - 0.25 * (y0 - y2) * delta)
}

/// Find the strongest bin in `[band_min, band_max]` and refine it
///
/// # Arguments
/// * `frequencies` - Bin frequencies in Hz, ascending
/// * `amplitudes` - Amplitude per bin (same length)
/// * `band_min`, `band_max` - Inclusive band edges in Hz
///
/// # Returns
/// The interpolated peak, the raw bin when it sits on the band edge, or
/// `NotFound` when the band holds no bins.
pub fn locate_band_peak(
    frequencies: &[f64],
    amplitudes: &[f64],
    band_min: f64,
    band_max: f64,
) -> BandPeak {
    let len = frequencies.len().min(amplitudes.len());
    let frequencies = &frequencies[..len];

    // Ascending frequencies make the in-band bins one contiguous run
    let lo = frequencies.partition_point(|&f| f < band_min);
    let hi = frequencies.partition_point(|&f| f <= band_max);
    if lo >= hi {
        return BandPeak::NotFound;
    }

    // First maximum wins on ties
    let mut k = lo;
    for i in lo + 1..hi {
        if amplitudes[i] > amplitudes[k] || amplitudes[k].is_nan() {
            k = i;
        }
    }

    if k == lo || k + 1 == hi {
        return BandPeak::Found {
            frequency: frequencies[k],
            amplitude: amplitudes[k],
        };
    }

    let spacing = frequencies[k + 1] - frequencies[k];
    let (delta, amplitude) = parabolic_vertex(amplitudes[k - 1], amplitudes[k], amplitudes[k + 1]);

    BandPeak::Found {
        frequency: frequencies[k] + delta * spacing,
        amplitude,
    }
}
