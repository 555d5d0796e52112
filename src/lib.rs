//! Spectral curve profiling.
//!
//! Measures how far a curve (typically a magnitude spectrum in dB) rises above
//! a smooth baseline fitted through its own lower envelope, inside a chosen
//! frequency band.

mod config;
pub mod dsp;
mod error;
mod presets;

pub use crate::config::ProfileConfig;
pub use crate::dsp::{
    curve_profile, curve_profile_with, lower_envelope, normalize, ProfileAnalyzer,
    QuadraticSpline, Spectrum, SpectrumAnalyzer,
};
pub use crate::error::{ProfileError, Result};
pub use crate::presets::BandPreset;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENVELOPE SUPPORT
// =============================================================================

/// Sparse support points of a lower envelope.
///
/// `indices` are strictly increasing, start at 0 and end at the last sample of
/// the signal the envelope was computed over; `values[k]` is the signal value
/// at `indices[k]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvelopeSupport {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl EnvelopeSupport {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// Non-negative rise of a curve above its baseline, on the band's frequency axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Frequencies strictly inside the analysis band (Hz)
    pub freqs: Vec<f64>,
    /// Curve minus floored baseline, clipped at zero (dB)
    pub values: Vec<f64>,
}

impl Profile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Frequency and height of the largest rise (first one on ties).
    pub fn peak(&self) -> Option<(f64, f64)> {
        dsp::utils::argmax_first(&self.values).map(|i| (self.freqs[i], self.values[i]))
    }

    /// Mean rise over the band, 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Copy with values clipped to `[0, max_db]` and scaled to `[0, 1]`.
    pub fn normalized(&self, max_db: f64) -> Profile {
        Profile {
            freqs: self.freqs.clone(),
            values: normalize(&self.values, max_db),
        }
    }
}
