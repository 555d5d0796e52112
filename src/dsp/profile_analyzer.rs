//! Profile Analyzer (Curve Structure Above the Lower Envelope)
//!
//! Restricts a curve to a frequency band, fits a smooth floor through its
//! lower envelope and measures how far the curve rises above that floor.
//!
//! ## Pipeline
//! 1. Band selection with exclusive bounds on both sides
//! 2. Sliding-window lower envelope of the selected values
//! 3. Quadratic spline through the envelope support, evaluated on the band
//! 4. Floor the baseline at `min_db`
//! 5. Residual `curve - baseline`, clipped at zero
//!
//! All inputs are borrowed and every call returns freshly allocated results,
//! so independent curves can be profiled from any number of threads.

use log::{debug, warn};

use super::envelope::{lower_envelope, DEFAULT_ENVELOPE_AREA};
use super::spline::{QuadraticSpline, MIN_SPLINE_POINTS};
use super::utils::{clip_floor, ensure_strictly_ascending};
use crate::config::ProfileConfig;
use crate::error::{ProfileError, Result};
use crate::Profile;

// =============================================================================
// Constants
// =============================================================================

/// Default analysis band: 5-16 kHz (sibilance and air region)
pub const DEFAULT_F_RANGE_HZ: (f64, f64) = (5000.0, 16000.0);

/// Lowest baseline level in dB; keeps deep notches from inflating the profile
pub const DEFAULT_MIN_DB: f64 = -45.0;

// =============================================================================
// Free Functions
// =============================================================================

/// Profile of `c(x)` above its lower envelope inside `f_range`, using the
/// default envelope window.
pub fn curve_profile(x: &[f64], c: &[f64], f_range: (f64, f64), min_db: f64) -> Result<Profile> {
    compute_profile(x, c, f_range, min_db, DEFAULT_ENVELOPE_AREA)
}

/// Same as [`curve_profile`] with every parameter taken from `config`.
pub fn curve_profile_with(x: &[f64], c: &[f64], config: &ProfileConfig) -> Result<Profile> {
    compute_profile(
        x,
        c,
        config.f_range(),
        config.min_db,
        config.envelope_area,
    )
}

fn compute_profile(
    x: &[f64],
    c: &[f64],
    f_range: (f64, f64),
    min_db: f64,
    area: usize,
) -> Result<Profile> {
    if x.len() != c.len() {
        return Err(ProfileError::ShapeMismatch {
            expected: x.len(),
            actual: c.len(),
        });
    }
    ensure_strictly_ascending(x)?;

    // 1. Band selection (both bounds exclusive)
    let (f_lo, f_hi) = f_range;
    let (freqs, values): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(c.iter())
        .filter(|&(&f, _)| f_lo < f && f < f_hi)
        .map(|(&f, &v)| (f, v))
        .unzip();

    if freqs.is_empty() {
        return Err(ProfileError::EmptyInput {
            context: "no samples inside the frequency range",
        });
    }
    if freqs.len() < area {
        warn!(
            "curve_profile: {} samples in {:.1}-{:.1} Hz is narrower than the {}-sample envelope window",
            freqs.len(),
            f_lo,
            f_hi,
            area
        );
    }

    // 2. Lower envelope support
    let support = lower_envelope(&values, area)?;
    if support.len() < MIN_SPLINE_POINTS {
        return Err(ProfileError::InsufficientSupportPoints {
            found: support.len(),
            required: MIN_SPLINE_POINTS,
        });
    }

    // 3. Baseline at full resolution
    let support_freqs: Vec<f64> = support.indices.iter().map(|&i| freqs[i]).collect();
    let spline = QuadraticSpline::new(&support_freqs, &support.values)?;
    let baseline = spline.eval_many(&freqs);

    // 4. Floor
    let baseline = clip_floor(&baseline, min_db);

    // 5. Clipped residual
    let residual: Vec<f64> = values
        .iter()
        .zip(baseline.iter())
        .map(|(&v, &b)| (v - b).max(0.0))
        .collect();

    let profile = Profile {
        freqs,
        values: residual,
    };

    debug!(
        "curve_profile: {} samples, {} support points, peak {:?}",
        profile.len(),
        support.len(),
        profile.peak()
    );

    Ok(profile)
}

// =============================================================================
// Profile Analyzer
// =============================================================================

/// Reusable profiler bound to a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct ProfileAnalyzer {
    config: ProfileConfig,
}

impl ProfileAnalyzer {
    pub fn new(config: ProfileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Profile of `c(x)` in the configured band.
    pub fn analyze(&self, x: &[f64], c: &[f64]) -> Result<Profile> {
        curve_profile_with(x, c, &self.config)
    }

    /// Profile rescaled to `[0, 1]` with the configured clip ceiling.
    pub fn analyze_normalized(&self, x: &[f64], c: &[f64]) -> Result<Profile> {
        let profile = self.analyze(x, c)?;
        Ok(profile.normalized(self.config.normalize_max_db))
    }
}
