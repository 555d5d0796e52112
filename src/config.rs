use serde::{Deserialize, Serialize};

use crate::dsp::envelope::DEFAULT_ENVELOPE_AREA;
use crate::dsp::normalize::DEFAULT_NORMALIZE_MAX_DB;
use crate::dsp::profile_analyzer::{DEFAULT_F_RANGE_HZ, DEFAULT_MIN_DB};
use crate::error::{ProfileError, Result};

/// Parameters of a profile computation.
///
/// Missing JSON fields fall back to the defaults, so `{"min_db": -50}` is a
/// complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Lower band edge in Hz (exclusive)
    pub f_low_hz: f64,
    /// Upper band edge in Hz (exclusive)
    pub f_high_hz: f64,
    /// Floor applied to the interpolated baseline (dB)
    pub min_db: f64,
    /// Sliding window width of the lower envelope, in samples
    pub envelope_area: usize,
    /// Clip ceiling used when normalizing a profile (dB)
    pub normalize_max_db: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            f_low_hz: DEFAULT_F_RANGE_HZ.0,
            f_high_hz: DEFAULT_F_RANGE_HZ.1,
            min_db: DEFAULT_MIN_DB,
            envelope_area: DEFAULT_ENVELOPE_AREA,
            normalize_max_db: DEFAULT_NORMALIZE_MAX_DB,
        }
    }
}

impl ProfileConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ProfileConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[inline]
    pub fn f_range(&self) -> (f64, f64) {
        (self.f_low_hz, self.f_high_hz)
    }

    pub fn validate(&self) -> Result<()> {
        if self.envelope_area == 0 {
            return Err(ProfileError::InvalidConfig(
                "envelope_area must be at least 1".into(),
            ));
        }
        if !self.f_low_hz.is_finite() || !self.f_high_hz.is_finite() {
            return Err(ProfileError::InvalidConfig(format!(
                "band edges must be finite, got {}-{}",
                self.f_low_hz, self.f_high_hz
            )));
        }
        if self.f_low_hz >= self.f_high_hz {
            return Err(ProfileError::InvalidConfig(format!(
                "f_low_hz ({}) must be below f_high_hz ({})",
                self.f_low_hz, self.f_high_hz
            )));
        }
        if !self.min_db.is_finite() {
            return Err(ProfileError::InvalidConfig("min_db must be finite".into()));
        }
        if !(self.normalize_max_db > 0.0) || !self.normalize_max_db.is_finite() {
            return Err(ProfileError::InvalidConfig(format!(
                "normalize_max_db must be positive, got {}",
                self.normalize_max_db
            )));
        }
        Ok(())
    }
}
