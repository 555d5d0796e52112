use serde::{Deserialize, Serialize};

use crate::config::ProfileConfig;

// =============================================================================
// BAND PRESETS
// =============================================================================

/// Analysis bands for common voice measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BandPreset {
    #[default]
    #[serde(rename = "Sibilance (5-16 kHz)")]
    Sibilance,
    #[serde(rename = "Presence (2-5 kHz)")]
    Presence,
    #[serde(rename = "Air (8-16 kHz)")]
    Air,
    #[serde(rename = "HF Variance (6-12 kHz)")]
    HfVariance,
    #[serde(rename = "Full Band (100 Hz-8 kHz)")]
    FullBand,
}

impl BandPreset {
    pub const ALL: [BandPreset; 5] = [
        BandPreset::Sibilance,
        BandPreset::Presence,
        BandPreset::Air,
        BandPreset::HfVariance,
        BandPreset::FullBand,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BandPreset::Sibilance => "Sibilance (5-16 kHz)",
            BandPreset::Presence => "Presence (2-5 kHz)",
            BandPreset::Air => "Air (8-16 kHz)",
            BandPreset::HfVariance => "HF Variance (6-12 kHz)",
            BandPreset::FullBand => "Full Band (100 Hz-8 kHz)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BandPreset::Sibilance => "Default band - sibilance and upper harmonics above the floor",
            BandPreset::Presence => "Intelligibility region where consonant detail lives",
            BandPreset::Air => "Breathiness and high-frequency sheen",
            BandPreset::HfVariance => "Whisper and fricative structure",
            BandPreset::FullBand => "Broad speech reference band",
        }
    }

    /// Band edges in Hz
    pub fn band_hz(&self) -> (f64, f64) {
        match self {
            BandPreset::Sibilance => (5000.0, 16000.0),
            BandPreset::Presence => (2000.0, 5000.0),
            BandPreset::Air => (8000.0, 16000.0),
            BandPreset::HfVariance => (6000.0, 12000.0),
            BandPreset::FullBand => (100.0, 8000.0),
        }
    }

    /// Default configuration restricted to this band.
    pub fn config(&self) -> ProfileConfig {
        let (f_low_hz, f_high_hz) = self.band_hz();
        ProfileConfig {
            f_low_hz,
            f_high_hz,
            ..ProfileConfig::default()
        }
    }

    /// Case-insensitive lookup by short name (`"air"`, `"hf-variance"`, ...).
    pub fn from_short_name(name: &str) -> Option<BandPreset> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "sibilance" => Some(BandPreset::Sibilance),
            "presence" => Some(BandPreset::Presence),
            "air" => Some(BandPreset::Air),
            "hfvariance" => Some(BandPreset::HfVariance),
            "fullband" => Some(BandPreset::FullBand),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_matches_default_config() {
        assert_eq!(BandPreset::default().config(), ProfileConfig::default());
    }

    #[test]
    fn test_all_presets_validate() {
        for preset in BandPreset::ALL {
            assert!(preset.config().validate().is_ok(), "{}", preset.name());
        }
    }

    #[test]
    fn test_short_names() {
        assert_eq!(BandPreset::from_short_name("Air"), Some(BandPreset::Air));
        assert_eq!(
            BandPreset::from_short_name("hf-variance"),
            Some(BandPreset::HfVariance)
        );
        assert_eq!(BandPreset::from_short_name("bass"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BandPreset::Presence).unwrap();
        assert_eq!(json, "\"Presence (2-5 kHz)\"");
        let back: BandPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BandPreset::Presence);
    }
}
