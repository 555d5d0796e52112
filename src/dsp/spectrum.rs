//! Magnitude Spectrum Analyzer
//!
//! Turns a frame of samples into the dB curve and frequency axis that the
//! profile analyzer consumes.
//!
//! # Architecture
//! - **Analysis**: Hann-windowed forward FFT, planned once.
//! - **Scaling**: `2 / sum(window)`, so a bin-centred sine of amplitude `A`
//!   reads `20 log10(A)` dB.
//! - **Output**: bins `0..=N/2`, DC to Nyquist.

use std::sync::Arc;

use log::debug;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::{Deserialize, Serialize};

use super::profile_analyzer::curve_profile_with;
use super::utils::lin_to_db;
use crate::config::ProfileConfig;
use crate::error::{ProfileError, Result};
use crate::Profile;

// =============================================================================
// Spectrum
// =============================================================================

/// One-sided magnitude spectrum.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin centre frequencies (Hz), ascending from 0
    pub freqs: Vec<f64>,
    /// Bin magnitudes (dB re full scale)
    pub magnitude_db: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// Profile of this spectrum above its lower envelope.
    pub fn profile(&self, config: &ProfileConfig) -> Result<Profile> {
        curve_profile_with(&self.freqs, &self.magnitude_db, config)
    }
}

// =============================================================================
// Analyzer
// =============================================================================

pub struct SpectrumAnalyzer {
    sample_rate: f64,
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,
    window_gain: f64,
    fft_buf: Vec<Complex<f64>>,
    fft_scratch: Vec<Complex<f64>>,
}

impl SpectrumAnalyzer {
    pub fn new(frame_size: usize, sample_rate: f64) -> Result<Self> {
        if frame_size < 2 {
            return Err(ProfileError::InvalidWindow(frame_size));
        }
        if !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return Err(ProfileError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(frame_size);
        let scratch_len = fft.get_inplace_scratch_len();

        let window: Vec<f64> = (0..frame_size)
            .map(|i| {
                let denom = (frame_size - 1) as f64;
                0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / denom).cos())
            })
            .collect();
        let window_gain = 2.0 / window.iter().sum::<f64>();

        debug!(
            "SpectrumAnalyzer: {} point FFT at {} Hz ({:.2} Hz/bin)",
            frame_size,
            sample_rate,
            sample_rate / frame_size as f64
        );

        Ok(Self {
            sample_rate,
            fft,
            window,
            window_gain,
            fft_buf: vec![Complex::default(); frame_size],
            fft_scratch: vec![Complex::default(); scratch_len],
        })
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Bin centre frequencies for this frame size.
    pub fn bin_freqs(&self) -> Vec<f64> {
        let n = self.frame_size();
        let bin_hz = self.sample_rate / n as f64;
        (0..=n / 2).map(|k| k as f64 * bin_hz).collect()
    }

    /// Analyze exactly one frame of `frame_size` samples.
    pub fn analyze(&mut self, frame: &[f64]) -> Result<Spectrum> {
        let n = self.frame_size();
        if frame.len() != n {
            return Err(ProfileError::ShapeMismatch {
                expected: n,
                actual: frame.len(),
            });
        }

        // 1. Windowed input
        for (dst, (&x, &w)) in self
            .fft_buf
            .iter_mut()
            .zip(frame.iter().zip(self.window.iter()))
        {
            *dst = Complex::new(x * w, 0.0);
        }

        // 2. FFT
        self.fft
            .process_with_scratch(&mut self.fft_buf, &mut self.fft_scratch);

        // 3. One-sided magnitude in dB
        let magnitude_db = self.fft_buf[..=n / 2]
            .iter()
            .map(|bin| lin_to_db(bin.norm() * self.window_gain))
            .collect();

        Ok(Spectrum {
            freqs: self.bin_freqs(),
            magnitude_db,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 48000.0;
    const N: usize = 4096;

    fn sine(freq: f64, amp: f64) -> Vec<f64> {
        (0..N)
            .map(|i| amp * (2.0 * std::f64::consts::PI * freq * i as f64 / SR).sin())
            .collect()
    }

    #[test]
    fn test_bin_layout() {
        let analyzer = SpectrumAnalyzer::new(N, SR).unwrap();
        let freqs = analyzer.bin_freqs();
        assert_eq!(freqs.len(), N / 2 + 1);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[N / 2] - SR / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sine_level() {
        let mut analyzer = SpectrumAnalyzer::new(N, SR).unwrap();
        let bin = 512;
        let freq = bin as f64 * SR / N as f64;
        let spectrum = analyzer.analyze(&sine(freq, 0.5)).unwrap();

        let peak = crate::dsp::utils::argmax_first(&spectrum.magnitude_db).unwrap();
        assert_eq!(peak, bin);
        // 0.5 amplitude is about -6.02 dB
        assert!((spectrum.magnitude_db[bin] + 6.02).abs() < 0.5);
    }

    #[test]
    fn test_rejects_bad_frames() {
        assert!(matches!(
            SpectrumAnalyzer::new(0, SR),
            Err(ProfileError::InvalidWindow(0))
        ));
        assert!(matches!(
            SpectrumAnalyzer::new(N, 0.0),
            Err(ProfileError::InvalidConfig(_))
        ));

        let mut analyzer = SpectrumAnalyzer::new(N, SR).unwrap();
        assert!(matches!(
            analyzer.analyze(&[0.0; 16]),
            Err(ProfileError::ShapeMismatch {
                expected: N,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_tone_profile_peaks_at_tone() {
        let mut analyzer = SpectrumAnalyzer::new(N, SR).unwrap();
        let bin = 683;
        let freq = bin as f64 * SR / N as f64;

        // Tone over a low deterministic noise floor
        let mut state: u32 = 0x1234_5678;
        let frame: Vec<f64> = sine(freq, 0.5)
            .into_iter()
            .map(|s| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let noise = (state as f64 / u32::MAX as f64) * 2.0 - 1.0;
                s + 1e-3 * noise
            })
            .collect();

        let spectrum = analyzer.analyze(&frame).unwrap();
        let profile = spectrum.profile(&ProfileConfig::default()).unwrap();

        assert!(profile.values.iter().all(|&v| v >= 0.0));
        let (f_peak, height) = profile.peak().unwrap();
        assert!((f_peak - freq).abs() < 1e-6);
        // -6 dB tone over a baseline floored at -45 dB
        assert!(height > 35.0 && height < 42.0, "height {}", height);

        // Away from the tone the noise sits under the floor
        let far = profile.freqs.iter().position(|&f| f > 14000.0).unwrap();
        assert_eq!(profile.values[far], 0.0);
    }
}
