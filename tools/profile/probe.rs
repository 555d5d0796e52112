use anyhow::{bail, Context, Result};
use serde::Serialize;
use vxprofile::dsp::utils::db_to_lin;
use vxprofile::{BandPreset, ProfileAnalyzer, ProfileConfig, SpectrumAnalyzer};

const DEFAULT_SAMPLE_RATE: f64 = 48000.0;
const DEFAULT_FRAME: usize = 4096;
const DEFAULT_TONE_HZ: f64 = 8000.0;
const TONE_LEVEL_DB: f64 = -12.0;
const NOISE_LEVEL_DB: f64 = -70.0;

#[derive(Serialize)]
struct ProbeReport {
    sample_rate: f64,
    frame_size: usize,
    tones_hz: Vec<f64>,
    config: ProfileConfig,
    samples_in_band: usize,
    peak_hz: Option<f64>,
    peak_db: Option<f64>,
    mean_db: f64,
    profile: vxprofile::Profile,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut sample_rate = DEFAULT_SAMPLE_RATE;
    let mut frame_size = DEFAULT_FRAME;
    let mut config = ProfileConfig::default();
    let mut tones = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sr" => {
                let v = args.next().context("--sr needs a value")?;
                sample_rate = v
                    .parse()
                    .with_context(|| format!("invalid sample rate '{}'", v))?;
            }
            "--frame" => {
                let v = args.next().context("--frame needs a value")?;
                frame_size = v
                    .parse()
                    .with_context(|| format!("invalid frame size '{}'", v))?;
            }
            "--config" => {
                let v = args.next().context("--config needs inline JSON")?;
                config = ProfileConfig::from_json(&v).context("failed to parse --config")?;
            }
            "--preset" => {
                let v = args.next().context("--preset needs a name")?;
                let Some(preset) = BandPreset::from_short_name(&v) else {
                    let names: Vec<&str> = BandPreset::ALL.iter().map(|p| p.name()).collect();
                    bail!("unknown preset '{}', expected one of: {}", v, names.join(", "));
                };
                config = preset.config();
            }
            other => {
                let hz: f64 = other
                    .parse()
                    .with_context(|| format!("invalid tone frequency '{}'", other))?;
                tones.push(hz);
            }
        }
    }
    if tones.is_empty() {
        tones.push(DEFAULT_TONE_HZ);
    }

    let frame = synthesize(&tones, sample_rate, frame_size);
    let mut spectrum_analyzer = SpectrumAnalyzer::new(frame_size, sample_rate)
        .context("failed to create spectrum analyzer")?;
    let spectrum = spectrum_analyzer.analyze(&frame)?;

    let profiler = ProfileAnalyzer::new(config)?;
    let profile = profiler
        .analyze(&spectrum.freqs, &spectrum.magnitude_db)
        .with_context(|| {
            format!(
                "profile failed for band {:.0}-{:.0} Hz",
                config.f_low_hz, config.f_high_hz
            )
        })?;

    let peak = profile.peak();
    let report = ProbeReport {
        sample_rate,
        frame_size,
        tones_hz: tones,
        config,
        samples_in_band: profile.len(),
        peak_hz: peak.map(|(f, _)| f),
        peak_db: peak.map(|(_, v)| v),
        mean_db: profile.mean(),
        profile,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Sum of sines over a deterministic uniform noise floor.
fn synthesize(tones: &[f64], sample_rate: f64, len: usize) -> Vec<f64> {
    let tone_amp = db_to_lin(TONE_LEVEL_DB);
    let noise_amp = db_to_lin(NOISE_LEVEL_DB);
    let mut state: u32 = 0x9E37_79B9;
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate;
            let tone: f64 = tones
                .iter()
                .map(|&f| tone_amp * (2.0 * std::f64::consts::PI * f * t).sin())
                .sum();
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as f64 / u32::MAX as f64) * 2.0 - 1.0;
            tone + noise_amp * noise
        })
        .collect()
}
