//! Clip-and-scale normalization for dB curves.
//!
//! Values are clipped to `[0, max_db]` and divided by the clipped maximum, so a
//! profile measured in dB above its envelope maps onto roughly `[0, 1]`.

/// Default clip ceiling in dB.
pub const DEFAULT_NORMALIZE_MAX_DB: f64 = 5.0;

/// Keeps the division finite when every value clips to zero.
const NORMALIZE_EPS: f64 = 1e-6;

/// Clip `x` to `[0, max_db]` and scale by the clipped maximum.
pub fn normalize(x: &[f64], max_db: f64) -> Vec<f64> {
    let clipped: Vec<f64> = x.iter().map(|&v| v.max(0.0).min(max_db)).collect();
    let peak = clipped.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !peak.is_finite() {
        // Empty input
        return clipped;
    }
    let denom = peak + NORMALIZE_EPS;
    clipped.into_iter().map(|v| v / denom).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clips_and_scales() {
        let out = normalize(&[0.0, 2.0, 4.0, 6.0, 8.0], 5.0);
        let expected = [0.0, 0.4, 0.8, 0.9999998, 0.9999998];
        assert_eq!(out.len(), expected.len());
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_normalize_negative_and_empty() {
        assert!(normalize(&[], DEFAULT_NORMALIZE_MAX_DB).is_empty());

        let out = normalize(&[-3.0, -1.0], DEFAULT_NORMALIZE_MAX_DB);
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_preserves_ordering() {
        let x = [0.1, 0.7, 0.3, 0.9, 0.5, 0.05];
        let once = normalize(&x, DEFAULT_NORMALIZE_MAX_DB);
        let twice = normalize(&once, DEFAULT_NORMALIZE_MAX_DB);
        for i in 0..x.len() {
            for j in 0..x.len() {
                if once[i] < once[j] {
                    assert!(twice[i] <= twice[j]);
                }
            }
            assert!(twice[i] >= 0.0 && twice[i] <= 1.0);
        }
    }
}
