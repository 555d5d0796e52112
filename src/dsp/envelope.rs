//! Lower Envelope Extraction
//!
//! Tracks the floor of a 1D curve by recording the minimum of every
//! fixed-size sliding window.
//!
//! # Purpose
//! Produces the sparse support points that the profile stage interpolates back
//! to full resolution as a smooth baseline.
//!
//! # Design Notes
//! - Windows advance by one sample; a minimum found by several overlapping
//!   windows is recorded once.
//! - Ties inside a window resolve to the earliest sample.
//! - The result is always anchored at the first and last sample so the
//!   interpolant spans the whole curve.
//! - When the window is wider than the curve no window fits and only the
//!   anchors are returned.

use log::trace;

use super::utils::argmin_first;
use crate::error::{ProfileError, Result};
use crate::EnvelopeSupport;

// =============================================================================
// Constants
// =============================================================================

/// Sliding window width used by the profile stage.
pub const DEFAULT_ENVELOPE_AREA: usize = 10;

// =============================================================================
// Extraction
// =============================================================================

/// Compute the lower envelope support of `x` with a window of `area` samples.
pub fn lower_envelope(x: &[f64], area: usize) -> Result<EnvelopeSupport> {
    if x.is_empty() {
        return Err(ProfileError::EmptyInput {
            context: "lower envelope signal",
        });
    }
    if area == 0 {
        return Err(ProfileError::InvalidWindow(area));
    }

    let n = x.len();
    let mut seen = vec![false; n];
    let mut indices: Vec<usize> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    // Zero windows when area > n; fall through to anchoring.
    let window_count = (n + 1).saturating_sub(area);
    for i in 0..window_count {
        let patch = &x[i..i + area];
        let Some(rel) = argmin_first(patch) else {
            continue;
        };
        let abs = i + rel;
        if !seen[abs] {
            seen[abs] = true;
            indices.push(abs);
            values.push(patch[rel]);
        }
    }

    trace!(
        "lower_envelope: {} windows of {} over {} samples -> {} minima",
        window_count,
        area,
        n,
        indices.len()
    );

    if indices.first() != Some(&0) {
        indices.insert(0, 0);
        values.insert(0, x[0]);
    }
    if indices.last() != Some(&(n - 1)) {
        indices.push(n - 1);
        values.push(x[n - 1]);
    }

    Ok(EnvelopeSupport { indices, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants(x: &[f64], env: &EnvelopeSupport) {
        assert_eq!(env.indices.len(), env.values.len());
        assert_eq!(env.indices[0], 0);
        assert_eq!(*env.indices.last().unwrap(), x.len() - 1);
        for pair in env.indices.windows(2) {
            assert!(pair[0] < pair[1], "indices not strictly increasing");
        }
        for (&i, &v) in env.indices.iter().zip(env.values.iter()) {
            assert_eq!(x[i], v);
        }
    }

    #[test]
    fn test_monotonic_ramp() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let env = lower_envelope(&x, 3).unwrap();
        assert_eq!(env.indices, vec![0, 1, 2, 3, 4, 5, 6, 7, 9]);
        assert_eq!(env.values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0]);
    }

    #[test]
    fn test_descending_ramp_prepends_origin() {
        let x: Vec<f64> = (0..8).map(|i| -(i as f64)).collect();
        let env = lower_envelope(&x, 4).unwrap();
        // Every window's minimum is its last sample: 3, 4, 5, 6, 7
        assert_eq!(env.indices, vec![0, 3, 4, 5, 6, 7]);
        check_invariants(&x, &env);
    }

    #[test]
    fn test_ties_pick_first_occurrence() {
        let x = [5.0, 1.0, 1.0, 1.0, 5.0, 5.0];
        let env = lower_envelope(&x, 3).unwrap();
        // Windows: [5,1,1]->1, [1,1,1]->1, [1,1,5]->2, [1,5,5]->3
        assert_eq!(env.indices, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_window_wider_than_signal() {
        let x = [3.0, 1.0, 2.0];
        let env = lower_envelope(&x, 10).unwrap();
        assert_eq!(env.indices, vec![0, 2]);
        assert_eq!(env.values, vec![3.0, 2.0]);

        let single = lower_envelope(&[4.0], 10).unwrap();
        assert_eq!(single.indices, vec![0]);
        assert_eq!(single.values, vec![4.0]);
    }

    #[test]
    fn test_window_equal_to_signal() {
        let x = [3.0, 1.0, 2.0];
        let env = lower_envelope(&x, 3).unwrap();
        assert_eq!(env.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_empty_and_zero_area() {
        assert!(matches!(
            lower_envelope(&[], 10),
            Err(ProfileError::EmptyInput { .. })
        ));
        assert!(matches!(
            lower_envelope(&[1.0, 2.0], 0),
            Err(ProfileError::InvalidWindow(0))
        ));
    }

    #[test]
    fn test_invariants_on_irregular_signal() {
        let x: Vec<f64> = (0..97)
            .map(|i| {
                let t = i as f64;
                (t * 0.37).sin() * 4.0 + (t * 1.91).cos() - 0.02 * t
            })
            .collect();
        for area in 1..=x.len() {
            let env = lower_envelope(&x, area).unwrap();
            check_invariants(&x, &env);

            // Interior points are window minima
            for (&i, &v) in env.indices.iter().zip(env.values.iter()) {
                let lo = i.saturating_sub(area - 1);
                let is_min_of_some_window = (lo..=i)
                    .filter(|&s| s + area <= x.len())
                    .any(|s| x[s..s + area].iter().all(|&w| v <= w));
                let is_anchor = i == 0 || i == x.len() - 1;
                assert!(is_anchor || is_min_of_some_window);
            }
        }
    }
}
