use crate::error::{ProfileError, Result};

/// Floor added to linear magnitudes before taking the log.
pub const DB_EPS: f64 = 1e-12;

pub fn lin_to_db(x: f64) -> f64 {
    20.0 * (x + DB_EPS).log10()
}

pub fn db_to_lin(db: f64) -> f64 {
    (10.0f64).powf(db / 20.0)
}

/// Elementwise `max(v, floor)`, no upper bound.
pub fn clip_floor(x: &[f64], floor: f64) -> Vec<f64> {
    x.iter().map(|&v| v.max(floor)).collect()
}

/// Index of the first minimum. NaN never wins a comparison.
pub fn argmin_first(x: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in x.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b || v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first maximum. NaN never wins a comparison.
pub fn argmax_first(x: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in x.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b || v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Checks that `x` is strictly ascending.
pub fn ensure_strictly_ascending(x: &[f64]) -> Result<()> {
    for (i, pair) in x.windows(2).enumerate() {
        if !(pair[1] > pair[0]) {
            return Err(ProfileError::NonMonotonicAxis { index: i + 1 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversions() {
        assert!((lin_to_db(1.0)).abs() < 1e-9);
        assert!((lin_to_db(0.5) + 6.0206).abs() < 1e-3);
        assert!((db_to_lin(-20.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_argmin_first_tie_break() {
        assert_eq!(argmin_first(&[3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(argmin_first(&[]), None);
        assert_eq!(argmax_first(&[1.0, 4.0, 4.0, 0.0]), Some(1));
    }

    #[test]
    fn test_ascending_check() {
        assert!(ensure_strictly_ascending(&[1.0, 2.0, 3.0]).is_ok());
        assert!(ensure_strictly_ascending(&[5.0]).is_ok());
        assert!(matches!(
            ensure_strictly_ascending(&[1.0, 2.0, 2.0]),
            Err(ProfileError::NonMonotonicAxis { index: 2 })
        ));
    }
}
