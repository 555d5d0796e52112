//! Quadratic Interpolating Spline
//!
//! Piecewise-quadratic B-spline through a set of control points, used to
//! rebuild the lower envelope at full resolution.
//!
//! # Design Notes
//! - Knots: triple end knots plus the midpoints between interior abscissae,
//!   which keeps every abscissa inside the support of its basis functions.
//! - Coefficients come from the collocation system `B(x_i) c = y_i`. The matrix
//!   has at most two sub- and super-diagonals, so it is stored and solved as a
//!   band with partial pivoting.
//! - Evaluation outside `[x_0, x_{n-1}]` extends the boundary pieces.

use super::utils::ensure_strictly_ascending;
use crate::error::{ProfileError, Result};

// =============================================================================
// Constants
// =============================================================================

const DEGREE: usize = 2;

/// Minimum number of control points for a quadratic spline.
pub const MIN_SPLINE_POINTS: usize = DEGREE + 1;

/// Sub-diagonals of the collocation matrix.
const KL: usize = 2;
/// Super-diagonals of the collocation matrix.
const KU: usize = 2;
/// Stored entries per column (room for pivoting fill-in).
const BAND_WIDTH: usize = 2 * KL + KU + 1;

// =============================================================================
// Spline
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticSpline {
    knots: Vec<f64>,
    coeffs: Vec<f64>,
}

impl QuadraticSpline {
    /// Fit the interpolating spline through `(x[i], y[i])`.
    /// `x` must be strictly ascending with at least three points.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ProfileError::ShapeMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        if x.len() < MIN_SPLINE_POINTS {
            return Err(ProfileError::InsufficientSupportPoints {
                found: x.len(),
                required: MIN_SPLINE_POINTS,
            });
        }
        ensure_strictly_ascending(x)?;

        let n = x.len();
        let knots = build_knots(x);

        let mut system = BandedSystem::new(n);
        for (i, &xi) in x.iter().enumerate() {
            let span = find_span(&knots, n, xi);
            let basis = basis_funs(&knots, span, xi);
            for (r, &b) in basis.iter().enumerate() {
                system.set(i, span - DEGREE + r, b);
            }
        }
        let coeffs = system.solve(y.to_vec())?;

        Ok(Self { knots, coeffs })
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.coeffs.len();
        let span = find_span(&self.knots, n, x);
        let basis = basis_funs(&self.knots, span, x);
        basis
            .iter()
            .enumerate()
            .map(|(r, &b)| b * self.coeffs[span - DEGREE + r])
            .sum()
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    /// Number of control points the spline was fitted to.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

fn build_knots(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];
    let mut knots = Vec::with_capacity(n + DEGREE + 1);
    knots.extend(std::iter::repeat(first).take(DEGREE + 1));
    // Midpoints between x[j] and x[j+1] for j in 1..n-2
    knots.extend((1..n - 2).map(|j| 0.5 * (x[j] + x[j + 1])));
    knots.extend(std::iter::repeat(last).take(DEGREE + 1));
    knots
}

/// Knot span index `k` in `DEGREE..n` with `knots[k] <= x < knots[k + 1]`,
/// clamped at both ends.
fn find_span(knots: &[f64], n: usize, x: f64) -> usize {
    if x >= knots[n] {
        return n - 1;
    }
    if x <= knots[DEGREE] {
        return DEGREE;
    }
    // NaN compares false everywhere; keep it on the first span
    let count = knots[DEGREE..n].partition_point(|&k| k <= x);
    DEGREE + count.max(1) - 1
}

/// Non-zero basis functions on `span` (Cox-de Boor).
fn basis_funs(knots: &[f64], span: usize, x: f64) -> [f64; DEGREE + 1] {
    let mut nb = [0.0; DEGREE + 1];
    let mut left = [0.0; DEGREE + 1];
    let mut right = [0.0; DEGREE + 1];
    nb[0] = 1.0;

    for j in 1..=DEGREE {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = nb[r] / (right[r + 1] + left[j - r]);
            nb[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        nb[j] = saved;
    }

    nb
}

// =============================================================================
// Banded Solver
// =============================================================================

/// Square band matrix in column storage: entry `(i, j)` lives at
/// `cols[j][i + KL + KU - j]`.
struct BandedSystem {
    n: usize,
    cols: Vec<[f64; BAND_WIDTH]>,
}

impl BandedSystem {
    fn new(n: usize) -> Self {
        Self {
            n,
            cols: vec![[0.0; BAND_WIDTH]; n],
        }
    }

    #[inline]
    fn in_band(i: usize, j: usize) -> bool {
        j <= i + KL + KU && i <= j + KL
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        if Self::in_band(i, j) {
            self.cols[j][i + KL + KU - j]
        } else {
            0.0
        }
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, v: f64) {
        debug_assert!(Self::in_band(i, j), "({}, {}) outside band", i, j);
        if Self::in_band(i, j) {
            self.cols[j][i + KL + KU - j] = v;
        }
    }

    /// Gaussian elimination with partial pivoting, consuming the right-hand side.
    fn solve(mut self, mut b: Vec<f64>) -> Result<Vec<f64>> {
        let n = self.n;

        for k in 0..n {
            let last_row = (k + KL).min(n - 1);
            let last_col = (k + KL + KU).min(n - 1);

            let mut piv = k;
            let mut best = self.get(k, k).abs();
            for i in k + 1..=last_row {
                let v = self.get(i, k).abs();
                if v > best {
                    best = v;
                    piv = i;
                }
            }
            if !(best > 0.0) {
                return Err(ProfileError::SingularSystem { row: k });
            }

            if piv != k {
                for j in k..=last_col {
                    let a = self.get(k, j);
                    let c = self.get(piv, j);
                    self.set(k, j, c);
                    self.set(piv, j, a);
                }
                b.swap(k, piv);
            }

            let pivot = self.get(k, k);
            for i in k + 1..=last_row {
                let f = self.get(i, k) / pivot;
                if f == 0.0 {
                    continue;
                }
                self.set(i, k, 0.0);
                for j in k + 1..=last_col {
                    let v = self.get(i, j) - f * self.get(k, j);
                    self.set(i, j, v);
                }
                b[i] -= f * b[k];
            }
        }

        for k in (0..n).rev() {
            let last_col = (k + KL + KU).min(n - 1);
            let mut s = b[k];
            for j in k + 1..=last_col {
                s -= self.get(k, j) * b[j];
            }
            b[k] = s / self.get(k, k);
        }

        Ok(b)
    }
}
