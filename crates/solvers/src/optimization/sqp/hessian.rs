use ndarray::{Array2, ArrayView1};

use super::linalg::dot;

/// Fraction of `sᵀBs` below which Powell damping kicks in.
const DAMPING_THRESHOLD: f64 = 0.2;

/// Positive-definite approximation of the Lagrangian Hessian.
#[derive(Debug, Clone)]
pub(super) struct Hessian<const N: usize> {
    matrix: Array2<f64>,
}

impl<const N: usize> Hessian<N> {
    /// Starts from the identity.
    pub(super) fn identity() -> Self {
        Self {
            matrix: Array2::eye(N),
        }
    }

    pub(super) fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Applies Powell's damped BFGS update for step `s` and gradient change `y`.
    ///
    /// When the curvature `sᵀy` is too small relative to `sᵀBs`, `y` is blended
    /// with `Bs` so the update keeps the matrix positive definite.
    pub(super) fn update(&mut self, s: &[f64; N], y: &[f64; N]) {
        let bs_array = self.matrix.dot(&ArrayView1::from(&s[..]));
        let bs: [f64; N] = std::array::from_fn(|i| bs_array[i]);

        let sbs = dot(s, &bs);
        if !sbs.is_finite() || sbs <= f64::MIN_POSITIVE {
            return;
        }

        let sy = dot(s, y);
        let y: [f64; N] = if sy < DAMPING_THRESHOLD * sbs {
            let theta = (1.0 - DAMPING_THRESHOLD) * sbs / (sbs - sy);
            std::array::from_fn(|i| theta * y[i] + (1.0 - theta) * bs[i])
        } else {
            *y
        };
        let sy = dot(s, &y);
        if !sy.is_finite() || sy <= 0.0 {
            return;
        }

        for i in 0..N {
            for j in 0..N {
                self.matrix[[i, j]] += y[i] * y[j] / sy - bs[i] * bs[j] / sbs;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn apply<const N: usize>(h: &Hessian<N>, v: &[f64; N]) -> [f64; N] {
        let out = h.matrix().dot(&ArrayView1::from(&v[..]));
        std::array::from_fn(|i| out[i])
    }

    #[test]
    fn update_satisfies_secant_condition() {
        let mut h = Hessian::<2>::identity();
        let s = [0.5, -0.25];
        let y = [1.0, -1.0];

        h.update(&s, &y);

        let bs = apply(&h, &s);
        assert_relative_eq!(bs[0], y[0], epsilon = 1e-12);
        assert_relative_eq!(bs[1], y[1], epsilon = 1e-12);
    }

    #[test]
    fn negative_curvature_is_damped() {
        let mut h = Hessian::<2>::identity();
        let s = [1.0, 0.0];
        let y = [-1.0, 0.5];

        h.update(&s, &y);

        // Still positive definite along s and an orthogonal direction.
        assert!(dot(&s, &apply(&h, &s)) > 0.0);
        let v = [0.0, 1.0];
        assert!(dot(&v, &apply(&h, &v)) > 0.0);
    }

    #[test]
    fn zero_step_leaves_matrix_unchanged() {
        let mut h = Hessian::<2>::identity();
        h.update(&[0.0, 0.0], &[1.0, 1.0]);

        assert_relative_eq!(h.matrix()[[0, 0]], 1.0);
        assert_relative_eq!(h.matrix()[[0, 1]], 0.0);
        assert_relative_eq!(h.matrix()[[1, 1]], 1.0);
    }
}
