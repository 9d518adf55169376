use ndarray::{Array1, Array2};

/// Relative pivot size below which a system is treated as singular.
const SINGULAR_TOL: f64 = 1e-12;

/// Solves the dense square system `a·x = b` by Gaussian elimination with
/// partial pivoting.
///
/// Returns `None` if the system is singular or not square.
pub(super) fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    if a.nrows() != n || a.ncols() != n {
        return None;
    }

    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return (n == 0).then(|| Array1::zeros(0));
    }

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
        if a[[pivot, col]].abs() <= SINGULAR_TOL * scale {
            return None;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                let delta = factor * a[[col, k]];
                a[[row, k]] -= delta;
            }
            let delta = factor * b[col];
            b[row] -= delta;
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in row + 1..n {
            sum -= a[[row, k]] * x[k];
        }
        x[row] = sum / a[[row, row]];
    }
    Some(x)
}

/// Dot product of two equal-length arrays.
pub(super) fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Infinity norm of an array.
pub(super) fn inf_norm(a: &[f64]) -> f64 {
    a.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}
