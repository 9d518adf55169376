use ndarray::{Array1, Array2};

use super::linalg::solve;

/// Slack on primal feasibility and dual sign checks.
const KKT_TOL: f64 = 1e-10;

/// Solution of the SQP subproblem at one iterate.
#[derive(Debug, Clone, Copy)]
pub(super) struct Step<const N: usize, const C: usize> {
    /// Step in the unit box.
    pub(super) d: [f64; N],

    /// Elastic slack: how far the linearized constraints remain violated.
    pub(super) slack: f64,

    /// Multipliers of the linearized constraints (all `>= 0`).
    pub(super) multipliers: [f64; C],
}

/// Linear and quadratic data of the subproblem at one iterate.
pub(super) struct Subproblem<'a, const N: usize, const C: usize> {
    /// Largest allowed decrease of each variable.
    pub(super) room_down: [f64; N],

    /// Largest allowed increase of each variable.
    pub(super) room_up: [f64; N],

    /// Objective gradient.
    pub(super) gradient: &'a [f64; N],

    /// Constraint values.
    pub(super) constraints: &'a [f64; C],

    /// Constraint gradients, one row per constraint.
    pub(super) jacobian: &'a [[f64; N]; C],

    /// Positive-definite model Hessian.
    pub(super) hessian: &'a Array2<f64>,

    /// Linear cost of the elastic slack.
    pub(super) elastic_weight: f64,
}

impl<const N: usize, const C: usize> Subproblem<'_, N, C> {
    /// Solves the elastic QP subproblem exactly.
    ///
    /// Variables are `z = [d, t]`. All restrictions are written as rows of
    /// `A·z <= b`:
    ///
    /// - rows `0..N`: `dⱼ <= room_upⱼ`
    /// - rows `N..2N`: `-dⱼ <= room_downⱼ`
    /// - row `2N`: `-t <= 0`
    /// - rows `2N+1..`: `-(Jᵢ·d) - t <= cᵢ`
    ///
    /// Returns `None` only if no active set yields a KKT point, which for the
    /// strictly convex subproblem indicates numerical breakdown.
    pub(super) fn solve(&self) -> Option<Step<N, C>> {
        let (z, duals) = self.assemble().solve()?;

        let d = std::array::from_fn(|j| z[j]);
        let slack = z[N].max(0.0);
        let multipliers = std::array::from_fn(|i| duals[2 * N + 1 + i].max(0.0));

        Some(Step {
            d,
            slack,
            multipliers,
        })
    }

    fn assemble(&self) -> DenseQp {
        let n = N + 1;
        let rows = 2 * N + 1 + C;

        let mut h = Array2::zeros((n, n));
        for i in 0..N {
            for j in 0..N {
                h[[i, j]] = self.hessian[[i, j]];
            }
        }
        h[[N, N]] = 1.0;

        let mut q = Array1::zeros(n);
        for j in 0..N {
            q[j] = self.gradient[j];
        }
        q[N] = self.elastic_weight;

        let mut a = Array2::zeros((rows, n));
        let mut b = Array1::zeros(rows);
        for j in 0..N {
            a[[j, j]] = 1.0;
            b[j] = self.room_up[j];
            a[[N + j, j]] = -1.0;
            b[N + j] = self.room_down[j];
        }
        a[[2 * N, N]] = -1.0;
        for i in 0..C {
            let row = 2 * N + 1 + i;
            for j in 0..N {
                a[[row, j]] = -self.jacobian[i][j];
            }
            a[[row, N]] = -1.0;
            b[row] = self.constraints[i];
        }

        DenseQp { h, q, a, b }
    }
}

/// Strictly convex QP: minimize `½zᵀHz + qᵀz` subject to `A·z <= b`.
struct DenseQp {
    h: Array2<f64>,
    q: Array1<f64>,
    a: Array2<f64>,
    b: Array1<f64>,
}

impl DenseQp {
    /// Finds the KKT point by enumerating active sets of increasing size.
    ///
    /// For a strictly convex QP any point meeting the KKT conditions is the
    /// unique minimizer, and one exists whose active rows number at most the
    /// variable count, so the first hit is the answer.
    ///
    /// Returns the primal solution and a multiplier for every row.
    fn solve(&self) -> Option<(Array1<f64>, Array1<f64>)> {
        let n = self.q.len();
        let rows = self.b.len();

        for size in 0..=n.min(rows) {
            let mut active: Vec<usize> = (0..size).collect();
            loop {
                if let Some(found) = self.try_active_set(&active) {
                    return Some(found);
                }
                if !next_subset(&mut active, rows) {
                    break;
                }
            }
        }
        None
    }

    /// Solves the equality-constrained QP for `active` and checks KKT.
    fn try_active_set(&self, active: &[usize]) -> Option<(Array1<f64>, Array1<f64>)> {
        let n = self.q.len();
        let k = active.len();

        let mut kkt = Array2::zeros((n + k, n + k));
        let mut rhs = Array1::zeros(n + k);
        for i in 0..n {
            for j in 0..n {
                kkt[[i, j]] = self.h[[i, j]];
            }
            rhs[i] = -self.q[i];
        }
        for (slot, &row) in active.iter().enumerate() {
            for j in 0..n {
                kkt[[n + slot, j]] = self.a[[row, j]];
                kkt[[j, n + slot]] = self.a[[row, j]];
            }
            rhs[n + slot] = self.b[row];
        }

        let solution = solve(kkt, rhs)?;
        let z = solution.slice(ndarray::s![..n]).to_owned();

        let mut duals = Array1::zeros(self.b.len());
        for (slot, &row) in active.iter().enumerate() {
            let lambda = solution[n + slot];
            if lambda < -KKT_TOL {
                return None;
            }
            duals[row] = lambda;
        }

        let residual = self.a.dot(&z) - &self.b;
        if residual
            .iter()
            .zip(self.b.iter())
            .any(|(r, b)| *r > KKT_TOL * (1.0 + b.abs()))
        {
            return None;
        }

        Some((z, duals))
    }
}

/// Advances `subset` to the next `k`-subset of `0..n` in lexicographic order.
///
/// Returns false once every subset has been visited.
fn next_subset(subset: &mut [usize], n: usize) -> bool {
    let k = subset.len();
    for i in (0..k).rev() {
        if subset[i] < n - k + i {
            subset[i] += 1;
            for j in i + 1..k {
                subset[j] = subset[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
