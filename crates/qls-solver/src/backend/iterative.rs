//! Iterative backend: BiCGSTAB for non-symmetric sparse systems.

use nalgebra::DVector;

use super::traits::*;
use crate::system::LinearSystem;

/// Inner products below this magnitude mean the recurrence has broken
/// down and no further progress is possible.
const BREAKDOWN: f64 = 1e-30;

/// Stabilized biconjugate-gradient solver.
///
/// Converges when the residual drops below `max(tol, tol * ||b||)`,
/// i.e. the tolerance acts as both absolute and relative bound.
/// Non-convergence is not fatal: the best available iterate is
/// returned together with a `ConvergenceWarning`.
pub struct IterativeBackend {
    tolerance: f64,
    max_iterations: usize,
}

impl IterativeBackend {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            // 0 means "derive from the system size at solve time"
            max_iterations: 0,
        }
    }

    /// Override the iteration cap (mainly for tests).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn iteration_cap(&self, n: usize) -> usize {
        if self.max_iterations > 0 {
            self.max_iterations
        } else {
            (10 * n).max(100)
        }
    }

    fn info(
        &self,
        iterations: usize,
        residual_norm: f64,
        warning: Option<ConvergenceWarning>,
    ) -> SolveInfo {
        SolveInfo {
            mode_used: ModeUsed::Iterative,
            iterations,
            residual_norm: Some(residual_norm),
            solver_name: "BiCGSTAB".to_string(),
            warning,
        }
    }
}

impl LinearSolverBackend for IterativeBackend {
    fn solve_normalized(
        &self,
        system: &LinearSystem,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        let b = &system.rhs;
        let n = system.n();
        let target = self.tolerance.max(self.tolerance * b.norm());

        let mut x = DVector::zeros(n);
        // x0 = 0, so r0 = b
        let mut r = b.clone();
        let r_hat = r.clone();
        let mut p = DVector::zeros(n);
        let mut v = DVector::zeros(n);
        let mut rho = 1.0;
        let mut alpha = 1.0;
        let mut omega = 1.0;

        let mut r_norm = r.norm();
        if r_norm <= target {
            return Ok((x, self.info(0, r_norm, None)));
        }

        let cap = self.iteration_cap(n);
        for iteration in 1..=cap {
            let rho_new = r_hat.dot(&r);
            if rho_new.abs() < BREAKDOWN {
                let warning = ConvergenceWarning {
                    iterations: iteration,
                    residual_norm: r_norm,
                };
                return Ok((x, self.info(iteration, r_norm, Some(warning))));
            }

            let beta = (rho_new / rho) * (alpha / omega);
            p = &r + (&p - &v * omega) * beta;
            v = system.matvec(&p);

            let denom = r_hat.dot(&v);
            if denom.abs() < BREAKDOWN {
                let warning = ConvergenceWarning {
                    iterations: iteration,
                    residual_norm: r_norm,
                };
                return Ok((x, self.info(iteration, r_norm, Some(warning))));
            }
            alpha = rho_new / denom;

            let s = &r - &v * alpha;
            let s_norm = s.norm();
            if s_norm <= target {
                x += &p * alpha;
                return Ok((x, self.info(iteration, s_norm, None)));
            }

            let t = system.matvec(&s);
            let tt = t.dot(&t);
            if tt < BREAKDOWN {
                x += &p * alpha;
                let warning = ConvergenceWarning {
                    iterations: iteration,
                    residual_norm: s_norm,
                };
                return Ok((x, self.info(iteration, s_norm, Some(warning))));
            }
            let omega_new = t.dot(&s) / tt;

            x += &p * alpha + &s * omega_new;
            r = &s - &t * omega_new;
            r_norm = r.norm();
            if r_norm <= target {
                return Ok((x, self.info(iteration, r_norm, None)));
            }
            if omega_new.abs() < BREAKDOWN {
                let warning = ConvergenceWarning {
                    iterations: iteration,
                    residual_norm: r_norm,
                };
                return Ok((x, self.info(iteration, r_norm, Some(warning))));
            }

            rho = rho_new;
            omega = omega_new;
        }

        let warning = ConvergenceWarning {
            iterations: cap,
            residual_norm: r_norm,
        };
        Ok((x, self.info(cap, r_norm, Some(warning))))
    }

    fn name(&self) -> &str {
        "iterative-bicgstab"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::direct::DirectBackend;
    use qls_io::MatrixTriplets;

    fn system(n: usize, entries: &[(usize, usize, f64)], rhs: Vec<f64>) -> LinearSystem {
        let triplets = MatrixTriplets {
            n,
            row_indices: entries.iter().map(|e| e.0).collect(),
            col_indices: entries.iter().map(|e| e.1).collect(),
            values: entries.iter().map(|e| e.2).collect(),
        };
        LinearSystem::from_parts(triplets, rhs).expect("assembly should succeed")
    }

    fn spd_3x3() -> LinearSystem {
        system(
            3,
            &[
                (0, 0, 4.0),
                (0, 1, -1.0),
                (1, 0, -1.0),
                (1, 1, 4.0),
                (1, 2, -1.0),
                (2, 1, -1.0),
                (2, 2, 4.0),
            ],
            vec![1.0, 2.0, 1.0],
        )
    }

    #[test]
    fn converges_on_spd_system() {
        let system = spd_3x3();
        let backend = IterativeBackend::new(1e-10);

        let (x, info) = backend.solve_normalized(&system).expect("solve");
        assert!(info.warning.is_none());
        assert!(system.residual_norm(&x) < 1e-8);
    }

    #[test]
    fn matches_direct_solution() {
        let system = spd_3x3();
        let (x_it, _) = IterativeBackend::new(1e-12)
            .solve_normalized(&system)
            .expect("iterative solve");
        let (x_dir, _) = DirectBackend.solve_normalized(&system).expect("direct solve");

        for i in 0..3 {
            assert!((x_it[i] - x_dir[i]).abs() < 1e-8);
        }
    }

    #[test]
    fn handles_nonsymmetric_system() {
        // Non-symmetric but well-conditioned.
        let system = system(
            2,
            &[(0, 0, 3.0), (0, 1, 1.0), (1, 0, -1.0), (1, 1, 2.0)],
            vec![5.0, 1.0],
        );
        let (x, _) = IterativeBackend::new(1e-10)
            .solve_normalized(&system)
            .expect("solve");
        // Exact solution of [3 1; -1 2] x = [5; 1] is [9/7, 8/7].
        assert!((x[0] - 9.0 / 7.0).abs() < 1e-7);
        assert!((x[1] - 8.0 / 7.0).abs() < 1e-7);
    }

    #[test]
    fn non_convergence_returns_iterate_with_warning() {
        let system = system(
            4,
            &[
                (0, 0, 1.0),
                (0, 3, 2.0),
                (1, 1, 5.0),
                (1, 0, -3.0),
                (2, 2, 2.0),
                (2, 1, 4.0),
                (3, 3, 3.0),
                (3, 2, -2.0),
            ],
            vec![1.0, 2.0, 3.0, 4.0],
        );
        let backend = IterativeBackend::new(1e-14).with_max_iterations(1);

        let (_, info) = backend.solve_normalized(&system).expect("solve");
        let warning = info.warning.expect("warning expected");
        assert!(warning.residual_norm > 0.0);
        assert_eq!(info.mode_used, ModeUsed::Iterative);
    }

    #[test]
    fn zero_rhs_returns_zero_without_iterating() {
        let system = system(2, &[(0, 0, 1.0), (1, 1, 1.0)], vec![0.0, 0.0]);
        let (x, info) = IterativeBackend::new(1e-8)
            .solve_normalized(&system)
            .expect("solve");
        assert_eq!(info.iterations, 0);
        assert_eq!(x[0], 0.0);
        assert_eq!(x[1], 0.0);
    }
}
