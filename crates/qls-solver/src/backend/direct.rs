//! Direct backend: dense LU factorization via nalgebra.

use nalgebra::DVector;

use super::traits::*;
use crate::system::LinearSystem;

/// Factorization-based solver, exact up to floating-point round-off.
///
/// A singular matrix is a fatal `SolveFailure`; there is nothing to
/// fall back to below this backend.
pub struct DirectBackend;

impl LinearSolverBackend for DirectBackend {
    fn solve_normalized(
        &self,
        system: &LinearSystem,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        let dense = system.to_dense();
        let x = dense.lu().solve(&system.rhs).ok_or_else(|| {
            BackendError::SolveFailure("singular matrix in LU factorization".into())
        })?;

        let residual = system.residual_norm(&x);
        Ok((
            x,
            SolveInfo {
                mode_used: ModeUsed::Direct,
                iterations: 1,
                residual_norm: Some(residual),
                solver_name: "nalgebra-LU".to_string(),
                warning: None,
            },
        ))
    }

    fn name(&self) -> &str {
        "direct-lu"
    }
}
