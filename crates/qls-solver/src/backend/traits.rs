//! Backend trait and shared result types.
//!
//! These types abstract over the concrete numeric method used for the
//! global solve so the pipeline stays backend-agnostic.

use nalgebra::DVector;
use thiserror::Error;

use crate::system::LinearSystem;

/// Typed backend failures.
///
/// `Unavailable` is recoverable: the quantum composition layer catches
/// it and re-runs the direct backend. `SolveFailure` is fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("solve failure: {0}")]
    SolveFailure(String),
}

/// Which solver actually produced the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeUsed {
    Direct,
    Iterative,
    QuantumSim,
    /// The quantum attempt failed and the direct backend answered.
    QuantumFallback,
}

impl ModeUsed {
    pub fn as_str(self) -> &'static str {
        match self {
            ModeUsed::Direct => "Direct",
            ModeUsed::Iterative => "Iterative",
            ModeUsed::QuantumSim => "QuantumSim",
            ModeUsed::QuantumFallback => "QuantumFallback",
        }
    }
}

/// Non-fatal report that the iterative method stopped short of its
/// tolerance; the best available iterate is still returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub residual_norm: f64,
}

impl std::fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "iterative solver did not converge after {} iterations (residual {:.3e})",
            self.iterations, self.residual_norm
        )
    }
}

/// Solver diagnostics attached to every solution.
#[derive(Debug, Clone)]
pub struct SolveInfo {
    pub mode_used: ModeUsed,
    /// Number of iterations (1 for direct solvers).
    pub iterations: usize,
    /// Final residual norm, when the method tracks one.
    pub residual_norm: Option<f64>,
    /// Human-readable solver name (e.g. "nalgebra-LU", "BiCGSTAB").
    pub solver_name: String,
    /// Set when the iterative method did not reach its tolerance.
    pub warning: Option<ConvergenceWarning>,
}

/// A solver backend for the normalized system A x = b.
pub trait LinearSolverBackend {
    /// Solve the (already normalized) system.
    fn solve_normalized(
        &self,
        system: &LinearSystem,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
