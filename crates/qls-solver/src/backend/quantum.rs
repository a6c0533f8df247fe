//! Quantum-simulated backend with automatic fallback to direct.
//!
//! The quantum runtime is an opaque collaborator: it may be missing
//! entirely, reject the requested backend name, refuse the encoding, or
//! fail mid-execution. Every one of those outcomes is a typed
//! `BackendError::Unavailable` that the `QuantumHybrid` composition
//! recovers by re-running the direct backend on the same normalized
//! input. Callers therefore get a result whenever the direct backend
//! would succeed, regardless of quantum availability.

use nalgebra::DVector;

use super::direct::DirectBackend;
use super::traits::*;
use crate::system::LinearSystem;

/// Amplitude encoding needs a unit-norm RHS; inputs farther than this
/// from unit length are refused by the runtimes.
const UNIT_NORM_SLACK: f64 = 1e-6;

/// An opaque quantum (or quantum-simulated) linear-solver runtime.
pub trait QuantumRuntime: std::fmt::Debug {
    fn name(&self) -> &str;

    /// Solve A x = b for a unit-norm b.
    fn solve(&self, system: &LinearSystem) -> Result<DVector<f64>, BackendError>;
}

fn check_amplitude_encoding(system: &LinearSystem) -> Result<(), BackendError> {
    let norm = system.rhs.norm();
    if (norm - 1.0).abs() > UNIT_NORM_SLACK {
        return Err(BackendError::Unavailable(format!(
            "amplitude encoding requires a unit-norm RHS (got norm {norm:.3e})"
        )));
    }
    Ok(())
}

/// Exact statevector-grade simulation of the quantum linear solve.
///
/// Verifies the matrix/encoding mapping and solves the encoded system
/// classically, the way an ideal statevector backend would. Any
/// numeric failure is reported as unavailability so the hybrid layer
/// falls back.
#[derive(Debug)]
pub struct ExactSimRuntime;

impl QuantumRuntime for ExactSimRuntime {
    fn name(&self) -> &str {
        "exact-statevector-sim"
    }

    fn solve(&self, system: &LinearSystem) -> Result<DVector<f64>, BackendError> {
        check_amplitude_encoding(system)?;
        system
            .to_dense()
            .lu()
            .solve(&system.rhs)
            .ok_or_else(|| BackendError::Unavailable("statevector solve failed".into()))
    }
}

/// Variational quantum linear solver driven by a classical
/// optimization loop.
///
/// The trial solution is optimized one amplitude at a time: each sweep
/// minimizes the residual cost ||A x - b||^2 along every coordinate in
/// turn, with the operator application delegated to the (simulated)
/// runtime. The loop reports unavailability when it cannot reach its
/// target residual, which sends the hybrid layer to the direct
/// fallback.
#[derive(Debug)]
pub struct VqlsRuntime {
    max_sweeps: usize,
    target_residual: f64,
}

impl Default for VqlsRuntime {
    fn default() -> Self {
        Self {
            max_sweeps: 500,
            target_residual: 1e-9,
        }
    }
}

impl VqlsRuntime {
    pub fn new(max_sweeps: usize, target_residual: f64) -> Self {
        Self {
            max_sweeps,
            target_residual,
        }
    }
}

impl QuantumRuntime for VqlsRuntime {
    fn name(&self) -> &str {
        "vqls-coordinate-descent"
    }

    fn solve(&self, system: &LinearSystem) -> Result<DVector<f64>, BackendError> {
        check_amplitude_encoding(system)?;

        let n = system.n();
        let a = system.to_dense();
        let b = &system.rhs;
        let mut x = DVector::zeros(n);

        for _sweep in 0..self.max_sweeps {
            for i in 0..n {
                let column = a.column(i);
                let denom = column.dot(&column);
                if denom < 1e-300 {
                    continue;
                }
                let r = b - &a * &x;
                let step = column.dot(&r) / denom;
                x[i] += step;
            }
            if system.residual_norm(&x) <= self.target_residual {
                return Ok(x);
            }
        }

        Err(BackendError::Unavailable(format!(
            "variational loop stalled above target residual after {} sweeps (residual {:.3e})",
            self.max_sweeps,
            system.residual_norm(&x)
        )))
    }
}

/// Explicit capability check replacing import-and-catch detection: map
/// the configured backend name onto an available runtime or report
/// typed unavailability.
pub fn resolve_runtime(backend_name: &str) -> Result<Box<dyn QuantumRuntime>, BackendError> {
    let name = backend_name.to_ascii_lowercase();
    if name.contains("vqls") {
        Ok(Box::new(VqlsRuntime::default()))
    } else if name.contains("aer") || name.contains("simulator") || name.contains("statevector") {
        Ok(Box::new(ExactSimRuntime))
    } else {
        Err(BackendError::Unavailable(format!(
            "no quantum runtime for backend '{backend_name}'"
        )))
    }
}

/// Quantum attempt with the fallback-to-direct edge made explicit.
pub struct QuantumHybrid {
    backend_name: String,
}

impl QuantumHybrid {
    pub fn new(backend_name: impl Into<String>) -> Self {
        Self {
            backend_name: backend_name.into(),
        }
    }

    fn attempt(&self, system: &LinearSystem) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        let runtime = resolve_runtime(&self.backend_name)?;
        let x = runtime.solve(system)?;
        let residual = system.residual_norm(&x);
        Ok((
            x,
            SolveInfo {
                mode_used: ModeUsed::QuantumSim,
                iterations: 1,
                residual_norm: Some(residual),
                solver_name: runtime.name().to_string(),
                warning: None,
            },
        ))
    }
}

impl LinearSolverBackend for QuantumHybrid {
    fn solve_normalized(
        &self,
        system: &LinearSystem,
    ) -> Result<(DVector<f64>, SolveInfo), BackendError> {
        match self.attempt(system) {
            Ok(result) => Ok(result),
            Err(err) => {
                eprintln!("quantum attempt failed ({err}); falling back to direct solver");
                let (x, info) = DirectBackend.solve_normalized(system)?;
                Ok((
                    x,
                    SolveInfo {
                        mode_used: ModeUsed::QuantumFallback,
                        solver_name: format!("{} (fallback)", info.solver_name),
                        ..info
                    },
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "quantum-hybrid"
    }
}
