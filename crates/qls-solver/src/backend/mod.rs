//! Solver backend abstraction layer.
//!
//! The pipeline is backend-agnostic: it resolves a configuration into
//! one of three concrete backends and calls it through the
//! `LinearSolverBackend` trait.
//!
//! # Backends
//!
//! - **Direct**: dense LU factorization (exact; singular is fatal).
//! - **Iterative**: BiCGSTAB to a configured tolerance (non-convergence
//!   is a warning, not an error).
//! - **QuantumHybrid**: quantum-simulated solve that falls back to
//!   Direct on any failure, including a missing runtime.

pub mod direct;
pub mod iterative;
pub mod quantum;
pub mod traits;

pub use direct::DirectBackend;
pub use iterative::IterativeBackend;
pub use quantum::{ExactSimRuntime, QuantumHybrid, QuantumRuntime, VqlsRuntime, resolve_runtime};
pub use traits::*;

use crate::strategy::{SolveMode, SolverConfig};

/// Pick the backend for a resolved configuration.
pub fn backend_for(config: &SolverConfig) -> Box<dyn LinearSolverBackend> {
    match config.mode {
        SolveMode::Direct => Box::new(DirectBackend),
        SolveMode::Iterative => Box::new(IterativeBackend::new(config.tolerance)),
        SolveMode::Quantum => Box::new(QuantumHybrid::new(config.backend_name.clone())),
    }
}
