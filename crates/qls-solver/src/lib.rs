//! Solver core for the simulator's sparse linear systems.
//!
//! Pipeline: read the COO dump, assemble a CSR system, normalize the
//! right-hand side to unit length, dispatch to the configured backend
//! (direct LU, BiCGSTAB, or a quantum-simulated solver that falls back
//! to direct on any failure), and denormalize the result.

pub mod backend;
pub mod normalize;
pub mod pipeline;
pub mod strategy;
pub mod system;

pub use backend::{
    BackendError, ConvergenceWarning, DirectBackend, IterativeBackend, LinearSolverBackend,
    ModeUsed, QuantumHybrid, SolveInfo, backend_for,
};
pub use normalize::Normalizer;
pub use pipeline::{SolveError, SolveOutcome, run_solve};
pub use strategy::{SolveMode, SolverConfig};
pub use system::LinearSystem;
