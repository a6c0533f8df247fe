//! End-to-end solve pipeline.
//!
//! Stages run synchronously in order: load, assemble, normalize,
//! backend solve, denormalize. The only retry anywhere is the quantum
//! backend's internal fallback to direct. Elapsed time is measured
//! strictly around the backend call.

use std::path::Path;
use std::time::Instant;

use nalgebra::DVector;
use thiserror::Error;

use qls_io::IoError;

use crate::backend::{BackendError, SolveInfo, backend_for};
use crate::normalize::Normalizer;
use crate::strategy::SolverConfig;
use crate::system::LinearSystem;

/// Top-level pipeline failure. Everything here is fatal for the run.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A finished solve: denormalized solution plus diagnostics.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub x: DVector<f64>,
    /// Wall-clock seconds spent inside the backend call only.
    pub elapsed_seconds: f64,
    pub info: SolveInfo,
}

impl SolveOutcome {
    pub fn matrix_size(&self) -> usize {
        self.x.len()
    }
}

/// Load, normalize, solve and denormalize one system.
pub fn run_solve(
    matrix_path: &Path,
    rhs_path: &Path,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    println!("Reading matrix from {}...", matrix_path.display());
    let triplets = qls_io::load_matrix(matrix_path)?;
    let rhs = qls_io::load_rhs(rhs_path, triplets.n)?;

    let system = LinearSystem::from_parts(triplets, rhs)?;
    println!(
        "Matrix shape: {}x{}, non-zeros: {}",
        system.n(),
        system.n(),
        system.nnz()
    );

    let (b_normalized, normalizer) = Normalizer::scale(&system.rhs);
    let normalized = LinearSystem {
        matrix: system.matrix,
        rhs: b_normalized,
    };

    let backend = backend_for(config);
    println!("Running {} backend", backend.name());

    let start = Instant::now();
    let (x_normalized, info) = backend.solve_normalized(&normalized)?;
    let elapsed_seconds = start.elapsed().as_secs_f64();

    let x = normalizer.restore(&x_normalized);
    Ok(SolveOutcome {
        x,
        elapsed_seconds,
        info,
    })
}
