//! I/O support for the quantum-capable linear-solver sidecar.
//!
//! This crate provides:
//! - **Matrix/RHS dump** readers for the simulator's COO-style text exports
//! - **Run settings** reader for the optional `solver_settings.json` document
//! - **Solution writer** (one value per line, scientific notation)
//! - **Performance log** appender (`solver_performance.csv`, append-only CSV)

pub mod error;
pub mod loader;
pub mod settings;
pub mod writer;

pub use error::{IoError, Result};
pub use loader::{MatrixTriplets, load_matrix, load_rhs};
pub use settings::{RawSettings, SETTINGS_FILE, load_settings};
pub use writer::{
    PERFORMANCE_LOG, PerformanceRecord, append_performance_record, write_solution,
};
