//! Solution and performance-log writers.
//!
//! Both writers are side-effecting and surface every I/O failure to the
//! caller; a failed write is fatal for the run.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Default name of the append-only performance log.
pub const PERFORMANCE_LOG: &str = "solver_performance.csv";

const PERFORMANCE_HEADER: &str = "Timestamp,Mode,MatrixSize,TimeSeconds";

/// Write the solution vector, one value per line in high-precision
/// scientific notation.
pub fn write_solution(path: &Path, x: &[f64]) -> Result<()> {
    let mut file = File::create(path)?;
    for value in x {
        writeln!(file, "{value:.18e}")?;
    }
    Ok(())
}

/// One appended row of the performance log. Rows are never mutated or
/// deleted once written.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub timestamp: String,
    pub mode: String,
    pub matrix_size: usize,
    pub elapsed_seconds: f64,
}

/// Append a record to the performance log, creating the file with its
/// CSV header if it does not exist yet.
pub fn append_performance_record(path: &Path, record: &PerformanceRecord) -> Result<()> {
    let new_file = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if new_file {
        writeln!(file, "{PERFORMANCE_HEADER}")?;
    }
    writeln!(
        file,
        "{},{},{},{:.6}",
        record.timestamp, record.mode, record.matrix_size, record.elapsed_seconds
    )?;
    Ok(())
}
