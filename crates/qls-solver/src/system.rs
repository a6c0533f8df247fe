//! Assembled linear system in CSR form.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use qls_io::{IoError, MatrixTriplets};

/// A square sparse system A x = b, ready for any backend.
///
/// Built once per run from the dump files; immutable afterwards.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    /// System matrix in CSR format (duplicate triplets already summed).
    pub matrix: CsrMatrix<f64>,
    /// Right-hand side.
    pub rhs: DVector<f64>,
}

impl LinearSystem {
    /// Assemble from loader output.
    ///
    /// COO suits ingestion because entries may arrive in any order and
    /// duplicate (row, col) entries are summed during the conversion to
    /// CSR, which is exactly the dump format's contract.
    pub fn from_parts(triplets: MatrixTriplets, rhs: Vec<f64>) -> Result<Self, IoError> {
        let n = triplets.n;
        let coo = CooMatrix::try_from_triplets(
            n,
            n,
            triplets.row_indices,
            triplets.col_indices,
            triplets.values,
        )
        .map_err(|e| IoError::Parse(format!("invalid COO triplets: {e:?}")))?;

        Ok(Self {
            matrix: CsrMatrix::from(&coo),
            rhs: DVector::from_vec(rhs),
        })
    }

    /// System dimension n.
    pub fn n(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of stored non-zeros.
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Sparse matrix-vector product A * x.
    pub fn matvec(&self, x: &DVector<f64>) -> DVector<f64> {
        let mut y = DVector::zeros(self.n());
        for (row_idx, row) in self.matrix.row_iter().enumerate() {
            let mut acc = 0.0;
            for (&col_idx, &value) in row.col_indices().iter().zip(row.values().iter()) {
                acc += value * x[col_idx];
            }
            y[row_idx] = acc;
        }
        y
    }

    /// Densify for factorization-based backends.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.n(), self.n());
        for (row_idx, row) in self.matrix.row_iter().enumerate() {
            for (&col_idx, &value) in row.col_indices().iter().zip(row.values().iter()) {
                dense[(row_idx, col_idx)] = value;
            }
        }
        dense
    }

    /// Residual norm ||A x - b|| for a candidate solution.
    pub fn residual_norm(&self, x: &DVector<f64>) -> f64 {
        (self.matvec(x) - &self.rhs).norm()
    }
}
