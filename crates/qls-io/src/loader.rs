//! Readers for the simulator's matrix and right-hand-side dump files.
//!
//! The simulator exports its matrix as a COO-style text file, one
//! `<row> <col> <value>` triplet per line, and the source vector as
//! `<index> <value>` pairs. Lines that do not match the expected shape
//! are skipped; a matrix file with no usable triplets at all is a parse
//! error.

use std::fs;
use std::path::Path;

use crate::error::{IoError, Result};

/// Sparse matrix in COO (coordinate/triplet) format.
///
/// Backend-agnostic interchange between the dump reader and the solver
/// crate. Duplicate (row, col) entries are kept as-is here; they are
/// summed when the solver converts to CSR.
#[derive(Debug, Clone)]
pub struct MatrixTriplets {
    /// Matrix dimension, `max(max row, max col) + 1`.
    pub n: usize,
    pub row_indices: Vec<usize>,
    pub col_indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl MatrixTriplets {
    /// Number of stored entries (before duplicate summation).
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

/// Read a matrix dump file into COO triplets.
///
/// Each line must hold exactly three whitespace-separated tokens
/// (`row col value`); lines with any other token count, or with tokens
/// that fail numeric parsing, are skipped.
pub fn load_matrix(path: &Path) -> Result<MatrixTriplets> {
    let content = fs::read_to_string(path)?;

    let mut row_indices = Vec::new();
    let mut col_indices = Vec::new();
    let mut values = Vec::new();
    let mut max_index = 0usize;

    for line in content.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            continue;
        }
        let (Ok(row), Ok(col), Ok(value)) = (
            tokens[0].parse::<usize>(),
            tokens[1].parse::<usize>(),
            tokens[2].parse::<f64>(),
        ) else {
            continue;
        };
        max_index = max_index.max(row).max(col);
        row_indices.push(row);
        col_indices.push(col);
        values.push(value);
    }

    if values.is_empty() {
        return Err(IoError::Parse(format!(
            "no valid (row, col, value) triplets in {}",
            path.display()
        )));
    }

    Ok(MatrixTriplets {
        n: max_index + 1,
        row_indices,
        col_indices,
        values,
    })
}

/// Read a right-hand-side dump into a dense vector of length `n`.
///
/// Each line must hold exactly two tokens (`index value`); other line
/// shapes are skipped. Indices absent from the file stay zero. An index
/// outside `[0, n)` means the pair cannot belong to this matrix and is
/// rejected as a parse error.
pub fn load_rhs(path: &Path, n: usize) -> Result<Vec<f64>> {
    let content = fs::read_to_string(path)?;

    let mut b = vec![0.0; n];
    for line in content.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            continue;
        }
        let (Ok(index), Ok(value)) = (tokens[0].parse::<usize>(), tokens[1].parse::<f64>())
        else {
            continue;
        };
        if index >= n {
            return Err(IoError::Parse(format!(
                "RHS index {} out of range for a {}x{} matrix in {}",
                index,
                n,
                n,
                path.display()
            )));
        }
        b[index] = value;
    }

    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_triplets_and_dimension() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.dat");
        fs::write(&path, "0 0 4.0\n0 1 1.0\n1 0 1.0\n1 1 3.0\n").expect("write matrix");

        let triplets = load_matrix(&path).expect("load should succeed");
        assert_eq!(triplets.n, 2);
        assert_eq!(triplets.nnz(), 4);
        assert_eq!(triplets.row_indices, vec![0, 0, 1, 1]);
        assert_eq!(triplets.values, vec![4.0, 1.0, 1.0, 3.0]);
    }

    #[test]
    fn skips_lines_with_wrong_token_count() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.dat");
        fs::write(
            &path,
            "# header comment\n0 0 2.0\n1 1\n1 1 3.0 extra\n1 1 3.0\n\n",
        )
        .expect("write matrix");

        let triplets = load_matrix(&path).expect("load should succeed");
        assert_eq!(triplets.nnz(), 2);
        assert_eq!(triplets.n, 2);
    }

    #[test]
    fn skips_lines_with_unparsable_tokens() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.dat");
        fs::write(&path, "a b c\n0 0 not_a_number\n0 0 5.0\n").expect("write matrix");

        let triplets = load_matrix(&path).expect("load should succeed");
        assert_eq!(triplets.nnz(), 1);
        assert_eq!(triplets.values, vec![5.0]);
    }

    #[test]
    fn duplicate_triplets_are_all_kept() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.dat");
        fs::write(&path, "0 0 1.0\n0 0 3.0\n").expect("write matrix");

        let triplets = load_matrix(&path).expect("load should succeed");
        // Summation happens downstream in the COO->CSR conversion.
        assert_eq!(triplets.nnz(), 2);
    }

    #[test]
    fn empty_matrix_file_is_a_parse_error() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.dat");
        fs::write(&path, "").expect("write matrix");

        let err = load_matrix(&path).expect_err("load should fail");
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn all_malformed_matrix_file_is_a_parse_error() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.dat");
        fs::write(&path, "garbage\nmore garbage here\n1 2\n").expect("write matrix");

        let err = load_matrix(&path).expect_err("load should fail");
        assert!(matches!(err, IoError::Parse(_)));
    }

    #[test]
    fn rhs_scatters_into_zeros() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("rhs.dat");
        fs::write(&path, "0 1.0\n2 2.5\nbad line\n").expect("write rhs");

        let b = load_rhs(&path, 4).expect("load should succeed");
        assert_eq!(b, vec![1.0, 0.0, 2.5, 0.0]);
    }

    #[test]
    fn rhs_index_out_of_range_is_rejected() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("rhs.dat");
        fs::write(&path, "0 1.0\n7 2.0\n").expect("write rhs");

        let err = load_rhs(&path, 2).expect_err("load should fail");
        assert!(matches!(err, IoError::Parse(_)));
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("create temp dir");
        let err = load_matrix(&dir.path().join("nope.dat")).expect_err("load should fail");
        assert!(matches!(err, IoError::Io(_)));
    }
}
