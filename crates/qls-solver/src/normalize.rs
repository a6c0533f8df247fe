//! Right-hand-side normalization.
//!
//! Amplitude encoding on the quantum path requires a unit-norm input
//! vector, so the RHS is rescaled to unit length before any backend
//! runs and the solution is rescaled back afterwards. The same rescale
//! is applied to every backend so the denormalization step stays
//! backend-agnostic.

use nalgebra::DVector;

/// Norms at or below this are treated as "already zero": no rescale
/// happens and `restore` is the identity.
pub const NORM_FLOOR: f64 = 1e-12;

/// Remembers the rescale factor applied to the RHS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    norm: f64,
}

impl Normalizer {
    /// Rescale `b` to unit L2 norm, remembering the factor.
    ///
    /// A near-zero RHS is returned unchanged with a remembered norm of
    /// zero (no rescale needed).
    pub fn scale(b: &DVector<f64>) -> (DVector<f64>, Self) {
        let norm = b.norm();
        if norm > NORM_FLOOR {
            (b / norm, Self { norm })
        } else {
            (b.clone(), Self { norm: 0.0 })
        }
    }

    /// Undo the rescale on a solution of the normalized system.
    pub fn restore(&self, x: &DVector<f64>) -> DVector<f64> {
        if self.norm > NORM_FLOOR {
            x * self.norm
        } else {
            x.clone()
        }
    }

    /// The remembered L2 norm (zero when no rescale happened).
    pub fn norm(&self) -> f64 {
        self.norm
    }
}
