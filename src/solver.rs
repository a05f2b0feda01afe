//! In-place Gauss-Jordan inversion of the restrained stiffness matrix.

use log::{debug, warn};
use nalgebra::DMatrix;

use crate::errors::AnalysisError;

/// Smallest pivot magnitude accepted during elimination.
///
/// After restraints are applied a healthy pivot is either exactly 1 or a
/// physical stiffness in kN/m, so anything below this marks a mechanism or a
/// joint no member reaches. The value has no analytical derivation; keep it
/// unchanged so results stay comparable with earlier designs.
pub const PIVOT_TOLERANCE: f64 = 0.99;

/// Replace `matrix` with its inverse by Gauss-Jordan elimination without
/// row exchanges.
///
/// The full inverse is kept, rather than a factorization, because it is
/// multiplied against one load vector per load instance.
///
/// # Errors
///
/// Returns [`AnalysisError::BadPivot`] when a pivot's magnitude falls below
/// [`PIVOT_TOLERANCE`] or is NaN. The matrix is left partially eliminated.
///
/// # Examples
/// ```
/// use bridgex::solver::invert_in_place;
/// use nalgebra::DMatrix;
///
/// let mut matrix = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, 2.0, 3.0]);
/// invert_in_place(&mut matrix).expect("well conditioned");
/// assert_eq!(matrix, DMatrix::from_row_slice(2, 2, &[0.375, -0.25, -0.25, 0.5]));
/// ```
pub fn invert_in_place(matrix: &mut DMatrix<f64>) -> Result<(), AnalysisError> {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols(), "stiffness matrix must be square");

    for equation in 0..n {
        let pivot = matrix[(equation, equation)];
        if pivot.is_nan() || pivot.abs() < PIVOT_TOLERANCE {
            warn!("bad pivot {pivot:e} at equation {}", equation + 1);
            return Err(AnalysisError::BadPivot {
                equation: equation + 1,
                pivot,
            });
        }
        let reciprocal = 1.0 / pivot;

        for col in 0..n {
            matrix[(equation, col)] /= pivot;
        }

        for row in 0..n {
            if row == equation {
                continue;
            }
            let factor = matrix[(row, equation)];
            if factor == 0.0 {
                continue;
            }
            for col in 0..n {
                let reduction = matrix[(equation, col)] * factor;
                matrix[(row, col)] -= reduction;
            }
            matrix[(row, equation)] = -factor * reciprocal;
        }
        matrix[(equation, equation)] = reciprocal;
    }
    debug!("inverted {n}x{n} stiffness matrix");
    Ok(())
}
