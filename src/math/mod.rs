mod vector;

pub use vector::{first_nonzero_index, is_orthogonal, is_parallel, is_zero_vector};

/// Dynamically sized coefficient vector.
pub type VectorN = nalgebra::DVector<f64>;

/// Dynamically sized matrix, used for augmented `[A | b]` storage.
pub type MatrixN = nalgebra::DMatrix<f64>;

/// Global tolerance for near-zero comparisons.
///
/// Every comparison against zero in the engine goes through this constant.
/// Callers needing a different tolerance should rescale their input.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if `value` is within [`TOLERANCE`] of zero.
#[must_use]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() < TOLERANCE
}

/// Returns `value`, or exactly `0.0` when it is negligible.
#[must_use]
pub fn snap_to_zero(value: f64) -> f64 {
    if is_near_zero(value) {
        0.0
    } else {
        value
    }
}
