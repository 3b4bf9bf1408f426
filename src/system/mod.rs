mod augmented;
mod hyperplane;
mod linear_system;

pub use augmented::AugmentedMatrix;
pub use hyperplane::Hyperplane;
pub use linear_system::LinearSystem;

use crate::error::{Result, SystemError};
use crate::math::{is_near_zero, TOLERANCE};

/// Row storage that the reduction engine operates on.
///
/// Both the equation-list form ([`LinearSystem`]) and the flattened
/// `[A | b]` form ([`AugmentedMatrix`]) implement this trait, so a single
/// elimination routine serves both.
///
/// The three elementary operations mutate in place and preserve the
/// solution set.
pub trait Rows {
    /// Number of equations.
    fn row_count(&self) -> usize;

    /// Number of variables (coefficient columns).
    fn dimension(&self) -> usize;

    /// Coefficient of variable `col` in equation `row`.
    ///
    /// Callers must pass in-range indices.
    fn coefficient(&self, row: usize, col: usize) -> f64;

    /// Right-hand side of equation `row`.
    ///
    /// Callers must pass an in-range index.
    fn constant(&self, row: usize) -> f64;

    /// Exchanges rows `i` and `j`. A no-op when `i == j`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::RowOutOfRange`] if either index is invalid.
    fn swap_rows(&mut self, i: usize, j: usize) -> Result<()>;

    /// Multiplies every coefficient and the constant of `row` by `k`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::DegenerateScale`] if `k` is exactly zero, or
    /// [`SystemError::RowOutOfRange`] if `row` is invalid. The system is
    /// left untouched in both cases.
    fn scale_row(&mut self, row: usize, k: f64) -> Result<()>;

    /// Replaces row `dst` with `dst + k * src`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::RowOutOfRange`] if either index is invalid, or
    /// [`SystemError::SelfCombination`] if `src == dst`. The system is left
    /// untouched in both cases.
    fn add_scaled_row(&mut self, src: usize, k: f64, dst: usize) -> Result<()>;

    /// Sets every negligible coefficient and constant of `row` to exactly zero.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::RowOutOfRange`] if `row` is invalid.
    fn clear_negligible(&mut self, row: usize) -> Result<()>;

    /// Column of the first non-negligible coefficient in `row`, if any.
    fn first_nonzero_index(&self, row: usize) -> Option<usize> {
        (0..self.dimension()).find(|&col| !is_near_zero(self.coefficient(row, col)))
    }

    /// Pivot column of every row, `None` for rows with no usable pivot.
    fn indices_of_first_nonzero_terms(&self) -> Vec<Option<usize>> {
        (0..self.row_count())
            .map(|row| self.first_nonzero_index(row))
            .collect()
    }

    /// Topmost row whose pivot column is `col`.
    fn topmost_row_with_pivot(&self, col: usize) -> Option<usize> {
        (0..self.row_count()).find(|&row| self.first_nonzero_index(row) == Some(col))
    }

    /// Returns `true` if `row` reads `0 = k` with `k` non-negligible.
    fn is_contradiction_row(&self, row: usize) -> bool {
        self.first_nonzero_index(row).is_none() && self.constant(row).abs() >= TOLERANCE
    }
}

/// Validates the operands of [`Rows::add_scaled_row`].
pub(crate) fn check_combination(
    src: usize,
    dst: usize,
    len: usize,
) -> std::result::Result<(), SystemError> {
    check_row(src, len)?;
    check_row(dst, len)?;
    if src == dst {
        return Err(SystemError::SelfCombination { row: src });
    }
    Ok(())
}

/// Validates a row index against `len`.
pub(crate) fn check_row(row: usize, len: usize) -> std::result::Result<(), SystemError> {
    if row < len {
        Ok(())
    } else {
        Err(SystemError::RowOutOfRange { row, len })
    }
}
