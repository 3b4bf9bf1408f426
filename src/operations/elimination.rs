use tracing::{debug, debug_span, trace};

use crate::error::{NumericError, Result};
use crate::math::is_near_zero;
use crate::system::Rows;

/// Reduces `rows` to row-echelon form in place.
///
/// Columns are processed left to right. For each column the remaining row
/// with the largest non-negligible coefficient (the topmost one on ties)
/// becomes the pivot row: it is swapped into the next pivot position and the
/// column is cleared from every row below it. Columns with no usable
/// coefficient are free and are skipped, and the pivot position does not
/// advance.
///
/// Afterwards pivot columns strictly increase with row index, no two rows
/// share a pivot column, and every row without a pivot sits below all pivot
/// rows with its negligible entries snapped to exactly zero. A row that
/// reduces to `0 = k` keeps its constant, so contradictions are preserved.
///
/// # Errors
///
/// Only fails if a row operation is rejected, which indicates a bug in the
/// storage implementation.
pub fn forward_eliminate<R: Rows + ?Sized>(rows: &mut R) -> Result<()> {
    let count = rows.row_count();
    let dimension = rows.dimension();
    let _span = debug_span!("forward_eliminate", rows = count, dimension).entered();

    let mut next = 0;
    for col in 0..dimension {
        if next >= count {
            break;
        }
        let Some(pivot) = pivot_row_from(rows, next, col) else {
            trace!(col, "no usable pivot, column is free");
            continue;
        };
        if pivot != next {
            trace!(from = pivot, to = next, col, "swapping pivot row into place");
            rows.swap_rows(pivot, next)?;
        }
        for target in next + 1..count {
            if eliminate(rows, next, col, target)? {
                rows.clear_negligible(target)?;
            }
        }
        next += 1;
    }

    for row in 0..count {
        rows.clear_negligible(row)?;
    }
    debug!(rank = next, "row-echelon form reached");
    Ok(())
}

/// Turns a row-echelon system into reduced row-echelon form in place.
///
/// Working from the bottom pivot row up, each pivot is normalized to `1` and
/// its column is cleared from every other row. Free columns and rows without
/// a pivot are left as they are.
///
/// # Errors
///
/// Returns [`NumericError::NegligiblePivot`] if a pivot coefficient is too
/// small to divide by. This cannot happen for the output of
/// [`forward_eliminate`].
pub fn back_substitute<R: Rows + ?Sized>(rows: &mut R) -> Result<()> {
    let count = rows.row_count();
    let _span = debug_span!("back_substitute", rows = count).entered();

    let pivots = rows.indices_of_first_nonzero_terms();
    for (row, pivot) in pivots.into_iter().enumerate().rev() {
        let Some(col) = pivot else {
            continue;
        };
        let value = rows.coefficient(row, col);
        if is_near_zero(value) {
            return Err(NumericError::NegligiblePivot { row, col, value }.into());
        }
        rows.scale_row(row, 1.0 / value)?;
        for other in (0..count).filter(|&other| other != row) {
            eliminate(rows, row, col, other)?;
        }
    }

    for row in 0..count {
        rows.clear_negligible(row)?;
    }
    Ok(())
}

/// Row at or below `start` with the largest non-negligible `|coefficient|`
/// in `col`. Ties go to the topmost row.
fn pivot_row_from<R: Rows + ?Sized>(rows: &R, start: usize, col: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for row in start..rows.row_count() {
        let magnitude = rows.coefficient(row, col).abs();
        if is_near_zero(magnitude) {
            continue;
        }
        if best.map_or(true, |(_, largest)| magnitude > largest) {
            best = Some((row, magnitude));
        }
    }
    best.map(|(row, _)| row)
}

/// Cancels the `col` coefficient of `target` using `pivot_row`.
///
/// Returns `Ok(false)` without touching anything when there is nothing to
/// cancel, or when the pivot coefficient is negligible and dividing by it
/// would invent a pivot out of rounding noise.
fn eliminate<R: Rows + ?Sized>(
    rows: &mut R,
    pivot_row: usize,
    col: usize,
    target: usize,
) -> Result<bool> {
    let entry = rows.coefficient(target, col);
    if is_near_zero(entry) {
        return Ok(false);
    }
    let divisor = rows.coefficient(pivot_row, col);
    if is_near_zero(divisor) {
        trace!(pivot_row, col, divisor, "negligible divisor, skipping elimination");
        return Ok(false);
    }
    let factor = -entry / divisor;
    trace!(pivot_row, target, col, factor, "eliminating");
    rows.add_scaled_row(pivot_row, factor, target)?;
    Ok(true)
}
