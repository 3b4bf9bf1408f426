use tracing::debug;

use crate::error::Result;
use crate::math::{MatrixN, VectorN};
use crate::system::AugmentedMatrix;

use super::{back_substitute, classify, forward_eliminate, Solution};

/// Finest rounding that still changes an `f64`; larger requests are clamped.
pub const MAX_DECIMALS: u8 = 15;

/// Solves `A x = b` by Gauss-Jordan elimination on the augmented matrix.
///
/// Only a unique solution is reported; inconsistent and underdetermined
/// systems both yield `None`. Use [`LinearSystem::solve`] for the full
/// classification.
///
/// [`LinearSystem::solve`]: crate::system::LinearSystem::solve
pub struct GjSolve<'a> {
    a: &'a MatrixN,
    b: &'a VectorN,
    decimals: Option<u8>,
}

impl<'a> GjSolve<'a> {
    /// Creates a new `GjSolve` operation.
    #[must_use]
    pub fn new(a: &'a MatrixN, b: &'a VectorN) -> Self {
        Self {
            a,
            b,
            decimals: None,
        }
    }

    /// Rounds every component of the solution to `decimals` places, at most
    /// [`MAX_DECIMALS`].
    #[must_use]
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Executes the elimination.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::LengthMismatch`] if `b` does not have one
    /// entry per row of `A`.
    ///
    /// [`SystemError::LengthMismatch`]: crate::error::SystemError::LengthMismatch
    pub fn execute(&self) -> Result<Option<VectorN>> {
        let mut augmented = AugmentedMatrix::new(self.a, self.b)?;
        forward_eliminate(&mut augmented)?;
        back_substitute(&mut augmented)?;

        match classify(&augmented) {
            Solution::Unique(mut x) => {
                if let Some(decimals) = self.decimals {
                    x.apply(|v| *v = round_to(*v, decimals));
                }
                Ok(Some(x))
            }
            other => {
                debug!(outcome = %other, "no unique solution");
                Ok(None)
            }
        }
    }
}

/// Rounds `value` to `decimals` places. Values too large to scale are
/// returned as is.
fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals.min(MAX_DECIMALS)));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    // `+ 0.0` turns a rounded -0.0 into 0.0.
    scaled.round() / factor + 0.0
}

/// Solves `A x = b`, returning `None` unless the solution is unique.
///
/// # Errors
///
/// Returns an error if `b` does not have one entry per row of `A`.
pub fn gj_solve(a: &MatrixN, b: &VectorN) -> Result<Option<VectorN>> {
    GjSolve::new(a, b).execute()
}

/// Like [`gj_solve`], with the solution rounded to `decimals` places.
///
/// # Errors
///
/// Returns an error if `b` does not have one entry per row of `A`.
pub fn gj_solve_rounded(a: &MatrixN, b: &VectorN, decimals: u8) -> Result<Option<VectorN>> {
    GjSolve::new(a, b).with_decimals(decimals).execute()
}
