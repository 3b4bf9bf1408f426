use crate::error::{Result, SystemError};
use crate::math::{snap_to_zero, MatrixN, VectorN};

use super::{check_combination, check_row, LinearSystem, Rows};

/// Flattened `[A | b]` storage: one row per equation, the last column holds
/// the right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedMatrix {
    data: MatrixN,
}

impl AugmentedMatrix {
    /// Builds `[a | b]`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::LengthMismatch`] if `b` does not have one
    /// entry per row of `a`.
    pub fn new(a: &MatrixN, b: &VectorN) -> Result<Self> {
        if a.nrows() != b.len() {
            return Err(SystemError::LengthMismatch {
                what: "right-hand side",
                expected: a.nrows(),
                found: b.len(),
            }
            .into());
        }
        let mut data = a.clone().insert_column(a.ncols(), 0.0);
        data.column_mut(a.ncols()).copy_from(b);
        Ok(Self { data })
    }

    /// Wraps an already augmented matrix.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::MissingRhs`] if `data` has no columns.
    pub fn from_matrix(data: MatrixN) -> Result<Self> {
        if data.ncols() == 0 {
            return Err(SystemError::MissingRhs.into());
        }
        Ok(Self { data })
    }

    /// The coefficient block `A`.
    #[must_use]
    pub fn coefficients(&self) -> MatrixN {
        self.data.columns(0, self.dimension()).into_owned()
    }

    /// The right-hand side `b`.
    #[must_use]
    pub fn rhs(&self) -> VectorN {
        self.data.column(self.dimension()).into_owned()
    }

    /// Returns the underlying `[A | b]` matrix.
    #[must_use]
    pub fn into_inner(self) -> MatrixN {
        self.data
    }
}

impl From<&LinearSystem> for AugmentedMatrix {
    fn from(system: &LinearSystem) -> Self {
        let dim = system.dimension();
        let data = MatrixN::from_fn(system.len(), dim + 1, |r, c| {
            if c < dim {
                system[r].normal()[c]
            } else {
                system[r].constant()
            }
        });
        Self { data }
    }
}

impl Rows for AugmentedMatrix {
    fn row_count(&self) -> usize {
        self.data.nrows()
    }

    fn dimension(&self) -> usize {
        self.data.ncols() - 1
    }

    fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    fn constant(&self, row: usize) -> f64 {
        self.data[(row, self.dimension())]
    }

    fn swap_rows(&mut self, i: usize, j: usize) -> Result<()> {
        check_row(i, self.row_count())?;
        check_row(j, self.row_count())?;
        if i != j {
            self.data.swap_rows(i, j);
        }
        Ok(())
    }

    fn scale_row(&mut self, row: usize, k: f64) -> Result<()> {
        check_row(row, self.row_count())?;
        if k == 0.0 {
            return Err(SystemError::DegenerateScale { row }.into());
        }
        self.data.row_mut(row).scale_mut(k);
        Ok(())
    }

    fn add_scaled_row(&mut self, src: usize, k: f64, dst: usize) -> Result<()> {
        check_combination(src, dst, self.row_count())?;
        for col in 0..self.data.ncols() {
            let value = self.data[(src, col)];
            self.data[(dst, col)] += k * value;
        }
        Ok(())
    }

    fn clear_negligible(&mut self, row: usize) -> Result<()> {
        check_row(row, self.row_count())?;
        for x in self.data.row_mut(row).iter_mut() {
            *x = snap_to_zero(*x);
        }
        Ok(())
    }
}
