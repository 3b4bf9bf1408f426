use std::fmt;
use std::ops::Index;

use crate::error::{Result, SystemError};
use crate::math::VectorN;
use crate::operations::{back_substitute, classify, forward_eliminate, Solution};

use super::{check_combination, check_row, Hyperplane, Rows};

/// An ordered list of equations sharing one dimension.
///
/// Row order is significant: swaps move equations between positions.
/// Elementary row operations mutate the system in place, while
/// [`triangular_form`](Self::triangular_form), [`rref`](Self::rref) and
/// [`solve`](Self::solve) work on a private copy and leave `self` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    dimension: usize,
    rows: Vec<Hyperplane>,
}

impl LinearSystem {
    /// Creates a system from a non-empty list of equations.
    ///
    /// The dimension is taken from the first equation.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::EmptySystem`] if `rows` is empty, or
    /// [`SystemError::DimensionMismatch`] if any equation disagrees with the
    /// first one.
    pub fn new(rows: Vec<Hyperplane>) -> Result<Self> {
        let dimension = rows
            .first()
            .map(Hyperplane::dimension)
            .ok_or(SystemError::EmptySystem)?;
        Self::with_dimension(dimension, rows)
    }

    /// Creates a system with an explicit dimension. `rows` may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::DimensionMismatch`] if any equation does not
    /// have `dimension` coefficients.
    pub fn with_dimension(dimension: usize, rows: Vec<Hyperplane>) -> Result<Self> {
        if let Some((row, plane)) = rows
            .iter()
            .enumerate()
            .find(|(_, p)| p.dimension() != dimension)
        {
            return Err(SystemError::DimensionMismatch {
                expected: dimension,
                found: plane.dimension(),
                row,
            }
            .into());
        }
        Ok(Self { dimension, rows })
    }

    /// Number of variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of equations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the system has no equations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the equations in order.
    #[must_use]
    pub fn rows(&self) -> &[Hyperplane] {
        &self.rows
    }

    /// Returns equation `i`, if it exists.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&Hyperplane> {
        self.rows.get(i)
    }

    /// Iterates over the equations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Hyperplane> {
        self.rows.iter()
    }

    /// Replaces equation `i`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::RowOutOfRange`] for an invalid index or
    /// [`SystemError::DimensionMismatch`] if `plane` has the wrong dimension.
    pub fn set_row(&mut self, i: usize, plane: Hyperplane) -> Result<()> {
        check_row(i, self.rows.len())?;
        if plane.dimension() != self.dimension {
            return Err(SystemError::DimensionMismatch {
                expected: self.dimension,
                found: plane.dimension(),
                row: i,
            }
            .into());
        }
        self.rows[i] = plane;
        Ok(())
    }

    /// Returns `true` if `x` satisfies every equation.
    #[must_use]
    pub fn is_satisfied_by(&self, x: &VectorN) -> bool {
        self.rows.iter().all(|p| p.is_satisfied_by(x))
    }

    /// Returns a row-echelon copy of the system.
    ///
    /// # Errors
    ///
    /// Propagates errors from the elimination engine.
    pub fn triangular_form(&self) -> Result<Self> {
        let mut system = self.clone();
        forward_eliminate(&mut system)?;
        Ok(system)
    }

    /// Returns the reduced row-echelon copy of the system.
    ///
    /// # Errors
    ///
    /// Propagates errors from the elimination engine.
    pub fn rref(&self) -> Result<Self> {
        let mut system = self.triangular_form()?;
        back_substitute(&mut system)?;
        Ok(system)
    }

    /// Reduces a copy of the system and classifies its solution set.
    ///
    /// # Errors
    ///
    /// Propagates errors from the elimination engine.
    pub fn solve(&self) -> Result<Solution> {
        Ok(classify(&self.rref()?))
    }
}

impl Rows for LinearSystem {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.rows[row].normal()[col]
    }

    fn constant(&self, row: usize) -> f64 {
        self.rows[row].constant()
    }

    fn swap_rows(&mut self, i: usize, j: usize) -> Result<()> {
        check_row(i, self.rows.len())?;
        check_row(j, self.rows.len())?;
        self.rows.swap(i, j);
        Ok(())
    }

    fn scale_row(&mut self, row: usize, k: f64) -> Result<()> {
        check_row(row, self.rows.len())?;
        if k == 0.0 {
            return Err(SystemError::DegenerateScale { row }.into());
        }
        self.rows[row].scale(k);
        Ok(())
    }

    fn add_scaled_row(&mut self, src: usize, k: f64, dst: usize) -> Result<()> {
        check_combination(src, dst, self.rows.len())?;
        let source = self.rows[src].clone();
        self.rows[dst].add_scaled(&source, k);
        Ok(())
    }

    fn clear_negligible(&mut self, row: usize) -> Result<()> {
        check_row(row, self.rows.len())?;
        self.rows[row].clear_negligible();
        Ok(())
    }
}

impl Index<usize> for LinearSystem {
    type Output = Hyperplane;

    fn index(&self, i: usize) -> &Self::Output {
        &self.rows[i]
    }
}

impl<'a> IntoIterator for &'a LinearSystem {
    type Item = &'a Hyperplane;
    type IntoIter = std::slice::Iter<'a, Hyperplane>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, plane) in self.rows.iter().enumerate() {
            write!(f, "\nEquation {}: {plane}", i + 1)?;
        }
        Ok(())
    }
}
