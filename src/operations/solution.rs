use std::fmt;

use tracing::debug;

use crate::error::{Result, SystemError};
use crate::math::VectorN;
use crate::system::Rows;

/// Classification of a reduced system's solution set.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Some equation reads `0 = k` with `k` non-zero.
    Inconsistent,
    /// Every variable is determined.
    Unique(VectorN),
    /// At least one variable is free.
    Infinite(Parametrization),
}

impl Solution {
    /// Returns the solution vector for a uniquely solvable system.
    #[must_use]
    pub fn unique(&self) -> Option<&VectorN> {
        match self {
            Self::Unique(x) => Some(x),
            _ => None,
        }
    }

    /// Returns `true` if the system has no solution.
    #[must_use]
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, Self::Inconsistent)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inconsistent => write!(f, "No solutions"),
            Self::Unique(x) => {
                write!(f, "Unique solution: (")?;
                for (i, v) in x.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, ")")
            }
            Self::Infinite(p) => write!(
                f,
                "Infinitely many solutions ({} free variable{})",
                p.free_variables.len(),
                if p.free_variables.len() == 1 { "" } else { "s" }
            ),
        }
    }
}

/// Solution set of an underdetermined system: `basepoint + Σ tᵢ · dᵢ`.
///
/// There is one direction vector per free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Parametrization {
    basepoint: VectorN,
    direction_vectors: Vec<VectorN>,
    free_variables: Vec<usize>,
}

impl Parametrization {
    /// The point obtained with every free variable set to zero.
    #[must_use]
    pub fn basepoint(&self) -> &VectorN {
        &self.basepoint
    }

    /// One direction vector per free variable, in column order.
    #[must_use]
    pub fn direction_vectors(&self) -> &[VectorN] {
        &self.direction_vectors
    }

    /// Columns with no owning pivot.
    #[must_use]
    pub fn free_variables(&self) -> &[usize] {
        &self.free_variables
    }

    /// Evaluates the parametrization with the given free-variable values.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::LengthMismatch`] if `params` does not have
    /// one value per free variable.
    pub fn point_at(&self, params: &[f64]) -> Result<VectorN> {
        if params.len() != self.direction_vectors.len() {
            return Err(SystemError::LengthMismatch {
                what: "parameter list",
                expected: self.direction_vectors.len(),
                found: params.len(),
            }
            .into());
        }
        let mut point = self.basepoint.clone();
        for (t, d) in params.iter().zip(&self.direction_vectors) {
            point.axpy(*t, d, 1.0);
        }
        Ok(point)
    }
}

/// Classifies a system in reduced row-echelon form.
///
/// The system is inconsistent if any row reads `0 = k`. Otherwise it is
/// uniquely solvable when every column owns a pivot, and the solution is the
/// constant of each owning row in column order. Anything else has free
/// columns and is returned as a [`Parametrization`].
#[must_use]
pub fn classify<R: Rows + ?Sized>(rows: &R) -> Solution {
    if let Some(row) = (0..rows.row_count()).find(|&row| rows.is_contradiction_row(row)) {
        debug!(row, "contradiction row, no solutions");
        return Solution::Inconsistent;
    }

    let dimension = rows.dimension();
    let owners: Vec<Option<usize>> = (0..dimension)
        .map(|col| rows.topmost_row_with_pivot(col))
        .collect();

    let basepoint = VectorN::from_iterator(
        dimension,
        owners.iter().map(|owner| owner.map_or(0.0, |row| rows.constant(row))),
    );

    let free_variables: Vec<usize> = owners
        .iter()
        .enumerate()
        .filter_map(|(col, owner)| owner.is_none().then_some(col))
        .collect();

    if free_variables.is_empty() {
        debug!("unique solution");
        return Solution::Unique(basepoint);
    }

    let direction_vectors = free_variables
        .iter()
        .map(|&free| {
            VectorN::from_fn(dimension, |col, _| match owners[col] {
                Some(row) => -rows.coefficient(row, free),
                None if col == free => 1.0,
                None => 0.0,
            })
        })
        .collect();

    debug!(free = free_variables.len(), "infinitely many solutions");
    Solution::Infinite(Parametrization {
        basepoint,
        direction_vectors,
        free_variables,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::GaussJordanError;
    use crate::system::{Hyperplane, LinearSystem};

    fn system(rows: Vec<(Vec<f64>, f64)>) -> LinearSystem {
        LinearSystem::new(
            rows.into_iter()
                .map(|(n, k)| Hyperplane::from_slice(&n, k))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn unique_solution() {
        let s = system(vec![
            (vec![5.862, 1.178, -10.366], -8.15),
            (vec![-2.931, -0.589, 5.183], -4.075),
        ]);
        // Parallel normals with inconsistent constants.
        assert_eq!(s.solve().unwrap(), Solution::Inconsistent);

        let s = system(vec![
            (vec![5.262, 2.739, -9.878], -3.441),
            (vec![5.111, 6.358, 7.638], -2.152),
            (vec![2.016, -9.924, -1.367], -9.278),
            (vec![2.167, -13.543, -18.883], -10.567),
        ]);
        let solution = s.solve().unwrap();
        let x = solution.unique().unwrap();
        assert_abs_diff_eq!(x[0], -1.177, epsilon = 1e-3);
        assert_abs_diff_eq!(x[1], 0.707, epsilon = 1e-3);
        assert_abs_diff_eq!(x[2], -0.083, epsilon = 1e-3);
        assert!(s.is_satisfied_by(x));
    }

    #[test]
    fn infinite_solutions_parametrization() {
        let s = system(vec![
            (vec![0.786, 0.786, 0.588], -0.714),
            (vec![-0.138, -0.138, 0.244], 0.319),
        ]);
        let Solution::Infinite(p) = s.solve().unwrap() else {
            panic!("expected infinitely many solutions");
        };
        assert_eq!(p.free_variables(), &[1]);
        assert_eq!(p.direction_vectors().len(), 1);
        assert_abs_diff_eq!(p.direction_vectors()[0][1], 1.0);
        for t in [-2.0, 0.0, 3.5] {
            assert!(s.is_satisfied_by(&p.point_at(&[t]).unwrap()));
        }
    }

    #[test]
    fn point_at_checks_parameter_count() {
        let s = system(vec![(vec![1.0, 1.0, 1.0], 1.0)]);
        let Solution::Infinite(p) = s.solve().unwrap() else {
            panic!("expected infinitely many solutions");
        };
        assert_eq!(p.free_variables(), &[1, 2]);
        assert_eq!(p.basepoint().as_slice(), &[1.0, 0.0, 0.0]);
        assert_eq!(
            p.point_at(&[1.0]).unwrap_err(),
            GaussJordanError::from(SystemError::LengthMismatch {
                what: "parameter list",
                expected: 2,
                found: 1
            })
        );
        let x = p.point_at(&[2.0, 3.0]).unwrap();
        assert_eq!(x.as_slice(), &[-4.0, 2.0, 3.0]);
    }

    #[test]
    fn display() {
        assert_eq!(Solution::Inconsistent.to_string(), "No solutions");
        assert_eq!(
            Solution::Unique(VectorN::from_vec(vec![1.0, -2.5])).to_string(),
            "Unique solution: (1, -2.5)"
        );
        let s = system(vec![(vec![1.0, 1.0], 1.0)]);
        assert_eq!(
            s.solve().unwrap().to_string(),
            "Infinitely many solutions (1 free variable)"
        );
    }
}
