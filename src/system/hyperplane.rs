use std::fmt;

use crate::error::{Result, SystemError};
use crate::math::{
    first_nonzero_index, is_near_zero, is_orthogonal, is_parallel, is_zero_vector, snap_to_zero,
    VectorN, TOLERANCE,
};

/// Decimal places used when rendering an equation.
const DISPLAY_DECIMALS: i32 = 3;

/// One linear equation `n · x = k` in a fixed dimension.
///
/// The normal vector `n` holds one coefficient per variable and `k` is the
/// constant term. A base point (any point on the hyperplane) is cached and
/// kept in sync with every mutation.
#[derive(Debug, Clone)]
pub struct Hyperplane {
    normal: VectorN,
    constant: f64,
    basepoint: Option<VectorN>,
}

impl Hyperplane {
    /// Creates a hyperplane from a normal vector and constant term.
    #[must_use]
    pub fn new(normal: VectorN, constant: f64) -> Self {
        let basepoint = compute_basepoint(&normal, constant);
        Self {
            normal,
            constant,
            basepoint,
        }
    }

    /// Creates a hyperplane from a coefficient slice and constant term.
    #[must_use]
    pub fn from_slice(coefficients: &[f64], constant: f64) -> Self {
        Self::new(VectorN::from_column_slice(coefficients), constant)
    }

    /// The `0 = 0` hyperplane in `dimension` variables.
    #[must_use]
    pub fn zero(dimension: usize) -> Self {
        Self::new(VectorN::zeros(dimension), 0.0)
    }

    /// Creates a hyperplane in `dimension` variables.
    ///
    /// A missing normal defaults to the zero vector and a missing constant
    /// defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::LengthMismatch`] if `normal` does not have
    /// `dimension` components.
    pub fn with_dimension(
        dimension: usize,
        normal: Option<VectorN>,
        constant: Option<f64>,
    ) -> Result<Self> {
        let normal = normal.unwrap_or_else(|| VectorN::zeros(dimension));
        if normal.len() != dimension {
            return Err(SystemError::LengthMismatch {
                what: "normal vector",
                expected: dimension,
                found: normal.len(),
            }
            .into());
        }
        Ok(Self::new(normal, constant.unwrap_or(0.0)))
    }

    /// Number of variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.normal.len()
    }

    /// Returns the normal vector (the coefficients).
    #[must_use]
    pub fn normal(&self) -> &VectorN {
        &self.normal
    }

    /// Returns the constant term.
    #[must_use]
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Returns a point on the hyperplane, or `None` for a zero normal.
    ///
    /// Every coordinate is zero except the pivot coordinate.
    #[must_use]
    pub fn basepoint(&self) -> Option<&VectorN> {
        self.basepoint.as_ref()
    }

    /// Index of the first non-negligible coefficient.
    ///
    /// `None` means the normal is (numerically) the zero vector.
    #[must_use]
    pub fn first_nonzero_index(&self) -> Option<usize> {
        first_nonzero_index(self.normal.as_slice())
    }

    /// Returns `true` if the normals are parallel.
    #[must_use]
    pub fn is_parallel_to(&self, other: &Self) -> bool {
        is_parallel(&self.normal, &other.normal)
    }

    /// Returns `true` for the `0 = 0` equation.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        is_zero_vector(&self.normal) && is_near_zero(self.constant)
    }

    /// Returns `true` for a `0 = k` equation with `k` non-negligible.
    #[must_use]
    pub fn is_contradiction(&self) -> bool {
        is_zero_vector(&self.normal) && !is_near_zero(self.constant)
    }

    /// Evaluates `n · x`.
    #[must_use]
    pub fn evaluate(&self, x: &VectorN) -> f64 {
        self.normal.dot(x)
    }

    /// Evaluates `n · x - k`.
    #[must_use]
    pub fn residual(&self, x: &VectorN) -> f64 {
        self.evaluate(x) - self.constant
    }

    /// Returns `true` if `x` satisfies the equation.
    ///
    /// The residual is measured relative to the size of the terms involved.
    #[must_use]
    pub fn is_satisfied_by(&self, x: &VectorN) -> bool {
        if x.len() != self.dimension() {
            return false;
        }
        let scale = (self.normal.norm() * x.norm())
            .max(self.constant.abs())
            .max(1.0);
        self.residual(x).abs() < TOLERANCE * scale
    }

    /// Multiplies the coefficients and constant by `k`.
    pub(crate) fn scale(&mut self, k: f64) {
        self.normal *= k;
        self.constant *= k;
        self.refresh_basepoint();
    }

    /// Replaces `self` with `self + k * other`.
    pub(crate) fn add_scaled(&mut self, other: &Self, k: f64) {
        self.normal.axpy(k, &other.normal, 1.0);
        self.constant += k * other.constant;
        self.refresh_basepoint();
    }

    /// Snaps negligible coefficients and constant to exactly zero.
    pub(crate) fn clear_negligible(&mut self) {
        self.normal.apply(|x| *x = snap_to_zero(*x));
        self.constant = snap_to_zero(self.constant);
        self.refresh_basepoint();
    }

    fn refresh_basepoint(&mut self) {
        self.basepoint = compute_basepoint(&self.normal, self.constant);
    }
}

fn compute_basepoint(normal: &VectorN, constant: f64) -> Option<VectorN> {
    let index = first_nonzero_index(normal.as_slice())?;
    let mut point = VectorN::zeros(normal.len());
    point[index] = constant / normal[index];
    Some(point)
}

impl PartialEq for Hyperplane {
    /// Two hyperplanes are equal when they describe the same solution set.
    ///
    /// Zero-normal hyperplanes only equal each other, and then only when the
    /// constants agree.
    fn eq(&self, other: &Self) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }
        match (&self.basepoint, &other.basepoint) {
            (None, None) => is_near_zero(self.constant - other.constant),
            (Some(p), Some(q)) => {
                self.is_parallel_to(other) && is_orthogonal(&(p - q), &self.normal)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Hyperplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_term = false;
        for (i, &c) in self.normal.iter().enumerate() {
            let c = round_for_display(c);
            if c == 0.0 {
                continue;
            }
            match (wrote_term, c < 0.0) {
                (false, true) => write!(f, "-")?,
                (false, false) => {}
                (true, true) => write!(f, " - ")?,
                (true, false) => write!(f, " + ")?,
            }
            if (c.abs() - 1.0).abs() > f64::EPSILON {
                write!(f, "{}", format_number(c.abs()))?;
            }
            write!(f, "x_{}", i + 1)?;
            wrote_term = true;
        }
        if !wrote_term {
            write!(f, "0")?;
        }
        write!(f, " = {}", format_number(round_for_display(self.constant)))
    }
}

fn round_for_display(value: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GaussJordanError;

    #[test]
    fn first_nonzero_index_found() {
        let h = Hyperplane::from_slice(&[0.0, 0.0, 3.0], 1.0);
        assert_eq!(h.first_nonzero_index(), Some(2));
    }

    #[test]
    fn first_nonzero_index_ignores_tiny_values() {
        let h = Hyperplane::from_slice(&[1e-13, 2.0], 1.0);
        assert_eq!(h.first_nonzero_index(), Some(1));
    }

    #[test]
    fn first_nonzero_index_not_found() {
        let h = Hyperplane::from_slice(&[0.0, 1e-12], 1.0);
        assert_eq!(h.first_nonzero_index(), None);
        assert!(h.basepoint().is_none());
    }

    #[test]
    fn defaults_to_zero_equation() {
        let h = Hyperplane::with_dimension(3, None, None).unwrap();
        assert_eq!(h.dimension(), 3);
        assert!(h.is_tautology());
        assert_eq!(h, Hyperplane::zero(3));
    }

    #[test]
    fn with_dimension_rejects_wrong_length() {
        let err = Hyperplane::with_dimension(3, Some(VectorN::zeros(2)), None).unwrap_err();
        assert_eq!(
            err,
            GaussJordanError::from(SystemError::LengthMismatch {
                what: "normal vector",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn basepoint_uses_pivot_coordinate() {
        let h = Hyperplane::from_slice(&[0.0, 2.0, 1.0], 6.0);
        let p = h.basepoint().unwrap();
        assert_eq!(p.as_slice(), &[0.0, 3.0, 0.0]);
        assert!(h.is_satisfied_by(p));
    }

    #[test]
    fn equal_up_to_scalar_multiple() {
        let a = Hyperplane::from_slice(&[1.0, 1.0, 1.0], 1.0);
        let b = Hyperplane::from_slice(&[-10.0, -10.0, -10.0], -10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_but_different_constant() {
        let a = Hyperplane::from_slice(&[1.0, 1.0, 1.0], 1.0);
        let b = Hyperplane::from_slice(&[1.0, 1.0, 1.0], 2.0);
        assert!(a.is_parallel_to(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn zero_normal_equality() {
        let taut = Hyperplane::zero(2);
        let contra = Hyperplane::from_slice(&[0.0, 0.0], 1.0);
        let line = Hyperplane::from_slice(&[1.0, 0.0], 0.0);
        assert!(contra.is_contradiction());
        assert_ne!(taut, contra);
        assert_ne!(taut, line);
        assert_ne!(line, taut);
        assert_eq!(contra, Hyperplane::from_slice(&[0.0, 0.0], 1.0));
    }

    #[test]
    fn add_scaled_refreshes_basepoint() {
        let mut a = Hyperplane::from_slice(&[1.0, 1.0], 2.0);
        let b = Hyperplane::from_slice(&[1.0, 0.0], 1.0);
        a.add_scaled(&b, -1.0);
        assert_eq!(a.normal().as_slice(), &[0.0, 1.0]);
        assert_eq!(a.basepoint().unwrap().as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn clear_negligible_snaps_residue() {
        let mut a = Hyperplane::from_slice(&[1e-14, 0.0], 1e-15);
        a.clear_negligible();
        assert_eq!(a.normal().as_slice(), &[0.0, 0.0]);
        assert_eq!(a.constant(), 0.0);
        assert!(a.is_tautology());
    }

    #[test]
    fn display_equation() {
        let h = Hyperplane::from_slice(&[1.0, 0.0, -2.0], 4.0);
        assert_eq!(h.to_string(), "x_1 - 2x_3 = 4");
        let h = Hyperplane::from_slice(&[-1.5, 1.0], -0.25);
        assert_eq!(h.to_string(), "-1.5x_1 + x_2 = -0.25");
        assert_eq!(Hyperplane::from_slice(&[0.0, 0.0], 3.0).to_string(), "0 = 3");
    }
}
