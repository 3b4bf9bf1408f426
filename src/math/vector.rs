use super::{is_near_zero, VectorN, TOLERANCE};

/// Index of the first entry whose magnitude exceeds [`TOLERANCE`].
///
/// Returns `None` when every entry is negligible. An empty slice has no
/// nonzero entry either.
#[must_use]
pub fn first_nonzero_index(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !is_near_zero(*v))
}

/// Returns `true` if every component of `v` is negligible.
#[must_use]
pub fn is_zero_vector(v: &VectorN) -> bool {
    v.iter().all(|x| is_near_zero(*x))
}

/// Tests whether two vectors are parallel (or anti-parallel).
///
/// The zero vector is parallel to everything.
#[must_use]
pub fn is_parallel(a: &VectorN, b: &VectorN) -> bool {
    if is_zero_vector(a) || is_zero_vector(b) {
        return true;
    }
    let cos = a.dot(b) / (a.norm() * b.norm());
    (cos.abs() - 1.0).abs() < TOLERANCE
}

/// Tests whether two vectors are orthogonal.
///
/// The dot product is compared relative to the magnitudes, so the test does
/// not depend on how the equations were scaled.
#[must_use]
pub fn is_orthogonal(a: &VectorN, b: &VectorN) -> bool {
    let scale = (a.norm() * b.norm()).max(1.0);
    a.dot(b).abs() < TOLERANCE * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_nonzero_skips_negligible_entries() {
        assert_eq!(first_nonzero_index(&[0.0, 1e-13, -3.0, 1.0]), Some(2));
    }

    #[test]
    fn first_nonzero_all_negligible() {
        assert_eq!(first_nonzero_index(&[0.0, 1e-12, -1e-11]), None);
        assert_eq!(first_nonzero_index(&[]), None);
    }

    #[test]
    fn first_nonzero_at_zero_is_distinct_from_none() {
        assert_eq!(first_nonzero_index(&[2.0, 0.0]), Some(0));
    }

    #[test]
    fn parallel_scalar_multiple() {
        let a = VectorN::from_vec(vec![1.0, 2.0, 3.0]);
        let b = VectorN::from_vec(vec![-2.0, -4.0, -6.0]);
        assert!(is_parallel(&a, &b));
    }

    #[test]
    fn not_parallel() {
        let a = VectorN::from_vec(vec![1.0, 0.0]);
        let b = VectorN::from_vec(vec![1.0, 1.0]);
        assert!(!is_parallel(&a, &b));
    }

    #[test]
    fn zero_vector_is_parallel_to_everything() {
        let zero = VectorN::zeros(3);
        let a = VectorN::from_vec(vec![1.0, 5.0, -2.0]);
        assert!(is_parallel(&zero, &a));
        assert!(is_zero_vector(&zero));
    }

    #[test]
    fn orthogonal_vectors() {
        let a = VectorN::from_vec(vec![1.0, 1.0, 0.0]);
        let b = VectorN::from_vec(vec![1.0, -1.0, 5.0]);
        assert!(is_orthogonal(&a, &b));
        assert!(!is_orthogonal(&a, &a));
    }
}
