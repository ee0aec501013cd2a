use crate::matrix::Matrix;

/// Asserts that `actual` has the shape of `expected` and that every element
/// is within `tolerance` of the expected value.
///
/// Panics with the first offending position otherwise.
pub fn check_matrix_near(actual: &Matrix, expected: &[Vec<f64>], tolerance: f64) {
    let expected_rows = expected.len();
    let expected_cols = expected.first().map_or(0, |row| row.len());
    assert_eq!(
        actual.shape(),
        (expected_rows, expected_cols),
        "Shape mismatch"
    );

    for (r, (actual_row, expected_row)) in actual.data().iter().zip(expected).enumerate() {
        assert_eq!(actual_row.len(), expected_row.len(), "Row {} length mismatch", r);
        for (c, (a, e)) in actual_row.iter().zip(expected_row).enumerate() {
            let diff = (a - e).abs();
            if diff > tolerance || diff.is_nan() {
                panic!(
                    "Data mismatch at ({}, {}): actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                    r, c, a, e, diff, tolerance
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DType;

    #[test]
    fn test_check_matrix_near_accepts_within_tolerance() {
        let m = Matrix::new(vec![vec![1.0, 2.0]], DType::F64, false).unwrap();
        check_matrix_near(&m, &[vec![1.0 + 1e-9, 2.0]], 1e-6);
    }

    #[test]
    #[should_panic(expected = "Data mismatch at (0, 1)")]
    fn test_check_matrix_near_reports_position() {
        let m = Matrix::new(vec![vec![1.0, 2.0]], DType::F64, false).unwrap();
        check_matrix_near(&m, &[vec![1.0, 2.5]], 1e-6);
    }

    #[test]
    #[should_panic(expected = "Shape mismatch")]
    fn test_check_matrix_near_shape() {
        let m = Matrix::new(vec![vec![1.0, 2.0]], DType::F64, false).unwrap();
        check_matrix_near(&m, &[vec![1.0], vec![2.0]], 1e-6);
    }
}
