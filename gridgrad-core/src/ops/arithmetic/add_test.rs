use super::broadcast_shape;
use crate::error::GridGradError;
use crate::types::DType;
use crate::{Matrix, OpKind};

fn create_test_matrix(data: Vec<Vec<f64>>) -> Matrix {
    Matrix::new(data, DType::F64, false).expect("Test matrix creation failed")
}

fn create_test_matrix_with_grad(data: Vec<Vec<f64>>) -> Matrix {
    Matrix::new(data, DType::F64, true).expect("Test matrix_with_grad creation failed")
}

#[test]
fn test_broadcast_shape_rules() {
    assert_eq!(broadcast_shape((3, 4), (3, 4)), Some((3, 4)));
    assert_eq!(broadcast_shape((3, 4), (1, 4)), Some((3, 4)));
    assert_eq!(broadcast_shape((1, 4), (3, 4)), Some((3, 4)));
    assert_eq!(broadcast_shape((3, 4), (1, 3)), None);
    assert_eq!(broadcast_shape((3, 4), (2, 4)), None);
    assert_eq!(broadcast_shape((3, 1), (3, 4)), None);
}

#[test]
fn test_add_matrices_ok() {
    let a = create_test_matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = create_test_matrix(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let result = a.add(&b).unwrap();
    assert_eq!(result.data(), vec![vec![6.0, 8.0], vec![10.0, 12.0]]);
    assert!(!result.requires_grad());
    assert!(result.grad_fn_kind().is_none());
}

#[test]
fn test_add_shape_mismatch() {
    let a = create_test_matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = create_test_matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    match a.add(&b) {
        Err(GridGradError::ShapeMismatch { operation, lhs, rhs }) => {
            assert_eq!(operation, "add");
            assert_eq!(lhs, vec![2, 2]);
            assert_eq!(rhs, vec![2, 3]);
        }
        other => panic!("Incorrect result: {:?}", other),
    }
}

#[test]
fn test_add_dtype_mismatch() {
    let a = create_test_matrix(vec![vec![1.0]]);
    let b = Matrix::new(vec![vec![1]], DType::I64, true).unwrap();
    let err = a.add(&b).unwrap_err();
    assert!(matches!(err, GridGradError::TypeMismatch { .. }));
}

#[test]
fn test_add_broadcast_row_forward() {
    let a = create_test_matrix(vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
        vec![9.0, 10.0, 11.0, 12.0],
    ]);
    let bias = create_test_matrix(vec![vec![10.0, 20.0, 30.0, 40.0]]);
    let expected = vec![
        vec![11.0, 22.0, 33.0, 44.0],
        vec![15.0, 26.0, 37.0, 48.0],
        vec![19.0, 30.0, 41.0, 52.0],
    ];
    assert_eq!(a.add(&bias).unwrap().data(), expected);
    // Broadcasting works from either side.
    assert_eq!(bias.add(&a).unwrap().data(), expected);
}

#[test]
fn test_add_broadcast_backward_sums_over_rows() {
    let a = create_test_matrix_with_grad(vec![vec![0.0; 4]; 3]);
    let bias = create_test_matrix_with_grad(vec![vec![1.0, 2.0, 3.0, 4.0]]);
    let out = a.add(&bias).unwrap();
    assert_eq!(out.shape(), (3, 4));
    assert_eq!(out.grad_fn_kind(), Some(OpKind::Add));

    out.backward().unwrap();

    assert_eq!(bias.grad().unwrap(), vec![vec![3.0, 3.0, 3.0, 3.0]]);
    assert_eq!(a.grad().unwrap(), vec![vec![1.0; 4]; 3]);
}

#[test]
fn test_add_propagate_requires_grad() {
    let a = create_test_matrix(vec![vec![1.0]]);
    let b = create_test_matrix_with_grad(vec![vec![2.0]]);
    let c = create_test_matrix(vec![vec![3.0]]);

    assert!(a.add(&b).unwrap().requires_grad());
    assert!(!a.add(&c).unwrap().requires_grad());

    // Only the operand that tracks gradient receives one.
    a.add(&b).unwrap().backward().unwrap();
    assert_eq!(b.grad().unwrap(), vec![vec![1.0]]);
    assert!(a.grad().is_none());
}
