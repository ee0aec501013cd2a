use super::*;
use crate::utils::testing::check_matrix_near;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixed_layer() -> Linear {
    let weight = Matrix::new(vec![vec![1.0, -1.0], vec![0.5, 2.0], vec![0.0, 1.0]], DType::F64, false)
        .unwrap();
    let bias = Matrix::new(vec![vec![0.1, -0.2]], DType::F64, false).unwrap();
    Linear::from_parts(weight, bias).unwrap()
}

#[test]
fn test_linear_new_shapes_and_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let layer = Linear::new(4, 3, DType::F64, &mut rng).unwrap();
    assert_eq!(layer.weight().shape(), (4, 3));
    assert_eq!(layer.bias().shape(), (1, 3));
    assert_eq!(layer.parameters().len(), 4 * 3 + 3);
    assert!(layer
        .weight()
        .to_vec()
        .iter()
        .all(|w| w.abs() <= 0.5));
    assert!(layer.weight().requires_grad() && layer.bias().requires_grad());
}

#[test]
fn test_linear_new_is_seeded() {
    let a = Linear::new(5, 2, DType::F64, &mut StdRng::seed_from_u64(11)).unwrap();
    let b = Linear::new(5, 2, DType::F64, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(a.weight().to_vec(), b.weight().to_vec());
    assert_eq!(a.bias().to_vec(), b.bias().to_vec());
}

#[test]
fn test_linear_forward() {
    let layer = fixed_layer();
    let x = Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]], DType::F64, false).unwrap();
    let y = layer.forward(&x).unwrap();
    check_matrix_near(&y, &[vec![2.1, 5.8], vec![0.1, -0.2]], 1e-12);
}

#[test]
fn test_linear_backward_reaches_parameters() {
    let layer = fixed_layer();
    let x = Matrix::new(vec![vec![1.0, 2.0, 3.0], vec![-1.0, 0.0, 1.0]], DType::F64, false)
        .unwrap();
    layer.forward(&x).unwrap().backward().unwrap();

    // dW = x^T @ ones, db = column sums of ones
    assert_eq!(
        layer.weight().grad().unwrap(),
        vec![vec![0.0, 0.0], vec![2.0, 2.0], vec![4.0, 4.0]]
    );
    assert_eq!(layer.bias().grad().unwrap(), vec![vec![2.0, 2.0]]);

    let params = layer.parameters();
    assert_eq!(params[2].grad(), 2.0);
    layer.zero_grad();
    assert!(params.iter().all(|p| p.grad() == 0.0));
}

#[test]
fn test_linear_rejects_bad_input() {
    let layer = fixed_layer();
    let x = Matrix::new(vec![vec![1.0, 2.0]], DType::F64, false).unwrap();
    assert!(matches!(
        layer.forward(&x),
        Err(GridGradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_from_parts_validates() {
    let w = Matrix::new(vec![vec![1.0, 2.0]], DType::F64, false).unwrap();
    let b = Matrix::new(vec![vec![1.0]], DType::F64, false).unwrap();
    assert!(matches!(
        Linear::from_parts(w.clone(), b),
        Err(GridGradError::ShapeMismatch { .. })
    ));
    let b32 = Matrix::new(vec![vec![1.0, 2.0]], DType::F32, false).unwrap();
    assert!(matches!(
        Linear::from_parts(w, b32),
        Err(GridGradError::TypeMismatch { .. })
    ));
    assert!(matches!(
        Linear::new(0, 2, DType::F64, &mut StdRng::seed_from_u64(0)),
        Err(GridGradError::ConfigurationError(_))
    ));
}
