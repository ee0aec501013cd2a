use super::*;
use crate::types::DType;
use approx::assert_relative_eq;

fn prediction() -> Matrix {
    Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], DType::F64, true).unwrap()
}

fn target() -> Matrix {
    Matrix::new(vec![vec![0.0, 2.0], vec![5.0, 3.0]], DType::F64, false).unwrap()
}

#[test]
fn test_mse_mean() {
    let input = prediction();
    let loss = MSELoss::default().forward(&input, &target()).unwrap();
    // (1 + 0 + 4 + 1) / 4
    assert_relative_eq!(loss.data(), 1.5);

    loss.backward().unwrap();
    // 2 (x - t) / n
    assert_eq!(
        input.grad().unwrap(),
        vec![vec![0.5, 0.0], vec![-1.0, 0.5]]
    );
}

#[test]
fn test_mse_sum() {
    let input = prediction();
    let loss = MSELoss::new(Reduction::Sum).forward(&input, &target()).unwrap();
    assert_relative_eq!(loss.data(), 6.0);
    loss.backward().unwrap();
    assert_eq!(
        input.grad().unwrap(),
        vec![vec![2.0, 0.0], vec![-4.0, 2.0]]
    );
}

#[test]
fn test_mse_shape_mismatch() {
    let bad = Matrix::new(vec![vec![0.0, 0.0]], DType::F64, false).unwrap();
    let err = MSELoss::default().forward(&prediction(), &bad).unwrap_err();
    assert!(err.is_shape_error());
}

#[test]
fn test_reduction_from_str() {
    assert_eq!("MEAN".parse::<Reduction>().unwrap(), Reduction::Mean);
    assert_eq!("sum".parse::<Reduction>().unwrap(), Reduction::Sum);
    assert!(matches!(
        "none".parse::<Reduction>(),
        Err(GridGradError::ConfigurationError(_))
    ));
}
