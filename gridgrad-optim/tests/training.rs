use gridgrad_core::matrix::create;
use gridgrad_core::nn::{Linear, MSELoss, Module, ReLU, Sequential};
use gridgrad_core::{DType, Matrix};
use gridgrad_optim::{Adam, AdamOptions, Optimizer, Sgd};

mod common;
use common::{init_logger, seeded};

struct Problem {
    x: Matrix,
    target: Matrix,
}

fn problem(rng: &mut rand::rngs::StdRng) -> Problem {
    Problem {
        x: create::randn(4, 3, DType::F64, false, rng).unwrap(),
        target: create::randn(4, 2, DType::F64, false, rng).unwrap(),
    }
}

/// Targets generated by a known affine map, with inputs chosen so the
/// least-squares problem is well conditioned and exactly solvable.
fn affine_problem() -> Problem {
    let x = Matrix::new(
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 0.0, 0.0],
        ],
        DType::F64,
        false,
    )
    .unwrap();
    let w = Matrix::new(vec![vec![0.5, -1.0], vec![2.0, 0.0], vec![-0.3, 1.5]], DType::F64, false)
        .unwrap();
    let b = Matrix::new(vec![vec![0.25, -0.75]], DType::F64, false).unwrap();
    let target = x.matmul(&w).unwrap().add(&b).unwrap();
    Problem { x, target }
}

fn loss_of(model: &dyn Module, p: &Problem) -> f64 {
    MSELoss::default()
        .forward(&model.forward(&p.x).unwrap(), &p.target)
        .unwrap()
        .data()
}

/// One SGD step on a seeded `Linear(3, 2)`; returns the loss before the step
/// and every parameter value after it.
fn sgd_step(seed: u64) -> (f64, Vec<f64>) {
    let mut rng = seeded(seed);
    let layer = Linear::new(3, 2, DType::F64, &mut rng).unwrap();
    let p = problem(&mut rng);
    let mut optim = Sgd::new(layer.parameters(), 0.1).unwrap();

    optim.zero_grad();
    let loss = MSELoss::default()
        .forward(&layer.forward(&p.x).unwrap(), &p.target)
        .unwrap();
    loss.backward().unwrap();
    optim.step().unwrap();
    (
        loss.data(),
        layer.parameters().iter().map(|s| s.data()).collect(),
    )
}

#[test]
fn sgd_step_is_bit_reproducible() {
    init_logger();
    let (loss_a, params_a) = sgd_step(2024);
    let (loss_b, params_b) = sgd_step(2024);
    assert_eq!(loss_a.to_bits(), loss_b.to_bits());
    assert_eq!(
        params_a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        params_b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
}

#[test]
fn sgd_training_converges_on_linear_problem() {
    init_logger();
    let layer = Linear::new(3, 2, DType::F64, &mut seeded(1)).unwrap();
    let p = affine_problem();
    let mut optim = Sgd::new(layer.parameters(), 0.5).unwrap();

    let initial = loss_of(&layer, &p);
    for _ in 0..200 {
        optim.zero_grad();
        let loss = MSELoss::default()
            .forward(&layer.forward(&p.x).unwrap(), &p.target)
            .unwrap();
        loss.backward().unwrap();
        optim.step().unwrap();
    }
    let last = loss_of(&layer, &p);
    assert!(last < initial * 1e-3, "loss {} -> {}", initial, last);
}

#[test]
fn adam_trains_a_small_mlp() {
    init_logger();
    let mut rng = seeded(8);
    let model = Sequential::new()
        .add(Linear::new(3, 8, DType::F64, &mut rng).unwrap())
        .add(ReLU::new())
        .add(Linear::new(8, 2, DType::F64, &mut rng).unwrap());
    let p = affine_problem();
    let mut optim = Adam::new(model.parameters(), AdamOptions::with_lr(0.01)).unwrap();

    let initial = loss_of(&model, &p);
    for _ in 0..500 {
        optim.zero_grad();
        let loss = MSELoss::default()
            .forward(&model.forward(&p.x).unwrap(), &p.target)
            .unwrap();
        loss.backward().unwrap();
        optim.step().unwrap();
    }
    let last = loss_of(&model, &p);
    assert!(last < initial * 0.5, "loss {} -> {}", initial, last);
}
