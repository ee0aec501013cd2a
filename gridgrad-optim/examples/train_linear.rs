//! Fits `Linear(100, 1)` to random data with Adam.
//!
//! Run with `RUST_LOG=info` to see the loss per epoch.

use gridgrad_core::matrix::create;
use gridgrad_core::nn::{Linear, MSELoss, Module};
use gridgrad_core::{DType, GridGradError};
use gridgrad_optim::{Adam, AdamOptions, Optimizer};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEED: u64 = 42;
const EPOCHS: usize = 50;

fn main() -> Result<(), GridGradError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut rng = StdRng::seed_from_u64(SEED);
    let x = create::rand(10, 100, DType::F64, false, &mut rng)?;
    let y = create::rand(10, 1, DType::F64, false, &mut rng)?;

    let model = Linear::new(100, 1, DType::F64, &mut rng)?;
    let loss_fn = MSELoss::default();
    let mut optim = Adam::new(model.parameters(), AdamOptions::with_lr(0.01))?;

    for epoch in 0..EPOCHS {
        optim.zero_grad();
        let loss = loss_fn.forward(&model.forward(&x)?, &y)?;
        loss.backward()?;
        optim.step()?;
        log::info!("epoch {:>3}: loss = {:.6}", epoch, loss.data());
    }
    Ok(())
}
