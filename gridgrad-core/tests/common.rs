use gridgrad_core::{DType, Matrix};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Each integration test binary uses a different subset of these helpers.
#[allow(dead_code)]
pub fn constant(data: Vec<Vec<f64>>) -> Matrix {
    Matrix::new(data, DType::F64, false).expect("Test matrix creation failed")
}

#[allow(dead_code)]
pub fn tracked(data: Vec<Vec<f64>>) -> Matrix {
    Matrix::new(data, DType::F64, true).expect("Tracked test matrix creation failed")
}

#[allow(dead_code)]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[allow(dead_code)]
pub fn init_logger() {
    // Attempt to initialize env_logger. If it fails (already initialized), that's okay.
    let _ = env_logger::builder().is_test(true).try_init();
}
