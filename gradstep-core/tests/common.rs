use gradstep_core::train::{minimize, TrainConfig, TrainReport};
use gradstep_core::Tensor;

/// Creates a 0-d f32 tensor that requires grad.
#[allow(dead_code)]
pub fn scalar_leaf(value: f32) -> Tensor {
    let t = Tensor::scalar(value);
    t.requires_grad_(true).expect("fresh scalar is a leaf");
    t
}

/// Runs `minimize` from `initial_value` toward `target`, other settings at their defaults.
#[allow(dead_code)]
pub fn run_from(initial_value: f64, target: f64) -> TrainReport {
    let config = TrainConfig {
        initial_value,
        target,
        ..TrainConfig::default()
    };
    minimize(&config).expect("training run failed")
}
