use approx::{assert_abs_diff_eq, assert_relative_eq};
use gradstep_core::autograd::grad_check::check_grad;
use gradstep_core::train::{minimize, squared_distance, TrainConfig};
use gradstep_core::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::process::Command;

mod common;
use common::{run_from, scalar_leaf};

#[test]
fn test_default_run_reaches_target() {
    let report = minimize(&TrainConfig::default()).unwrap();
    assert!(
        (report.final_value() - 1.0).abs() < 1e-3,
        "final value {} too far from 1.0",
        report.final_value()
    );
    // Adam overshoots before settling, so only the end points are compared.
    let first = report.losses[0];
    let last = *report.losses.last().unwrap();
    assert_eq!(first, 16.0);
    assert!(last < 1e-4);
}

#[test]
fn test_runs_are_deterministic() {
    let a = run_from(5.0, 1.0);
    let b = run_from(5.0, 1.0);
    assert_eq!(a.final_value().to_bits(), b.final_value().to_bits());
    assert_eq!(a.losses, b.losses);
    assert_eq!(a.variable, b.variable);
}

#[test]
fn test_gradient_at_start_is_eight() {
    let x = scalar_leaf(5.0);
    let loss = squared_distance(&x, &Tensor::scalar(1.0)).unwrap();
    loss.backward().unwrap();
    assert_eq!(x.grad().unwrap().item().unwrap(), 8.0);
}

#[test]
fn test_loss_gradient_matches_finite_differences() {
    let x = Tensor::scalar_f64(-2.5);
    x.requires_grad_(true).unwrap();
    let target = Tensor::scalar_f64(1.0);
    check_grad(
        |inputs: &[Tensor]| squared_distance(&inputs[0], &target),
        &[x],
        1e-6,
        1e-5,
    )
    .unwrap();
}

#[test]
fn test_loss_is_non_negative_and_zero_only_at_target() {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(0.0f64, 10.0).unwrap();
    for _ in 0..200 {
        let v = normal.sample(&mut rng);
        let target = normal.sample(&mut rng);
        let loss = squared_distance(&Tensor::scalar_f64(v), &Tensor::scalar_f64(target))
            .unwrap()
            .item()
            .unwrap();
        assert!(loss >= 0.0);
        assert_eq!(loss == 0.0, v == target);

        let at_target = squared_distance(&Tensor::scalar_f64(v), &Tensor::scalar_f64(v))
            .unwrap()
            .item()
            .unwrap();
        assert_eq!(at_target, 0.0);
    }
}

#[test]
fn test_recorded_losses_are_non_negative() {
    let report = run_from(-3.0, 2.0);
    assert_eq!(report.losses.len(), 250);
    assert!(report.losses.iter().all(|&l| l >= 0.0));
    assert!((report.final_value() - 2.0).abs() < (-3.0f64 - 2.0).abs());
}

#[test]
fn test_caller_tensor_tracks_updates() {
    let config = TrainConfig {
        steps: 2,
        ..TrainConfig::default()
    };
    let report = minimize(&config).unwrap();
    assert_relative_eq!(report.variable.item().unwrap(), report.final_value());
    assert!(report.variable.grad().is_some());
    assert_abs_diff_eq!(report.losses[0], 16.0);
    assert_abs_diff_eq!(report.losses[1], 9.0, epsilon = 1e-4);
}

#[test]
fn test_binary_prints_final_variable() {
    let output = Command::new(env!("CARGO_BIN_EXE_quadratic_descent"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run quadratic_descent");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "tensor(1.0000, requires_grad=True)");
}
