// src/train.rs

//! Gradient descent on a single scalar: drive `x` toward a target by minimizing
//! `(x - target)^2` with Adam.

use crate::error::GradstepError;
use crate::nn::parameter::Parameter;
use crate::ops::loss::squared_error_op;
use crate::optim::{AdamConfig, AdamOptimizer, Optimizer};
use crate::tensor::Tensor;
use std::sync::{Arc, RwLock};

/// Steps between two `debug` progress lines.
const LOG_EVERY: usize = 50;

/// Settings of a [`minimize`] run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainConfig {
    /// Starting value of the optimized variable.
    pub initial_value: f64,
    /// Constant the variable is pulled toward.
    pub target: f64,
    /// Adam learning rate.
    pub learning_rate: f64,
    /// Number of optimizer steps. There is no early stopping.
    pub steps: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            initial_value: 5.0,
            target: 1.0,
            learning_rate: 1.0,
            steps: 250,
        }
    }
}

impl TrainConfig {
    /// Values are stored as f32 tensors, so they must stay finite after narrowing.
    ///
    /// # Errors
    /// `ConfigurationError` naming the offending field.
    pub fn validate(&self) -> Result<(), GradstepError> {
        for (field, value) in [
            ("initial_value", self.initial_value),
            ("target", self.target),
            ("learning_rate", self.learning_rate),
        ] {
            if !(value as f32).is_finite() {
                return Err(GradstepError::ConfigurationError(format!(
                    "{} must be a finite f32 value, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a [`minimize`] run.
#[derive(Clone, Debug)]
pub struct TrainReport {
    /// The optimized variable, still a leaf that requires grad.
    pub variable: Tensor,
    /// Loss evaluated before each update, one entry per step.
    pub losses: Vec<f64>,
    final_value: f64,
}

impl TrainReport {
    pub fn final_value(&self) -> f64 {
        self.final_value
    }
}

/// The objective: `(variable - target)^2`.
pub fn squared_distance(variable: &Tensor, target: &Tensor) -> Result<Tensor, GradstepError> {
    squared_error_op(variable, target)
}

/// Runs `config.steps` iterations of zero_grad, loss, backward and Adam step.
///
/// The variable is updated in place, so `report.variable` is the same tensor the
/// loop differentiated through.
///
/// # Errors
/// `ConfigurationError` for an invalid `config`; any error raised by the
/// forward pass, backward pass or optimizer step is returned as is.
pub fn minimize(config: &TrainConfig) -> Result<TrainReport, GradstepError> {
    config.validate()?;

    let variable = Tensor::scalar(config.initial_value as f32);
    let target = Tensor::scalar(config.target as f32);
    let param = Arc::new(RwLock::new(Parameter::new(
        variable.clone(),
        Some("x".to_string()),
    )));
    let mut optimizer = AdamOptimizer::new(
        vec![param],
        AdamConfig {
            lr: config.learning_rate,
            ..AdamConfig::default()
        },
    )?;

    log::debug!(
        "minimizing (x - {})^2 from x = {} for {} steps, lr = {}",
        config.target,
        config.initial_value,
        config.steps,
        config.learning_rate
    );

    let mut losses = Vec::with_capacity(config.steps);
    for step in 1..=config.steps {
        optimizer.zero_grad();
        let loss = squared_distance(&variable, &target)?;
        let loss_value = loss.item()?;
        loss.backward()?;
        optimizer.step()?;
        losses.push(loss_value);

        log::trace!("step {}: loss = {}, x = {}", step, loss_value, variable.item()?);
        if step % LOG_EVERY == 0 {
            log::debug!("step {}/{}: loss = {:.6e}", step, config.steps, loss_value);
        }
    }

    let final_value = variable.item()?;
    log::debug!("final x = {}", final_value);
    Ok(TrainReport {
        variable,
        losses,
        final_value,
    })
}

#[cfg(test)]
#[path = "train_test.rs"]
mod tests;
