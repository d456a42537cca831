use crate::buffer::Buffer;
use crate::error::GradstepError;
use crate::tensor::Tensor;
use std::sync::Arc;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(GradstepError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(GradstepError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(GradstepError),
    #[error("Function output must hold a single element, got shape {0:?}")]
    NonScalarOutput(Vec<usize>),
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly.")]
    RequiresGradPropagationError,
}

impl From<GradstepError> for GradCheckError {
    fn from(err: GradstepError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against numerical gradients using central differences.
///
/// `func` must map `inputs` to a single-element tensor. For every element of every
/// input that requires grad, the analytical gradient from `backward()` is compared to
/// `(f(x + eps) - f(x - eps)) / (2 * eps)`. Two values agree when they are within
/// `tolerance` absolutely or relatively.
///
/// The gradients of `inputs` are cleared before and left populated after the check.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GradstepError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.grad_fn().is_some() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.zero_grad();
    }

    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.numel() != 1 {
        return Err(GradCheckError::NonScalarOutput(output.shape()));
    }
    if inputs.iter().any(Tensor::requires_grad) {
        if !output.requires_grad() {
            return Err(GradCheckError::RequiresGradPropagationError);
        }
        output.backward().map_err(GradCheckError::BackwardPassError)?;
    }

    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }
        let analytical = original_input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .buffer()
            .to_f64_vec();
        let original_data = original_input.buffer().to_f64_vec();

        for elem_idx in 0..original_data.len() {
            let loss_plus = perturbed_loss(&func, inputs, i, &original_data, elem_idx, epsilon)?;
            let loss_minus = perturbed_loss(&func, inputs, i, &original_data, elem_idx, -epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical_grad = analytical[elem_idx];
            if !approx::relative_eq!(
                analytical_grad,
                numerical_grad,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference: (analytical_grad - numerical_grad).abs(),
                });
            }
        }
    }

    log::debug!("check_grad passed for {} input(s)", inputs.len());
    Ok(())
}

/// Evaluates `func` with element `elem_idx` of input `input_index` shifted by `delta`.
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    original_data: &[f64],
    elem_idx: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, GradstepError>,
{
    let original = &inputs[input_index];
    let mut data = original_data.to_vec();
    data[elem_idx] += delta;
    let buffer = match original.buffer() {
        Buffer::F32(_) => Buffer::F32(Arc::new(data.iter().map(|&x| x as f32).collect())),
        Buffer::F64(_) => Buffer::F64(Arc::new(data)),
    };
    // The perturbed copy is a fresh leaf without grad tracking.
    let perturbed = Tensor::from_buffer(buffer, original.shape())?;

    let mut shifted_inputs = inputs.to_vec();
    shifted_inputs[input_index] = perturbed;
    let output = func(&shifted_inputs).map_err(GradCheckError::ForwardPassError)?;
    Ok(output.item()?)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
