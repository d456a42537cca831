use crate::autograd::backward_op::BackwardOp;
use crate::error::GradstepError;
use crate::ops::arithmetic::mul::mul_op;
use crate::ops::{apply_unary_op, map_elements};
use crate::tensor::Tensor;
use num_traits::Float;
use std::sync::Arc;

#[derive(Debug)]
struct PowBackward {
    input: Tensor,
    exponent: f64,
}

impl BackwardOp for PowBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradstepError> {
        let n = self.exponent;
        let local_grad = map_elements(
            &self.input,
            |x| pow_derivative(x, n as f32),
            |x| pow_derivative(x, n),
        )?;
        Ok(vec![mul_op(grad_output, &local_grad)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "PowBackward0"
    }
}

// d(x^n)/dx = n * x^(n-1)
fn pow_derivative<T: Float>(x: T, n: T) -> T {
    n * x.powf(n - T::one())
}

/// Raises each element of the tensor to the power of the scalar `exponent`.
///
/// The exponent is a plain number, so only the base receives a gradient.
/// For F32 tensors it is narrowed to `f32`.
pub fn pow_scalar_op(base: &Tensor, exponent: f64) -> Result<Tensor, GradstepError> {
    apply_unary_op(
        base,
        |x| x.powf(exponent as f32),
        |x| x.powf(exponent),
        || {
            Arc::new(PowBackward {
                input: base.clone(),
                exponent,
            })
        },
    )
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
