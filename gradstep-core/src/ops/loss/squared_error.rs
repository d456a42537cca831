use crate::error::GradstepError;
use crate::ops::arithmetic::{pow_scalar_op, sub_op};
use crate::tensor::Tensor;

/// Element-wise squared difference `(input - target)^2`.
///
/// Non-negative everywhere and zero exactly where `input == target`. The gradient
/// with respect to `input` is `2 * (input - target)`; `target` only receives a
/// gradient if it requires one.
pub fn squared_error_op(input: &Tensor, target: &Tensor) -> Result<Tensor, GradstepError> {
    let diff = sub_op(input, target)?;
    pow_scalar_op(&diff, 2.0)
}

#[cfg(test)]
#[path = "squared_error_test.rs"]
mod tests;
