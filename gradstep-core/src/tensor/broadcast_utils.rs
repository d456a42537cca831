use crate::{buffer::Buffer, error::GradstepError, tensor::Tensor};
use num_traits::Float;
use std::sync::Arc;

/// Computes the output shape of a binary element-wise operation.
///
/// Supported combinations are identical shapes, or one operand holding a single
/// element whose rank does not exceed the other operand's rank.
///
/// # Errors
/// `BroadcastError` for any other pair of shapes.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, GradstepError> {
    let numel_a: usize = shape_a.iter().product();
    let numel_b: usize = shape_b.iter().product();

    if shape_a == shape_b {
        Ok(shape_a.to_vec())
    } else if numel_a == 1 && shape_a.len() <= shape_b.len() {
        Ok(shape_b.to_vec())
    } else if numel_b == 1 && shape_b.len() <= shape_a.len() {
        Ok(shape_a.to_vec())
    } else {
        Err(GradstepError::BroadcastError {
            shape1: shape_a.to_vec(),
            shape2: shape_b.to_vec(),
        })
    }
}

impl Tensor {
    /// Reduces the tensor (gradient) to match a target shape by summing broadcast elements.
    ///
    /// The inverse of [`broadcast_shapes`] for the backward pass of binary ops: an
    /// operand that was repeated receives the sum of the output gradient.
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, GradstepError> {
        let current_shape = self.shape();
        if current_shape == target_shape {
            return Ok(self.clone());
        }

        let target_numel: usize = target_shape.iter().product();
        if target_numel != 1 {
            return Err(GradstepError::ShapeMismatch {
                expected: target_shape.to_vec(),
                actual: current_shape,
                operation: "reduce_to_shape".to_string(),
            });
        }

        let reduced = match self.buffer() {
            Buffer::F32(data) => Buffer::F32(Arc::new(vec![sum_kernel(&data)])),
            Buffer::F64(data) => Buffer::F64(Arc::new(vec![sum_kernel(&data)])),
        };
        Tensor::from_buffer(reduced, target_shape.to_vec())
    }
}

fn sum_kernel<T: Float>(data: &[T]) -> T {
    data.iter().fold(T::zero(), |acc, &x| acc + x)
}

#[cfg(test)]
#[path = "broadcast_utils_test.rs"]
mod tests;
