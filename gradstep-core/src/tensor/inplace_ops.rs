use crate::{buffer::Buffer, error::GradstepError, tensor::Tensor};
use num_traits::Float;
use std::sync::Arc;

impl Tensor {
    /// Performs in-place subtraction of another tensor from this tensor (`self -= other`).
    ///
    /// The tensor keeps its identity, so every clone of the handle observes the new
    /// values. `other` must have the same shape or hold a single element.
    ///
    /// # Errors
    /// * `InplaceModificationError` if `self` requires grad or is part of a graph.
    /// * `DataTypeMismatch` if the dtypes differ.
    /// * `BroadcastError` if `other` cannot be broadcast onto `self`'s shape.
    pub fn sub_(&self, other: &Tensor) -> Result<(), GradstepError> {
        if self.requires_grad() || !self.is_leaf() {
            return Err(GradstepError::InplaceModificationError {
                operation: "sub_".to_string(),
                reason: "tensor takes part in autograd".to_string(),
            });
        }
        self.sub_unchecked_(other)
    }

    /// `sub_` without the autograd guard, for optimizers updating leaf parameters.
    pub(crate) fn sub_unchecked_(&self, other: &Tensor) -> Result<(), GradstepError> {
        // Snapshot `other` before locking `self` for writing; they may be the same tensor.
        let (other_buffer, other_shape) = {
            let guard = other.read_data();
            (guard.buffer.clone(), guard.shape.clone())
        };

        let mut self_guard = self.write_data();
        let other_numel: usize = other_shape.iter().product();
        if other_shape != self_guard.shape && other_numel != 1 {
            return Err(GradstepError::BroadcastError {
                shape1: self_guard.shape.clone(),
                shape2: other_shape,
            });
        }

        let self_dtype = self_guard.dtype;
        match (&mut self_guard.buffer, &other_buffer) {
            (Buffer::F32(data), Buffer::F32(delta)) => {
                sub_assign_kernel(Arc::make_mut(data).as_mut_slice(), delta)
            }
            (Buffer::F64(data), Buffer::F64(delta)) => {
                sub_assign_kernel(Arc::make_mut(data).as_mut_slice(), delta)
            }
            _ => {
                return Err(GradstepError::DataTypeMismatch {
                    expected: self_dtype,
                    actual: other_buffer.dtype(),
                    operation: "in-place subtraction (sub_)".to_string(),
                })
            }
        }
        Ok(())
    }
}

// Copy-on-write: `Arc::make_mut` clones storage still shared with a detached tensor.
fn sub_assign_kernel<T: Float>(data: &mut [T], delta: &[T]) {
    if delta.len() == 1 {
        data.iter_mut().for_each(|x| *x = *x - delta[0]);
    } else {
        data.iter_mut().zip(delta).for_each(|(x, &d)| *x = *x - d);
    }
}
