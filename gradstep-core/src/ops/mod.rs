//! # Tensor Operations Module (`ops`)
//!
//! Differentiable operations, grouped by functionality.
//!
//! - **`_op` Functions:** each operation has a core function (`add_op`, `pow_scalar_op`, ...)
//!   that performs the forward computation and attaches the backward node when any
//!   input requires grad.
//! - **`Backward` Structs:** each operation has a struct (e.g. `AddBackward`) implementing
//!   [`BackwardOp`](crate::autograd::BackwardOp) that keeps the forward context needed by
//!   the chain rule.
//!
//! ## Submodules:
//!
//! - [`arithmetic`]: element-wise add, sub, mul, neg and scalar power.
//! - [`loss`]: loss functions built on top of the arithmetic ops.

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradstepError;
use crate::tensor::broadcast_utils::broadcast_shapes;
use crate::tensor::Tensor;
use num_traits::Float;
use std::sync::Arc;

pub mod arithmetic;
pub mod loss;

/// Applies a unary element-wise operation to a tensor.
///
/// Handles DType dispatch, output creation and autograd setup. `backward_builder` is
/// only called when the input requires grad.
pub(crate) fn apply_unary_op<F32Op, F64Op, B>(
    a: &Tensor,
    op_f32: F32Op,
    op_f64: F64Op,
    backward_builder: B,
) -> Result<Tensor, GradstepError>
where
    F32Op: Fn(f32) -> f32,
    F64Op: Fn(f64) -> f64,
    B: FnOnce() -> Arc<dyn BackwardOp + Send + Sync>,
{
    let output = map_elements(a, op_f32, op_f64)?;
    if a.requires_grad() {
        output.set_grad_fn(backward_builder());
    }
    Ok(output)
}

/// Applies an element-wise function without recording anything for autograd.
pub(crate) fn map_elements<F32Op, F64Op>(
    a: &Tensor,
    op_f32: F32Op,
    op_f64: F64Op,
) -> Result<Tensor, GradstepError>
where
    F32Op: Fn(f32) -> f32,
    F64Op: Fn(f64) -> f64,
{
    let (buffer, shape) = {
        let guard = a.read_data();
        (guard.buffer.clone(), guard.shape.clone())
    };
    let output_buffer = match buffer {
        Buffer::F32(data) => Buffer::F32(Arc::new(map_kernel(&data, op_f32))),
        Buffer::F64(data) => Buffer::F64(Arc::new(map_kernel(&data, op_f64))),
    };
    Tensor::from_buffer(output_buffer, shape)
}

/// Applies a binary element-wise operation with single-element broadcasting.
///
/// # Errors
/// * `DataTypeMismatch` if the operands have different dtypes.
/// * `BroadcastError` if the shapes are neither equal nor broadcastable.
pub(crate) fn apply_binary_op<F32Op, F64Op, B>(
    a: &Tensor,
    b: &Tensor,
    op_f32: F32Op,
    op_f64: F64Op,
    backward_builder: B,
    op_name: &str,
) -> Result<Tensor, GradstepError>
where
    F32Op: Fn(f32, f32) -> f32,
    F64Op: Fn(f64, f64) -> f64,
    B: FnOnce() -> Arc<dyn BackwardOp + Send + Sync>,
{
    // Guards are released one at a time so `a` and `b` may be the same tensor.
    let (a_buffer, a_shape, a_requires_grad) = {
        let guard = a.read_data();
        (guard.buffer.clone(), guard.shape.clone(), guard.requires_grad)
    };
    let (b_buffer, b_shape, b_requires_grad) = {
        let guard = b.read_data();
        (guard.buffer.clone(), guard.shape.clone(), guard.requires_grad)
    };

    let output_shape = broadcast_shapes(&a_shape, &b_shape)?;
    let numel: usize = output_shape.iter().product();

    let output_buffer = match (&a_buffer, &b_buffer) {
        (Buffer::F32(x), Buffer::F32(y)) => {
            Buffer::F32(Arc::new(broadcast_kernel(x, y, numel, op_f32)))
        }
        (Buffer::F64(x), Buffer::F64(y)) => {
            Buffer::F64(Arc::new(broadcast_kernel(x, y, numel, op_f64)))
        }
        _ => {
            return Err(GradstepError::DataTypeMismatch {
                expected: a_buffer.dtype(),
                actual: b_buffer.dtype(),
                operation: op_name.to_string(),
            })
        }
    };
    let output = Tensor::from_buffer(output_buffer, output_shape)?;

    if a_requires_grad || b_requires_grad {
        output.set_grad_fn(backward_builder());
    }
    Ok(output)
}

fn map_kernel<T: Float, F: Fn(T) -> T>(data: &[T], op: F) -> Vec<T> {
    data.iter().map(|&x| op(x)).collect()
}

// A single-element operand is repeated across the output.
fn broadcast_kernel<T: Float, F: Fn(T, T) -> T>(a: &[T], b: &[T], numel: usize, op: F) -> Vec<T> {
    let pick = |data: &[T], i: usize| if data.len() == 1 { data[0] } else { data[i] };
    (0..numel).map(|i| op(pick(a, i), pick(b, i))).collect()
}
