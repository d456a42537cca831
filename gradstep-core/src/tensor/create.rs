// src/tensor/create.rs

use crate::error::GradstepError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Creates a new f32 tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, GradstepError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new f64 tensor filled with `value`.
pub fn full_f64(shape: &[usize], value: f64) -> Result<Tensor, GradstepError> {
    let numel = shape.iter().product();
    Tensor::new_f64(vec![value; numel], shape.to_vec())
}

/// Creates a tensor with the shape and dtype of `tensor`, filled with `value`.
///
/// `value` is narrowed to `f32` for F32 tensors.
pub fn full_like(tensor: &Tensor, value: f64) -> Result<Tensor, GradstepError> {
    let shape = tensor.shape();
    match tensor.dtype() {
        DType::F32 => full(&shape, value as f32),
        DType::F64 => full_f64(&shape, value),
    }
}

/// Creates a zero-filled tensor with the shape and dtype of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, GradstepError> {
    full_like(tensor, 0.0)
}

/// Creates a one-filled tensor with the shape and dtype of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, GradstepError> {
    full_like(tensor, 1.0)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
