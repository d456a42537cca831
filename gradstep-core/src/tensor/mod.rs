// src/tensor/mod.rs

use crate::buffer::Buffer;
use crate::error::GradstepError;
use crate::tensor_data::TensorData;
use crate::types::DType;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod autograd;
mod inplace_ops;
mod traits;
pub mod create;

pub mod broadcast_utils;

pub use create::{full, full_f64, ones_like, zeros_like};

/// Represents a multi-dimensional array (tensor).
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** clones are cheap and point at the same node, which
///     is what the autograd graph and the optimizer rely on to find a parameter.
/// 2.  **Interior Mutability:** `requires_grad`, `grad` and the data buffer can be
///     updated through an immutable `Tensor` reference.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new f32 Tensor with the given data and shape.
    ///
    /// # Errors
    /// `TensorCreationError` if `data_vec.len()` does not match the shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradstepError> {
        Ok(Self::from_tensor_data(TensorData::new(data_vec, shape)?))
    }

    /// Creates a new f64 Tensor with the given data and shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradstepError> {
        Ok(Self::from_tensor_data(TensorData::new_f64(data_vec, shape)?))
    }

    /// Creates a 0-dimensional f32 tensor.
    pub fn scalar(value: f32) -> Self {
        Self::from_buffer_unchecked(Buffer::F32(Arc::new(vec![value])), Vec::new())
    }

    /// Creates a 0-dimensional f64 tensor.
    pub fn scalar_f64(value: f64) -> Self {
        Self::from_buffer_unchecked(Buffer::F64(Arc::new(vec![value])), Vec::new())
    }

    pub(crate) fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, GradstepError> {
        Ok(Self::from_tensor_data(TensorData::from_buffer(buffer, shape)?))
    }

    // Callers guarantee `buffer.len() == shape.iter().product()`.
    fn from_buffer_unchecked(buffer: Buffer, shape: Vec<usize>) -> Self {
        Self::from_tensor_data(TensorData {
            dtype: buffer.dtype(),
            buffer,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns the data type (`DType`) of the tensor elements.
    pub fn dtype(&self) -> DType {
        self.read_data().dtype
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// A poisoned lock is recovered: the guarded data is plain values that stay
    /// consistent even if a writer panicked.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires a write lock on the tensor's data.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a clone of the underlying buffer handle (no element copy).
    pub(crate) fn buffer(&self) -> Buffer {
        self.read_data().buffer.clone()
    }

    /// Copies the tensor data out as a `Vec<f32>`.
    ///
    /// # Errors
    /// `DataTypeMismatch` if the tensor is not F32.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, GradstepError> {
        let guard = self.read_data();
        let buffer_arc = guard.buffer().try_get_cpu_f32()?;
        Ok(buffer_arc.to_vec())
    }

    /// Copies the tensor data out as a `Vec<f64>`.
    pub fn get_f64_data(&self) -> Result<Vec<f64>, GradstepError> {
        let guard = self.read_data();
        let buffer_arc = guard.buffer().try_get_cpu_f64()?;
        Ok(buffer_arc.to_vec())
    }

    /// Returns the value of a single-element tensor, widened to `f64`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the tensor holds more or fewer than one element.
    pub fn item(&self) -> Result<f64, GradstepError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(GradstepError::ShapeMismatch {
                expected: Vec::new(),
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(match guard.buffer() {
            Buffer::F32(data) => data[0] as f64,
            Buffer::F64(data) => data[0],
        })
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
