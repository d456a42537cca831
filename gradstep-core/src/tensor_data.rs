// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::buffer::Buffer;
use crate::error::GradstepError;
use crate::tensor::Tensor;
use crate::types::DType;

/// Internal storage and metadata for a Tensor.
///
/// Holds the typed data buffer, the shape and the autograd bookkeeping.
/// It is wrapped in `Arc<RwLock<TensorData>>` by `Tensor` so that metadata
/// such as `grad` can be updated through a shared handle.
#[derive(Debug)]
pub struct TensorData {
    /// The underlying data buffer. Elements are stored contiguously, row-major.
    pub(crate) buffer: Buffer,
    /// The data type of the elements in the buffer.
    pub(crate) dtype: DType,
    /// The shape (dimensions) of the tensor. Empty for a 0-d scalar.
    pub(crate) shape: Vec<usize>,

    /// If true, operations involving this tensor are recorded for backward.
    pub(crate) requires_grad: bool,
    /// Gradient accumulated by `backward()`, same shape and dtype as the data.
    pub(crate) grad: Option<Tensor>,
    /// The operation that produced this tensor. `None` for leaves.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp + Send + Sync>>,
}

impl TensorData {
    /// Creates a new `TensorData` from f32 data and a shape.
    ///
    /// # Errors
    /// Returns `GradstepError::TensorCreationError` if the length of `data_vec` does not match
    /// the number of elements specified by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradstepError> {
        Self::from_buffer(Buffer::F32(Arc::new(data_vec)), shape)
    }

    /// Creates a new `TensorData` from f64 data and a shape.
    pub fn new_f64(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, GradstepError> {
        Self::from_buffer(Buffer::F64(Arc::new(data_vec)), shape)
    }

    pub(crate) fn from_buffer(buffer: Buffer, shape: Vec<usize>) -> Result<Self, GradstepError> {
        let numel: usize = shape.iter().product();
        let data_len = buffer.len();
        if data_len != numel {
            return Err(GradstepError::TensorCreationError { data_len, shape });
        }
        Ok(TensorData {
            dtype: buffer.dtype(),
            buffer,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Provides immutable access to the data buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }
}
