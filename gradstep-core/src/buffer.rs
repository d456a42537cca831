use std::fmt::Debug;
use std::sync::Arc;

use crate::error::GradstepError;
use crate::types::DType;

/// Typed CPU storage shared between a tensor and its detached views.
///
/// The inner vectors are never mutated through a shared `Arc`; in-place
/// updates go through `Arc::make_mut`, which copies when the storage is shared.
#[derive(Debug, Clone)]
pub enum Buffer {
    /// Buffer holding f32 data.
    F32(Arc<Vec<f32>>),
    /// Buffer holding f64 data.
    F64(Arc<Vec<f64>>),
}

impl Buffer {
    /// Data type of the stored elements.
    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Buffer::F32(data) => data.len(),
            Buffer::F64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f32>>`.
    ///
    /// Returns an error if the buffer holds another data type.
    pub fn try_get_cpu_f32(&self) -> Result<&Arc<Vec<f32>>, GradstepError> {
        match self {
            Buffer::F32(data_arc) => Ok(data_arc),
            other => Err(GradstepError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "try_get_cpu_f32".to_string(),
            }),
        }
    }

    /// Attempts to get a reference to the underlying `Arc<Vec<f64>>`.
    pub fn try_get_cpu_f64(&self) -> Result<&Arc<Vec<f64>>, GradstepError> {
        match self {
            Buffer::F64(data_arc) => Ok(data_arc),
            other => Err(GradstepError::DataTypeMismatch {
                expected: DType::F64,
                actual: other.dtype(),
                operation: "try_get_cpu_f64".to_string(),
            }),
        }
    }

    /// Reads every element widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Buffer::F32(data) => data.iter().map(|&x| x as f64).collect(),
            Buffer::F64(data) => data.to_vec(),
        }
    }
}
