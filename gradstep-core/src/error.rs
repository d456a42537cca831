use crate::types::DType;
use thiserror::Error;

/// Custom error type for the gradstep framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum GradstepError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Data type mismatch for operation '{operation}': expected {expected:?}, got {actual:?}")]
    DataTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("requires_grad can only be changed on leaf tensors.")]
    RequiresGradOnNonLeaf,

    #[error("Backward called on non-scalar tensor without explicit gradient.")]
    BackwardNonScalar,

    #[error("Backward pass failed: {0}")]
    BackwardError(String),

    #[error("In-place operation '{operation}' is not allowed: {reason}")]
    InplaceModificationError { operation: String, reason: String },

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Arithmetic error: {0}")]
    ArithmeticError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,
}
