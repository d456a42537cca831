//! Scalar-friendly reverse-mode autodiff over CPU tensors, with an Adam optimizer.
//!
//! The `quadratic_descent` binary drives [`train::minimize`] with its defaults.

pub mod autograd;
pub mod buffer;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod train;
pub mod types;
#[cfg(test)]
pub(crate) mod utils;

pub use error::GradstepError;
pub use tensor::Tensor;
pub use types::DType;
// Re-export traits required by public functions/structs
pub use num_traits;
