use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A learnable tensor handed to an optimizer.
///
/// The wrapped tensor is always a leaf with `requires_grad` set, so `backward()`
/// accumulates into its `grad`. Cloning a `Parameter` shares the tensor.
#[derive(Clone)]
pub struct Parameter {
    pub tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps `tensor` as a parameter. A tensor produced by an operation is detached first.
    pub fn new(tensor: Tensor, name: Option<String>) -> Self {
        let tensor = if tensor.is_leaf() { tensor } else { tensor.detach() };
        tensor.write_data().requires_grad = true;
        Parameter { tensor, name }
    }

    pub fn new_unnamed(tensor: Tensor) -> Self {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn grad(&self) -> Option<Tensor> {
        self.tensor.grad()
    }

    pub fn zero_grad(&self) {
        self.tensor.zero_grad();
    }

    /// Consumes the parameter and returns the underlying tensor handle.
    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("tensor", &self.tensor)
            .finish()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
