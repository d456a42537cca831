use crate::autograd::backward_op::BackwardOp;
use crate::error::GradstepError;
use crate::ops::apply_binary_op;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward operation context for addition.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradstepError> {
        // d(a + b)/da = d(a + b)/db = 1
        let grad_a = grad_output.reduce_to_shape(&self.a_shape)?;
        let grad_b = grad_output.reduce_to_shape(&self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "AddBackward0"
    }
}

/// Element-wise addition with single-element broadcasting.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradstepError> {
    apply_binary_op(
        a,
        b,
        |x, y| x + y,
        |x, y| x + y,
        || {
            Arc::new(AddBackward {
                a: a.clone(),
                b: b.clone(),
                a_shape: a.shape(),
                b_shape: b.shape(),
            })
        },
        "add_op",
    )
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
