use crate::autograd::backward_op::BackwardOp;
use crate::error::GradstepError;
use crate::ops::apply_binary_op;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward operation context for multiplication.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradstepError> {
        // grad_a = grad_output * b
        let grad_a = mul_op(grad_output, &self.b.detach())?.reduce_to_shape(&self.a_shape)?;
        // grad_b = grad_output * a
        let grad_b = mul_op(grad_output, &self.a.detach())?.reduce_to_shape(&self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "MulBackward0"
    }
}

/// Element-wise multiplication with single-element broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradstepError> {
    apply_binary_op(
        a,
        b,
        |x, y| x * y,
        |x, y| x * y,
        || {
            Arc::new(MulBackward {
                a: a.clone(),
                b: b.clone(),
                a_shape: a.shape(),
                b_shape: b.shape(),
            })
        },
        "mul_op",
    )
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
