use crate::autograd::backward_op::BackwardOp;
use crate::error::GradstepError;
use crate::ops::apply_binary_op;
use crate::ops::arithmetic::neg::neg_op;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward operation context for subtraction.
#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradstepError> {
        let grad_a = grad_output.reduce_to_shape(&self.a_shape)?;
        let grad_b = neg_op(grad_output)?.reduce_to_shape(&self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "SubBackward0"
    }
}

/// Element-wise subtraction (`a - b`) with single-element broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradstepError> {
    apply_binary_op(
        a,
        b,
        |x, y| x - y,
        |x, y| x - y,
        || {
            Arc::new(SubBackward {
                a: a.clone(),
                b: b.clone(),
                a_shape: a.shape(),
                b_shape: b.shape(),
            })
        },
        "sub_op",
    )
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
