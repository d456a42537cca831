use crate::autograd::backward_op::BackwardOp;
use crate::error::GradstepError;
use crate::ops::apply_unary_op;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct NegBackward {
    input: Tensor,
}

impl BackwardOp for NegBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradstepError> {
        Ok(vec![neg_op(grad_output)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "NegBackward0"
    }
}

/// Element-wise negation.
pub fn neg_op(a: &Tensor) -> Result<Tensor, GradstepError> {
    apply_unary_op(
        a,
        |x| -x,
        |x| -x,
        || Arc::new(NegBackward { input: a.clone() }),
    )
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
