use crate::error::GradstepError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` (an output computed from inputs that
/// require gradients) attaches an implementation of this trait to the output's `grad_fn`.
/// `Tensor::backward()` calls it to propagate gradients according to the chain rule.
///
/// The `Debug + Send + Sync` bounds let the `Arc<dyn BackwardOp>` live inside a
/// `Tensor`, which is itself shareable across threads.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes the gradients of the operation's inputs with respect to the loss,
    /// given the gradient of the operation's output (`dL/dOutput`).
    ///
    /// # Returns
    /// One gradient per input, in exactly the order returned by [`BackwardOp::inputs`].
    /// Each gradient has the shape and dtype of the corresponding input.
    ///
    /// Implementations must not record new graph nodes: compute with detached
    /// copies of any saved tensor that requires grad.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradstepError>;

    /// Returns handles to the input tensors that participated in the forward operation.
    ///
    /// These are the edges the graph traversal follows from this node to its predecessors.
    fn inputs(&self) -> Vec<Tensor>;

    /// Node name shown in a tensor's `grad_fn=<...>`, e.g. `"MulBackward0"`.
    fn name(&self) -> &'static str;
}
