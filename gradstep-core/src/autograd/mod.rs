//! Reverse-mode automatic differentiation.
//!
//! Every differentiable op attaches a [`BackwardOp`] to its output. `Tensor::backward`
//! sorts the recorded graph with [`graph::topological_sort`] and runs the chain rule
//! from the output back to the leaves.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
pub use graph::NodeId;
