// src/tensor/autograd.rs

use crate::{
    autograd::{graph::topological_sort, BackwardOp, NodeId},
    error::GradstepError,
    ops::arithmetic::add::add_op,
    tensor::{create::ones_like, Tensor},
    tensor_data::TensorData,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

impl Tensor {
    /// Checks if the tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` if the tensor was produced by an operation.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), GradstepError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(GradstepError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Returns the gradient function (`BackwardOp`) node, if this tensor is not a leaf.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp + Send + Sync>> {
        self.read_data().grad_fn.clone()
    }

    pub(crate) fn set_grad_fn(&self, grad_fn: Arc<dyn BackwardOp + Send + Sync>) {
        let mut guard = self.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(grad_fn);
    }

    /// Returns the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Checks whether the tensor is a leaf of the graph (not produced by an operation).
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Creates a new tensor that shares the same data but is detached
    /// from the computation graph.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        let detached_data = TensorData {
            buffer: guard.buffer.clone(),
            dtype: guard.dtype,
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        };
        Tensor {
            data: Arc::new(RwLock::new(detached_data)),
        }
    }

    /// Adds `grad_to_add` to this tensor's gradient, creating it if absent.
    ///
    /// # Errors
    /// `ShapeMismatch` or `DataTypeMismatch` if the gradient does not match the tensor.
    pub fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), GradstepError> {
        let (shape, dtype) = {
            let guard = self.read_data();
            (guard.shape.clone(), guard.dtype)
        };
        if grad_to_add.dtype() != dtype {
            return Err(GradstepError::DataTypeMismatch {
                expected: dtype,
                actual: grad_to_add.dtype(),
                operation: "acc_grad".to_string(),
            });
        }
        if grad_to_add.shape() != shape {
            return Err(GradstepError::ShapeMismatch {
                expected: shape,
                actual: grad_to_add.shape(),
                operation: "acc_grad".to_string(),
            });
        }

        // The sum is computed outside the write guard; add_op reads both operands.
        let existing = self.grad();
        let new_grad = match existing {
            Some(existing_grad) => add_op(&existing_grad, &grad_to_add)?,
            None => grad_to_add.detach(),
        };
        self.write_data().grad = Some(new_grad);
        Ok(())
    }

    /// Computes the gradients of this tensor w.r.t. the graph leaves.
    ///
    /// The seed gradient is one. Gradients are summed into the `grad` of every leaf
    /// that requires grad, so calling `backward()` twice without `zero_grad()`
    /// accumulates.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not require grad.
    /// * `BackwardNonScalar` if this tensor holds more than one element.
    pub fn backward(&self) -> Result<(), GradstepError> {
        {
            let guard = self.read_data();
            if !guard.requires_grad {
                return Err(GradstepError::RequiresGradNotMet);
            }
            if guard.numel() != 1 {
                return Err(GradstepError::BackwardNonScalar);
            }
        }

        let sorted_nodes = topological_sort(self)?;
        log::trace!("backward: {} node(s) in graph", sorted_nodes.len());

        let mut grad_map: HashMap<NodeId, Tensor> = HashMap::new();
        grad_map.insert(self.node_id(), ones_like(self)?);

        for node in sorted_nodes {
            let Some(accumulated_grad) = grad_map.remove(&node.node_id()) else {
                continue;
            };

            let Some(op) = node.grad_fn() else {
                if node.requires_grad() {
                    node.acc_grad(accumulated_grad)?;
                }
                continue;
            };

            let input_grads = op.backward(&accumulated_grad)?;
            let inputs = op.inputs();
            if input_grads.len() != inputs.len() {
                return Err(GradstepError::BackwardError(format!(
                    "BackwardOp returned {} gradients, but expected {} (for op: {:?})",
                    input_grads.len(),
                    inputs.len(),
                    op
                )));
            }

            for (input, grad_to_add) in inputs.iter().zip(input_grads) {
                if !input.requires_grad() {
                    continue;
                }
                match grad_map.entry(input.node_id()) {
                    Entry::Occupied(mut entry) => {
                        let sum = add_op(entry.get(), &grad_to_add)?;
                        entry.insert(sum);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(grad_to_add);
                    }
                }
            }
        }

        Ok(())
    }

    /// Resets the gradient of this tensor to None.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }
}

#[cfg(test)]
#[path = "autograd_test.rs"]
mod tests;
