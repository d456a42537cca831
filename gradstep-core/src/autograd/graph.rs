use crate::error::GradstepError;
use crate::tensor::Tensor;
use std::collections::HashSet;
use std::sync::Arc;

/// Stable identity of a node in the computation graph.
///
/// Derived from the address of the tensor's shared `RwLock<TensorData>`, so every
/// clone of a `Tensor` maps to the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl Tensor {
    /// Returns the graph identity of this tensor.
    pub fn node_id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.data) as *const () as usize)
    }
}

/// Sorts the graph reachable from `root` so that every node comes before its inputs.
///
/// The traversal is iterative, so deep chains of ops do not grow the call stack.
///
/// # Errors
/// `CycleDetected` if a node is reached again while it is still on the DFS path.
pub fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, GradstepError> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut on_path: HashSet<NodeId> = HashSet::new();
    let mut post_order: Vec<Tensor> = Vec::new();
    // (node, inputs already expanded)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        let id = node.node_id();
        if expanded {
            on_path.remove(&id);
            post_order.push(node);
            continue;
        }
        if visited.contains(&id) {
            continue;
        }
        visited.insert(id);
        on_path.insert(id);

        let inputs = node.grad_fn().map(|op| op.inputs()).unwrap_or_default();
        stack.push((node, true));
        for input in inputs {
            let input_id = input.node_id();
            if on_path.contains(&input_id) {
                return Err(GradstepError::CycleDetected);
            }
            if !visited.contains(&input_id) {
                stack.push((input, false));
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
