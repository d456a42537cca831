use super::param_group::ParamGroup;
use crate::error::GradstepError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Parameters without a gradient are left untouched.
    fn step(&mut self) -> Result<(), GradstepError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Called before each backward pass so gradients do not accumulate across iterations.
    fn zero_grad(&mut self);

    /// Adds a new parameter group with its own hyperparameters.
    fn add_param_group(&mut self, param_group: ParamGroup);

    /// Returns the parameter groups managed by the optimizer.
    fn param_groups(&self) -> &[ParamGroup];

    /// Returns the parameter groups mutably, e.g. to change a group's learning rate.
    fn param_groups_mut(&mut self) -> &mut [ParamGroup];
}
