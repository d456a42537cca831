use crate::nn::parameter::Parameter;
use std::sync::{Arc, RwLock};

/// Defines a group of parameters with specific optimizer hyperparameters.
///
/// This allows applying different settings (like learning rate or weight decay)
/// to different parameters driven by the same optimizer.
#[derive(Clone, Debug)]
pub struct ParamGroup {
    /// The parameters included in this group, shared with the caller.
    pub params: Vec<Arc<RwLock<Parameter>>>,

    /// Specific options/hyperparameters for this group.
    pub options: ParamGroupOptions,
}

/// Per-group overrides. `None` falls back to the optimizer's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamGroupOptions {
    pub lr: Option<f64>,
    pub betas: Option<(f64, f64)>,
    pub eps: Option<f64>,
    pub weight_decay: Option<f64>,
    pub amsgrad: Option<bool>,
    pub maximize: Option<bool>,
}

impl ParamGroup {
    /// Creates a new parameter group with no overrides.
    pub fn new(params: Vec<Arc<RwLock<Parameter>>>) -> Self {
        ParamGroup {
            params,
            options: ParamGroupOptions::default(),
        }
    }

    pub fn set_lr(&mut self, lr: f64) {
        self.options.lr = Some(lr);
    }

    pub fn get_lr(&self) -> Option<f64> {
        self.options.lr
    }
}
