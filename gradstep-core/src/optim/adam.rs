use crate::buffer::Buffer;
use crate::error::GradstepError;
use crate::nn::parameter::Parameter;
use crate::optim::{Optimizer, ParamGroup, ParamGroupOptions};
use crate::tensor::Tensor;
use crate::types::DType;
use num_traits::{Float, NumCast};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Hyperparameters of [`AdamOptimizer`]. Also the fallback for unset group options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    pub betas: (f64, f64),
    pub eps: f64,
    pub weight_decay: f64,
    pub amsgrad: bool,
    pub maximize: bool,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 1e-3,
            betas: (0.9, 0.999),
            eps: 1e-8,
            weight_decay: 0.0,
            amsgrad: false,
            maximize: false,
        }
    }
}

impl AdamConfig {
    /// # Errors
    /// `ConfigurationError` naming the first invalid hyperparameter.
    pub fn validate(&self) -> Result<(), GradstepError> {
        let (beta1, beta2) = self.betas;
        if self.lr.is_nan() || self.lr <= 0.0 {
            return Err(GradstepError::ConfigurationError(format!(
                "Learning rate must be positive, got {}",
                self.lr
            )));
        }
        if !(0.0..1.0).contains(&beta1) {
            return Err(GradstepError::ConfigurationError(format!(
                "Beta1 must be in [0, 1), got {}",
                beta1
            )));
        }
        if !(0.0..1.0).contains(&beta2) {
            return Err(GradstepError::ConfigurationError(format!(
                "Beta2 must be in [0, 1), got {}",
                beta2
            )));
        }
        if self.eps.is_nan() || self.eps <= 0.0 {
            return Err(GradstepError::ConfigurationError(format!(
                "Epsilon must be positive, got {}",
                self.eps
            )));
        }
        if self.weight_decay.is_nan() || self.weight_decay < 0.0 {
            return Err(GradstepError::ConfigurationError(format!(
                "Weight decay must be non-negative, got {}",
                self.weight_decay
            )));
        }
        Ok(())
    }

    /// Applies a group's overrides on top of these defaults.
    fn with_overrides(&self, options: &ParamGroupOptions) -> AdamConfig {
        AdamConfig {
            lr: options.lr.unwrap_or(self.lr),
            betas: options.betas.unwrap_or(self.betas),
            eps: options.eps.unwrap_or(self.eps),
            weight_decay: options.weight_decay.unwrap_or(self.weight_decay),
            amsgrad: options.amsgrad.unwrap_or(self.amsgrad),
            maximize: options.maximize.unwrap_or(self.maximize),
        }
    }
}

/// Represents the state for a single parameter in the Adam optimizer.
#[derive(Default, Clone, Debug)]
pub struct AdamParamState {
    /// First moment vector (exponential moving average of gradients).
    pub m: Option<Tensor>,
    /// Second moment vector (exponential moving average of squared gradients).
    pub v: Option<Tensor>,
    /// Running maximum of `v` (AMSGrad only).
    pub v_max: Option<Tensor>,
    /// Number of updates applied to this parameter.
    pub step: u64,
}

/// Adam optimizer, with optional L2 weight decay, AMSGrad and maximization.
#[derive(Debug)]
pub struct AdamOptimizer {
    param_groups: Vec<ParamGroup>,
    defaults: AdamConfig,
    state: HashMap<usize, AdamParamState>,
}

impl AdamOptimizer {
    /// Creates an optimizer with one parameter group using `config`.
    ///
    /// # Errors
    /// `ConfigurationError` if `config` fails [`AdamConfig::validate`].
    pub fn new(
        params: Vec<Arc<RwLock<Parameter>>>,
        config: AdamConfig,
    ) -> Result<Self, GradstepError> {
        config.validate()?;
        log::debug!(
            "Adam: {} parameter(s), lr={}, betas={:?}, eps={}",
            params.len(),
            config.lr,
            config.betas,
            config.eps
        );
        Ok(AdamOptimizer {
            param_groups: vec![ParamGroup::new(params)],
            defaults: config,
            state: HashMap::new(),
        })
    }

    pub fn defaults(&self) -> &AdamConfig {
        &self.defaults
    }

    /// Returns the moments kept for `param`, if it has been updated at least once.
    pub fn param_state(&self, param: &Arc<RwLock<Parameter>>) -> Option<&AdamParamState> {
        self.state.get(&state_key(param))
    }
}

impl Optimizer for AdamOptimizer {
    fn step(&mut self) -> Result<(), GradstepError> {
        for group in &self.param_groups {
            let config = self.defaults.with_overrides(&group.options);
            config.validate()?;

            for param_arc in &group.params {
                let param = param_arc.read().map_err(|e| GradstepError::LockError {
                    lock_type: "read".to_string(),
                    reason: format!("Parameter lock poisoned: {}", e),
                })?;
                let Some(grad) = param.grad() else {
                    continue;
                };

                let state = self.state.entry(state_key(param_arc)).or_default();
                state.step += 1;
                let update = match param.dtype() {
                    DType::F32 => adam_update::<f32>(param.tensor(), &grad, state, &config)?,
                    DType::F64 => adam_update::<f64>(param.tensor(), &grad, state, &config)?,
                };
                param.tensor().sub_unchecked_(&update)?;

                log::trace!(
                    "Adam step {} on {}",
                    state.step,
                    param.name().unwrap_or("unnamed parameter")
                );
            }
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for group in &self.param_groups {
            for param_arc in &group.params {
                match param_arc.read() {
                    Ok(param) => param.zero_grad(),
                    Err(_) => log::warn!("Could not lock parameter to zero_grad."),
                }
            }
        }
    }

    fn add_param_group(&mut self, param_group: ParamGroup) {
        log::debug!(
            "Adam: added a group of {} parameter(s)",
            param_group.params.len()
        );
        self.param_groups.push(param_group);
    }

    fn param_groups(&self) -> &[ParamGroup] {
        &self.param_groups
    }

    fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
        &mut self.param_groups
    }
}

fn state_key(param: &Arc<RwLock<Parameter>>) -> usize {
    Arc::as_ptr(param) as *const () as usize
}

/// Float element types the optimizer state can be stored in.
trait StateElement: Float {
    fn slice(buffer: &Buffer) -> Result<&Arc<Vec<Self>>, GradstepError>;
    fn into_buffer(data: Vec<Self>) -> Buffer;
}

impl StateElement for f32 {
    fn slice(buffer: &Buffer) -> Result<&Arc<Vec<f32>>, GradstepError> {
        buffer.try_get_cpu_f32()
    }

    fn into_buffer(data: Vec<f32>) -> Buffer {
        Buffer::F32(Arc::new(data))
    }
}

impl StateElement for f64 {
    fn slice(buffer: &Buffer) -> Result<&Arc<Vec<f64>>, GradstepError> {
        buffer.try_get_cpu_f64()
    }

    fn into_buffer(data: Vec<f64>) -> Buffer {
        Buffer::F64(Arc::new(data))
    }
}

/// Advances the moments in `state` and returns the amount to subtract from `param`.
fn adam_update<T: StateElement>(
    param: &Tensor,
    grad: &Tensor,
    state: &mut AdamParamState,
    config: &AdamConfig,
) -> Result<Tensor, GradstepError> {
    let shape = param.shape();
    if grad.shape() != shape {
        return Err(GradstepError::ShapeMismatch {
            expected: shape,
            actual: grad.shape(),
            operation: "Adam step".to_string(),
        });
    }
    let param_buffer = param.buffer();
    let grad_buffer = grad.buffer();
    let p = T::slice(&param_buffer)?;
    let g = T::slice(&grad_buffer)?;

    let mut m = load_moment::<T>(&state.m, p.len())?;
    let mut v = load_moment::<T>(&state.v, p.len())?;
    let mut v_max = if config.amsgrad {
        Some(load_moment::<T>(&state.v_max, p.len())?)
    } else {
        None
    };

    let update = adam_kernel(p, g, &mut m, &mut v, v_max.as_deref_mut(), state.step, config)?;

    state.m = Some(Tensor::from_buffer(T::into_buffer(m), shape.clone())?);
    state.v = Some(Tensor::from_buffer(T::into_buffer(v), shape.clone())?);
    if let Some(v_max) = v_max {
        state.v_max = Some(Tensor::from_buffer(T::into_buffer(v_max), shape.clone())?);
    }
    Tensor::from_buffer(T::into_buffer(update), shape)
}

fn load_moment<T: StateElement>(moment: &Option<Tensor>, len: usize) -> Result<Vec<T>, GradstepError> {
    match moment {
        Some(tensor) => Ok(T::slice(&tensor.buffer())?.to_vec()),
        None => Ok(vec![T::zero(); len]),
    }
}

// p -= (lr / bc1) * m / (sqrt(v) / sqrt(bc2) + eps)
fn adam_kernel<T: Float>(
    param: &[T],
    grad: &[T],
    m: &mut [T],
    v: &mut [T],
    mut v_max: Option<&mut [T]>,
    step: u64,
    config: &AdamConfig,
) -> Result<Vec<T>, GradstepError> {
    let cast = |x: f64| {
        <T as NumCast>::from(x).ok_or_else(|| {
            GradstepError::ArithmeticError(format!("{} is not representable in the parameter dtype", x))
        })
    };
    let t = i32::try_from(step)
        .map_err(|_| GradstepError::ArithmeticError(format!("step count {} overflows", step)))?;
    let (beta1, beta2) = config.betas;
    let bias_correction1 = 1.0 - beta1.powi(t);
    let bias_correction2 = 1.0 - beta2.powi(t);

    let step_size = cast(config.lr / bias_correction1)?;
    let bias_correction2_sqrt = cast(bias_correction2.sqrt())?;
    let (b1, one_minus_b1) = (cast(beta1)?, cast(1.0 - beta1)?);
    let (b2, one_minus_b2) = (cast(beta2)?, cast(1.0 - beta2)?);
    let eps = cast(config.eps)?;
    let weight_decay = cast(config.weight_decay)?;

    let mut update = Vec::with_capacity(param.len());
    for i in 0..param.len() {
        let mut g = if config.maximize { -grad[i] } else { grad[i] };
        if config.weight_decay != 0.0 {
            g = g + weight_decay * param[i];
        }
        m[i] = b1 * m[i] + one_minus_b1 * g;
        v[i] = b2 * v[i] + one_minus_b2 * g * g;
        let second_moment = match v_max.as_deref_mut() {
            Some(v_max) => {
                v_max[i] = v_max[i].max(v[i]);
                v_max[i]
            }
            None => v[i],
        };
        let denom = second_moment.sqrt() / bias_correction2_sqrt + eps;
        update.push(step_size * m[i] / denom);
    }
    Ok(update)
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
