// src/optim/mod.rs

//! Optimizers updating [`Parameter`](crate::nn::Parameter)s from their gradients.
//!
//! This module provides the `Optimizer` trait, the `ParamGroup` structure used to give
//! sets of parameters their own hyperparameters, and the Adam optimizer.

pub mod adam;
pub mod optimizer_trait;
pub mod param_group;

pub use adam::{AdamConfig, AdamOptimizer};
pub use optimizer_trait::Optimizer;
pub use param_group::{ParamGroup, ParamGroupOptions};
