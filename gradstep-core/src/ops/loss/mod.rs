// src/ops/loss/mod.rs

//! # Loss Functions
//!
//! Loss functions quantify the difference between a prediction and a target.
//! They are composed from the differentiable arithmetic ops, so no dedicated
//! backward node is needed.

pub mod squared_error;

pub use squared_error::squared_error_op;
