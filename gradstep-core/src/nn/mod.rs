// src/nn/mod.rs

pub mod parameter;

pub use parameter::Parameter;
