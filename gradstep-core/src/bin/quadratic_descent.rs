//! Minimizes `(x - 1)^2` from `x = 5` with Adam and prints the final `x`.
//!
//! Set `RUST_LOG=debug` to follow the loss every 50 steps.

use gradstep_core::train::{minimize, TrainConfig};
use gradstep_core::GradstepError;

fn main() -> Result<(), GradstepError> {
    env_logger::init();

    let report = minimize(&TrainConfig::default())?;
    println!("{}", report.variable);
    Ok(())
}
