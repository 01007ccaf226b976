//! Error types for the nutrimodel application.

use thiserror::Error;

/// Errors that can occur during macronutrient allocation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The rounded macro split summed to zero calories, which leaves the
    /// percentage distribution undefined.
    #[error("macro split for target {target} kcal produced zero total calories")]
    ZeroCalorieTotal { target: f64 },
}
