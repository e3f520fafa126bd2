//! Error types for the calorie estimator

use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Guidance shown when protein and fat leave no room for carbohydrate
pub const MACRO_OVERFLOW_GUIDANCE: &str = "reduce protein/fat ratio";

/// Protein and fat calories alone exceed the daily target
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
#[error(
    "protein ({protein_kcal:.0} kcal) and fat ({fat_kcal:.0} kcal) exceed the {target_kcal:.0} kcal target; reduce protein/fat ratio"
)]
pub struct MacroOverflowError {
    pub protein_kcal: f64,
    pub fat_kcal: f64,
    pub target_kcal: f64,
}

impl MacroOverflowError {
    /// How far protein + fat overshoot the target
    pub fn excess_kcal(&self) -> f64 {
        self.protein_kcal + self.fat_kcal - self.target_kcal
    }
}

/// Errors returned by an estimate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Macro overflow: {0}")]
    MacroOverflow(#[from] MacroOverflowError),
}

impl EstimationError {
    /// Stable machine-readable code for transports
    pub fn code(&self) -> &'static str {
        match self {
            EstimationError::Validation(_) => "VALIDATION_ERROR",
            EstimationError::MacroOverflow(_) => "MACRO_OVERFLOW",
        }
    }

    /// The offending field, for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            EstimationError::Validation(e) => Some(&e.field),
            EstimationError::MacroOverflow(_) => None,
        }
    }
}
