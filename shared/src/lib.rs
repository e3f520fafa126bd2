//! Calorie Calculator Shared Library
//!
//! The calorie estimation engine plus the request/response types shared by
//! the HTTP backend and the WASM bindings.
//!
//! The engine is a pure, synchronous pipeline:
//! BMR → TDEE → body-type nudge → goal adjustment → safety floor → macro split.

pub mod breakdown;
pub mod constants;
pub mod errors;
pub mod estimator;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use breakdown::{Breakdown, BreakdownLine};
pub use constants::{EstimationConstants, MacroDefaults};
pub use errors::*;
pub use estimator::{estimate, Estimator};
pub use health_metrics::{ActivityLevel, BiologicalSex, BodyType};
pub use models::{EstimationResult, GoalKind, InputProfile, MacroBreakdown};
pub use types::*;
pub use units::*;
pub use validation::ValidationError;
