//! Business logic services
//!
//! Services sit between the HTTP handlers and the estimation engine.

pub mod estimation;

pub use estimation::EstimationService;
