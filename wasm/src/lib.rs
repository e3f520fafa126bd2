//! Calorie Calculator WASM Module
//!
//! This crate provides WebAssembly bindings so a browser form can run the
//! estimator locally. Payloads use the same JSON contract as the HTTP API.

use calorie_calc_shared::health_metrics::calculate_bmr_mifflin;
use calorie_calc_shared::{
    ActivityLevel, BiologicalSex, ErrorResponse, EstimateRequest, EstimateResponse,
    EstimationError, Estimator, MacroDefaults,
};
use wasm_bindgen::prelude::*;

/// Run an estimate from an `EstimateRequest` JSON string
///
/// Returns `EstimateResponse` JSON, or throws an `ErrorResponse` JSON string.
#[wasm_bindgen]
pub fn estimate_json(input: &str) -> Result<String, JsValue> {
    run_estimate(input).map_err(|e| JsValue::from_str(&e))
}

/// Calculate BMR (Mifflin-St Jeor) from weight (kg), height (cm) and age
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, is_male: bool) -> f64 {
    let sex = if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    };
    calculate_bmr_mifflin(weight_kg, height_cm, age_years, sex)
}

/// Default multiplier for an activity level key, if it is known
#[wasm_bindgen]
pub fn activity_multiplier(level: &str) -> Option<f64> {
    level.parse::<ActivityLevel>().ok().map(|l| l.multiplier())
}

fn run_estimate(input: &str) -> Result<String, String> {
    let request: EstimateRequest = serde_json::from_str(input)
        .map_err(|e| error_json(&ErrorResponse::new("BAD_REQUEST", e.to_string())))?;

    let result = request
        .to_profile(&MacroDefaults::default())
        .map_err(EstimationError::from)
        .and_then(|profile| Estimator::default().estimate(&profile))
        .map_err(|e| error_json(&ErrorResponse::from(&e)))?;

    serde_json::to_string(&EstimateResponse::from(result))
        .map_err(|e| error_json(&ErrorResponse::new("INTERNAL_ERROR", e.to_string())))
}

fn error_json(body: &ErrorResponse) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| body.error.message.clone())
}
