//! Calorie estimation service
//!
//! Turns an API request into an engine profile using the configured macro
//! defaults, runs the estimator and packages the response.

use crate::config::AppConfig;
use crate::error::ApiError;
use calorie_calc_shared::{
    EstimateRequest, EstimateResponse, EstimationConstants, Estimator, MacroDefaults,
};
use tracing::info;

/// Estimation service bound to one configuration
#[derive(Debug, Clone)]
pub struct EstimationService {
    estimator: Estimator,
    defaults: MacroDefaults,
}

impl EstimationService {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let estimator = Estimator::new(config.estimation.clone())?;
        Ok(Self {
            estimator,
            defaults: config.defaults,
        })
    }

    /// Active constants, as published by the constants endpoint
    pub fn constants(&self) -> &EstimationConstants {
        self.estimator.constants()
    }

    pub fn defaults(&self) -> &MacroDefaults {
        &self.defaults
    }

    /// Estimate daily calories and macros for one request
    pub fn estimate(&self, req: &EstimateRequest) -> Result<EstimateResponse, ApiError> {
        let profile = req.to_profile(&self.defaults)?;
        let result = self.estimator.estimate(&profile)?;

        info!(
            goal_kind = %result.goal_kind,
            target_kcal = result.goal_adjusted_kcal,
            floor_applied = result.floor_applied,
            "Estimate computed"
        );

        Ok(EstimateResponse::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(json: serde_json::Value) -> EstimateRequest {
        serde_json::from_value(json).unwrap()
    }

    fn service() -> EstimationService {
        EstimationService::new(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_estimate_uses_configured_defaults() {
        let mut config = AppConfig::default();
        config.defaults.protein_g_per_kg = 2.0;
        let service = EstimationService::new(&config).unwrap();

        let response = service
            .estimate(&request(serde_json::json!({
                "sex": "male",
                "age_years": 30,
                "weight": 80.0,
                "height": 180.0,
                "activity_level": "sedentary"
            })))
            .unwrap();

        assert_eq!(response.result.goal_adjusted_kcal, 2136.0);
        assert_eq!(response.result.macro_breakdown.protein_g, 160.0);
    }

    #[rstest]
    #[case(serde_json::json!({"sex": "other", "age_years": 30, "weight": 80.0, "height": 180.0, "activity_level": "sedentary"}), "sex")]
    #[case(serde_json::json!({"sex": "male", "age_years": 30, "weight": -5.0, "height": 180.0, "activity_level": "sedentary"}), "weight_kg")]
    #[case(serde_json::json!({"sex": "male", "age_years": 30, "weight": 80.0, "height": 180.0, "activity_level": "sedentary", "goal_weight_change": -5.0}), "timeframe_weeks")]
    fn test_invalid_requests_map_to_validation(
        #[case] json: serde_json::Value,
        #[case] field: &str,
    ) {
        match service().estimate(&request(json)) {
            Err(ApiError::Validation(e)) => assert_eq!(e.field, field),
            other => panic!("expected validation error, got {:?}", other.map(|r| r.result)),
        }
    }

    #[test]
    fn test_overflow_maps_to_macro_overflow() {
        let result = service().estimate(&request(serde_json::json!({
            "sex": "male",
            "age_years": 30,
            "weight": 80.0,
            "height": 180.0,
            "activity_level": "sedentary",
            "protein_g_per_kg": 4.0,
            "fat_fraction_of_kcal": 0.5
        })));
        assert!(matches!(result, Err(ApiError::MacroOverflow(_))));
    }
}
