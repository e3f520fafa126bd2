//! API request and response types
//!
//! These types define the JSON contract used by the HTTP service and the
//! browser bindings. Selector fields arrive as strings and are parsed here so
//! an unknown value is reported against its field like any other invalid
//! input.

use crate::breakdown::Breakdown;
use crate::constants::{EstimationConstants, MacroDefaults};
use crate::errors::{EstimationError, MACRO_OVERFLOW_GUIDANCE};
use crate::health_metrics::{ActivityLevel, BiologicalSex, BodyType};
use crate::models::{EstimationResult, InputProfile};
use crate::units::UnitSystem;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

// ============================================================================
// Estimate Types
// ============================================================================

/// Estimate request
///
/// `weight`, `height` and `goal_weight_change` are in the units of `units`
/// (kg/cm for metric, lbs/in for imperial).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub sex: String,
    pub age_years: i64,
    pub weight: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub activity_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default)]
    pub goal_weight_change: f64,
    #[serde(default)]
    pub timeframe_weeks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_fraction_of_kcal: Option<f64>,
}

impl EstimateRequest {
    /// Parse selectors, convert units and fill macro defaults
    ///
    /// Numeric ranges are checked later by the estimator; this only rejects
    /// what cannot be represented in an [`InputProfile`] at all.
    pub fn to_profile(&self, defaults: &MacroDefaults) -> Result<InputProfile, ValidationError> {
        let sex: BiologicalSex = parse_field("sex", &self.sex)?;
        let activity_level: ActivityLevel = parse_field("activity_level", &self.activity_level)?;
        let body_type: BodyType = match &self.body_type {
            Some(raw) => parse_field("body_type", raw)?,
            None => BodyType::default(),
        };
        let units: UnitSystem = match &self.units {
            Some(raw) => parse_field("units", raw)?,
            None => UnitSystem::default(),
        };

        if self.age_years <= 0 {
            return Err(ValidationError::new("age_years", "must be positive"));
        }
        let age_years = u32::try_from(self.age_years)
            .map_err(|_| ValidationError::new("age_years", "is out of range"))?;

        let (weight_kg, height_cm) = units.to_metric(self.weight, self.height);
        let goal_weight_change_kg = units.weight_unit().to_kg(self.goal_weight_change);

        Ok(InputProfile {
            sex,
            weight_kg,
            height_cm,
            age_years,
            activity_level,
            body_type,
            goal_weight_change_kg,
            timeframe_weeks: self.timeframe_weeks,
            protein_g_per_kg: self.protein_g_per_kg.unwrap_or(defaults.protein_g_per_kg),
            fat_fraction_of_kcal: self
                .fat_fraction_of_kcal
                .unwrap_or(defaults.fat_fraction_of_kcal),
        })
    }
}

fn parse_field<T>(field: &str, raw: &str) -> Result<T, ValidationError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse::<T>()
        .map_err(|reason| ValidationError::new(field, &reason))
}

/// Estimate response: the full result plus its rendered breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub result: EstimationResult,
    pub breakdown: Breakdown,
    pub unit: String,
}

impl From<EstimationResult> for EstimateResponse {
    fn from(result: EstimationResult) -> Self {
        let breakdown = result.breakdown();
        Self {
            result,
            breakdown,
            unit: "kcal".to_string(),
        }
    }
}

/// Active constants plus the macro defaults that fill missing request fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantsResponse {
    #[serde(flatten)]
    pub constants: EstimationConstants,
    pub defaults: MacroDefaults,
}

// ============================================================================
// Error Types
// ============================================================================

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: String) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field: None,
                details: None,
            },
        }
    }
}

impl From<&EstimationError> for ErrorResponse {
    fn from(err: &EstimationError) -> Self {
        match err {
            EstimationError::Validation(e) => Self {
                error: ErrorDetail {
                    code: err.code().to_string(),
                    message: e.user_message(),
                    field: Some(e.field.clone()),
                    details: None,
                },
            },
            EstimationError::MacroOverflow(e) => Self {
                error: ErrorDetail {
                    code: err.code().to_string(),
                    message: format!(
                        "Protein and fat alone exceed the {:.0} kcal target; {}",
                        e.target_kcal, MACRO_OVERFLOW_GUIDANCE
                    ),
                    field: None,
                    details: Some(serde_json::json!({
                        "protein_kcal": e.protein_kcal,
                        "fat_kcal": e.fat_kcal,
                        "target_kcal": e.target_kcal,
                    })),
                },
            },
        }
    }
}
