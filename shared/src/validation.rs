//! Input validation functions
//!
//! Every check reports the offending field by its technical name together
//! with a short reason, so callers can re-prompt for exactly that field.
//! Invalid values are rejected, never clamped.

use crate::models::InputProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.reason)
    }
}

/// Value must be a finite number
pub fn validate_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a finite number"));
    }
    Ok(())
}

/// Value must be finite and strictly greater than zero
pub fn validate_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::new(field, "must be positive"));
    }
    Ok(())
}

/// Value must be finite and zero or greater
pub fn validate_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::new(field, "must not be negative"));
    }
    Ok(())
}

/// Value must lie in the half-open range [0, 1)
pub fn validate_fraction(field: &str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if !(0.0..1.0).contains(&value) {
        return Err(ValidationError::new(field, "must be in the range [0, 1)"));
    }
    Ok(())
}

/// Validate every field of a profile, stopping at the first violation
///
/// The timeframe is only checked when there is a weight-change goal; a
/// maintenance profile may carry any timeframe, including zero.
pub fn validate_profile(profile: &InputProfile) -> Result<(), ValidationError> {
    validate_positive("weight_kg", profile.weight_kg)?;
    validate_positive("height_cm", profile.height_cm)?;
    if profile.age_years == 0 {
        return Err(ValidationError::new("age_years", "must be positive"));
    }
    validate_finite("goal_weight_change_kg", profile.goal_weight_change_kg)?;
    if profile.goal_weight_change_kg != 0.0 {
        validate_positive("timeframe_weeks", profile.timeframe_weeks)?;
    }
    validate_non_negative("protein_g_per_kg", profile.protein_g_per_kg)?;
    validate_fraction("fat_fraction_of_kcal", profile.fat_fraction_of_kcal)?;
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "sex" => "Sex",
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "age_years" => "Age",
        "units" => "Units",
        "activity_level" => "Activity Level",
        "body_type" => "Body Type",
        "goal_weight_change" | "goal_weight_change_kg" => "Goal Weight Change",
        "timeframe_weeks" => "Timeframe",
        "protein_g_per_kg" => "Protein per kg",
        "fat_fraction_of_kcal" => "Fat Share of Calories",
        _ => field_name,
    }
}
