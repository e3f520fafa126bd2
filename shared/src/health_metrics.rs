//! Energy expenditure calculations
//!
//! Provides the closed selectors (sex, activity level, body type) and the
//! per-step formulas used by the estimator: Mifflin-St Jeor BMR, activity
//! scaling and the body-type nudge.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Closed Selectors**: Every selector maps to exactly one documented constant
//! 3. **Metric Only**: Inputs are kg/cm; unit conversion happens in [`crate::units`]

use crate::constants::{DEFAULT_ACTIVITY_MULTIPLIERS, DEFAULT_BODY_TYPE_ADJUSTMENTS};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Selectors
// ============================================================================

/// Biological sex for health calculations
/// Note: This is used for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(format!("must be one of: male, female (got '{}')", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[serde(alias = "light")]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    #[serde(alias = "moderate")]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    #[serde(alias = "very")]
    VeryActive,
    /// Hard training or a physical job
    #[serde(alias = "extra")]
    ExtraActive,
}

impl ActivityLevel {
    /// All levels, from least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Default activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        DEFAULT_ACTIVITY_MULTIPLIERS.get(*self)
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Hard training or physical job",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderate" | "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very" | "very_active" => Ok(ActivityLevel::VeryActive),
            "extra" | "extra_active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!(
                "must be one of: sedentary, light, moderate, very, extra (got '{}')",
                s
            )),
        }
    }
}

/// Somatotype used for the body-type nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    #[serde(alias = "ecto")]
    Ectomorph,
    #[default]
    #[serde(alias = "meso")]
    Mesomorph,
    #[serde(alias = "endo")]
    Endomorph,
}

impl BodyType {
    pub const ALL: [BodyType; 3] = [BodyType::Ectomorph, BodyType::Mesomorph, BodyType::Endomorph];

    /// Default fractional adjustment applied to TDEE (+0.05 = +5%)
    pub fn adjustment_pct(&self) -> f64 {
        DEFAULT_BODY_TYPE_ADJUSTMENTS.get(*self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Ectomorph => "ectomorph",
            BodyType::Mesomorph => "mesomorph",
            BodyType::Endomorph => "endomorph",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BodyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ectomorph" | "ecto" => Ok(BodyType::Ectomorph),
            "mesomorph" | "meso" => Ok(BodyType::Mesomorph),
            "endomorph" | "endo" => Ok(BodyType::Endomorph),
            _ => Err(format!(
                "must be one of: ectomorph, mesomorph, endomorph (got '{}')",
                s
            )),
        }
    }
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_multiplier: f64) -> f64 {
    bmr * activity_multiplier
}

/// Apply the body-type nudge: adjusted = TDEE × (1 + pct)
pub fn apply_body_type_adjustment(tdee: f64, body_type_pct: f64) -> f64 {
    tdee * (1.0 + body_type_pct)
}
