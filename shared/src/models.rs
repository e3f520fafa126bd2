//! Estimator input and output records

use crate::constants::{DEFAULT_FAT_FRACTION_OF_KCAL, DEFAULT_PROTEIN_G_PER_KG};
use crate::health_metrics::{ActivityLevel, BiologicalSex, BodyType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the estimator needs for one calculation (metric units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputProfile {
    pub sex: BiologicalSex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub activity_level: ActivityLevel,
    pub body_type: BodyType,
    /// Negative = loss, positive = gain, zero = maintenance
    pub goal_weight_change_kg: f64,
    /// Only consulted when `goal_weight_change_kg` is non-zero
    pub timeframe_weeks: f64,
    pub protein_g_per_kg: f64,
    pub fat_fraction_of_kcal: f64,
}

impl InputProfile {
    /// A maintenance profile with the default macro parameters
    pub fn new(
        sex: BiologicalSex,
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        activity_level: ActivityLevel,
        body_type: BodyType,
    ) -> Self {
        Self {
            sex,
            weight_kg,
            height_cm,
            age_years,
            activity_level,
            body_type,
            goal_weight_change_kg: 0.0,
            timeframe_weeks: 0.0,
            protein_g_per_kg: DEFAULT_PROTEIN_G_PER_KG,
            fat_fraction_of_kcal: DEFAULT_FAT_FRACTION_OF_KCAL,
        }
    }

    pub fn with_goal(mut self, weight_change_kg: f64, timeframe_weeks: f64) -> Self {
        self.goal_weight_change_kg = weight_change_kg;
        self.timeframe_weeks = timeframe_weeks;
        self
    }

    pub fn with_macros(mut self, protein_g_per_kg: f64, fat_fraction_of_kcal: f64) -> Self {
        self.protein_g_per_kg = protein_g_per_kg;
        self.fat_fraction_of_kcal = fat_fraction_of_kcal;
        self
    }

    pub fn goal_kind(&self) -> GoalKind {
        GoalKind::from_weight_change(self.goal_weight_change_kg)
    }
}

/// Direction of the weight-change goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Lose,
    Maintain,
    Gain,
}

impl GoalKind {
    pub fn from_weight_change(kg: f64) -> Self {
        if kg < 0.0 {
            GoalKind::Lose
        } else if kg > 0.0 {
            GoalKind::Gain
        } else {
            GoalKind::Maintain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::Lose => "lose",
            GoalKind::Maintain => "maintain",
            GoalKind::Gain => "gain",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protein, fat and carbohydrate targets
///
/// Carbohydrate is the remainder, so the three calorie figures always sum to
/// the target they were split from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_g: f64,
    pub protein_kcal: f64,
    pub fat_g: f64,
    pub fat_kcal: f64,
    pub carb_g: f64,
    pub carb_kcal: f64,
}

impl MacroBreakdown {
    pub fn total_kcal(&self) -> f64 {
        self.protein_kcal + self.fat_kcal + self.carb_kcal
    }
}

/// Result of one estimate, with every intermediate figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Basal metabolic rate (Mifflin-St Jeor)
    pub bmr_kcal: f64,
    pub activity_multiplier: f64,
    /// BMR × activity multiplier
    pub tdee_kcal: f64,
    pub body_type_pct: f64,
    pub body_type_adjusted_kcal: f64,
    pub goal_kind: GoalKind,
    /// Daily surplus (positive) or deficit (negative) before the floor
    pub daily_goal_delta_kcal: f64,
    /// Effective adjustment relative to `body_type_adjusted_kcal`, after the floor
    pub goal_pct: f64,
    /// Final daily target
    pub goal_adjusted_kcal: f64,
    /// True when the target was raised to `floor_kcal`
    pub floor_applied: bool,
    pub floor_kcal: f64,
    pub macro_breakdown: MacroBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_kind_from_sign() {
        assert_eq!(GoalKind::from_weight_change(-2.0), GoalKind::Lose);
        assert_eq!(GoalKind::from_weight_change(0.0), GoalKind::Maintain);
        assert_eq!(GoalKind::from_weight_change(-0.0), GoalKind::Maintain);
        assert_eq!(GoalKind::from_weight_change(1.5), GoalKind::Gain);
    }

    #[test]
    fn test_builder_sets_goal_and_macros() {
        let p = InputProfile::new(
            BiologicalSex::Male,
            80.0,
            180.0,
            30,
            ActivityLevel::Sedentary,
            BodyType::Mesomorph,
        )
        .with_goal(-5.0, 10.0)
        .with_macros(2.0, 0.3);

        assert_eq!(p.goal_weight_change_kg, -5.0);
        assert_eq!(p.timeframe_weeks, 10.0);
        assert_eq!(p.protein_g_per_kg, 2.0);
        assert_eq!(p.fat_fraction_of_kcal, 0.3);
        assert_eq!(p.goal_kind(), GoalKind::Lose);
    }

    #[test]
    fn test_new_profile_is_maintenance_with_defaults() {
        let p = InputProfile::new(
            BiologicalSex::Female,
            60.0,
            165.0,
            40,
            ActivityLevel::LightlyActive,
            BodyType::Endomorph,
        );
        assert_eq!(p.goal_kind(), GoalKind::Maintain);
        assert_eq!(p.protein_g_per_kg, DEFAULT_PROTEIN_G_PER_KG);
        assert_eq!(p.fat_fraction_of_kcal, DEFAULT_FAT_FRACTION_OF_KCAL);
    }
}
