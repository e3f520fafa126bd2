//! Estimation policy constants
//!
//! Every numeric parameter of the estimator lives here as a named default and
//! as a field of [`EstimationConstants`], so deployments can override them
//! through configuration without touching the pipeline. Overrides go through
//! [`EstimationConstants::validate`] before an estimator will accept them.

use crate::health_metrics::{ActivityLevel, BiologicalSex, BodyType};
use crate::validation::{validate_fraction, validate_non_negative, validate_positive, ValidationError};
use serde::{Deserialize, Serialize};

/// Energy stored per kilogram of body-mass change (kcal/kg)
pub const DEFAULT_KCAL_PER_KG: f64 = 7700.0;

/// Minimum daily target for men (kcal)
pub const DEFAULT_FLOOR_MALE_KCAL: f64 = 1500.0;

/// Minimum daily target for women (kcal)
pub const DEFAULT_FLOOR_FEMALE_KCAL: f64 = 1200.0;

/// Atwater factors (kcal per gram)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Macro parameters used when the caller does not supply them
pub const DEFAULT_PROTEIN_G_PER_KG: f64 = 1.6;
pub const DEFAULT_FAT_FRACTION_OF_KCAL: f64 = 0.25;

pub const DAYS_PER_WEEK: f64 = 7.0;

pub const DEFAULT_ACTIVITY_MULTIPLIERS: ActivityMultipliers = ActivityMultipliers {
    sedentary: 1.2,
    lightly_active: 1.375,
    moderately_active: 1.55,
    very_active: 1.725,
    extra_active: 1.9,
};

pub const DEFAULT_BODY_TYPE_ADJUSTMENTS: BodyTypeAdjustments = BodyTypeAdjustments {
    ectomorph: 0.05,
    mesomorph: 0.0,
    endomorph: -0.05,
};

/// TDEE multiplier per activity level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityMultipliers {
    pub sedentary: f64,
    pub lightly_active: f64,
    pub moderately_active: f64,
    pub very_active: f64,
    pub extra_active: f64,
}

impl ActivityMultipliers {
    pub fn get(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }
}

impl Default for ActivityMultipliers {
    fn default() -> Self {
        DEFAULT_ACTIVITY_MULTIPLIERS
    }
}

/// Fractional TDEE adjustment per body type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTypeAdjustments {
    pub ectomorph: f64,
    pub mesomorph: f64,
    pub endomorph: f64,
}

impl BodyTypeAdjustments {
    pub fn get(&self, body_type: BodyType) -> f64 {
        match body_type {
            BodyType::Ectomorph => self.ectomorph,
            BodyType::Mesomorph => self.mesomorph,
            BodyType::Endomorph => self.endomorph,
        }
    }
}

impl Default for BodyTypeAdjustments {
    fn default() -> Self {
        DEFAULT_BODY_TYPE_ADJUSTMENTS
    }
}

/// Energy density of each macronutrient (kcal per gram)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroEnergy {
    pub protein_kcal_per_g: f64,
    pub fat_kcal_per_g: f64,
    pub carb_kcal_per_g: f64,
}

impl Default for MacroEnergy {
    fn default() -> Self {
        Self {
            protein_kcal_per_g: KCAL_PER_G_PROTEIN,
            fat_kcal_per_g: KCAL_PER_G_FAT,
            carb_kcal_per_g: KCAL_PER_G_CARB,
        }
    }
}

/// Complete set of policy parameters for one estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConstants {
    pub activity_multipliers: ActivityMultipliers,
    pub body_type_adjustments: BodyTypeAdjustments,
    pub kcal_per_kg: f64,
    pub floor_male_kcal: f64,
    pub floor_female_kcal: f64,
    pub macro_energy: MacroEnergy,
}

impl Default for EstimationConstants {
    fn default() -> Self {
        Self {
            activity_multipliers: ActivityMultipliers::default(),
            body_type_adjustments: BodyTypeAdjustments::default(),
            kcal_per_kg: DEFAULT_KCAL_PER_KG,
            floor_male_kcal: DEFAULT_FLOOR_MALE_KCAL,
            floor_female_kcal: DEFAULT_FLOOR_FEMALE_KCAL,
            macro_energy: MacroEnergy::default(),
        }
    }
}

impl EstimationConstants {
    pub fn activity_multiplier(&self, level: ActivityLevel) -> f64 {
        self.activity_multipliers.get(level)
    }

    pub fn body_type_pct(&self, body_type: BodyType) -> f64 {
        self.body_type_adjustments.get(body_type)
    }

    /// Safety floor for the given sex
    pub fn floor_kcal(&self, sex: BiologicalSex) -> f64 {
        match sex {
            BiologicalSex::Male => self.floor_male_kcal,
            BiologicalSex::Female => self.floor_female_kcal,
        }
    }

    /// Reject overrides that would break the estimator's invariants
    ///
    /// Multipliers must be finite, at least 1 and strictly increasing by
    /// level (so TDEE ≥ BMR and more activity means more energy). Body-type
    /// adjustments must stay above -100%. Conversion factors must be positive
    /// and floors non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut previous: Option<f64> = None;
        for level in ActivityLevel::ALL {
            let field = format!("activity_multipliers.{}", level.as_str());
            let value = self.activity_multiplier(level);
            if !value.is_finite() {
                return Err(ValidationError::new(&field, "must be a finite number"));
            }
            if value < 1.0 {
                return Err(ValidationError::new(&field, "must be at least 1.0"));
            }
            if let Some(prev) = previous {
                if value <= prev {
                    return Err(ValidationError::new(
                        &field,
                        "must be greater than the multiplier of the previous level",
                    ));
                }
            }
            previous = Some(value);
        }

        for body_type in BodyType::ALL {
            let field = format!("body_type_adjustments.{}", body_type.as_str());
            let value = self.body_type_pct(body_type);
            if !value.is_finite() {
                return Err(ValidationError::new(&field, "must be a finite number"));
            }
            if value <= -1.0 {
                return Err(ValidationError::new(&field, "must be greater than -1.0"));
            }
        }

        validate_positive("kcal_per_kg", self.kcal_per_kg)?;
        validate_non_negative("floor_male_kcal", self.floor_male_kcal)?;
        validate_non_negative("floor_female_kcal", self.floor_female_kcal)?;
        validate_positive("macro_energy.protein_kcal_per_g", self.macro_energy.protein_kcal_per_g)?;
        validate_positive("macro_energy.fat_kcal_per_g", self.macro_energy.fat_kcal_per_g)?;
        validate_positive("macro_energy.carb_kcal_per_g", self.macro_energy.carb_kcal_per_g)?;

        Ok(())
    }
}

/// Macro parameters applied when a request leaves them out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroDefaults {
    pub protein_g_per_kg: f64,
    pub fat_fraction_of_kcal: f64,
}

impl Default for MacroDefaults {
    fn default() -> Self {
        Self {
            protein_g_per_kg: DEFAULT_PROTEIN_G_PER_KG,
            fat_fraction_of_kcal: DEFAULT_FAT_FRACTION_OF_KCAL,
        }
    }
}

impl MacroDefaults {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("protein_g_per_kg", self.protein_g_per_kg)?;
        validate_fraction("fat_fraction_of_kcal", self.fat_fraction_of_kcal)
    }
}
