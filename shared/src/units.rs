//! Unit conversion at the input boundary
//!
//! The estimator works in kilograms and centimeters only. Requests may arrive
//! in imperial units (pounds, inches); they are converted here before the
//! profile is built, never inside the calculation.

use serde::{Deserialize, Serialize};
use std::fmt;

const KG_PER_LB: f64 = 0.453592;
const CM_PER_INCH: f64 = 2.54;

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
}

impl HeightUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Inches => value * CM_PER_INCH,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// Fixed metric/imperial convention for a whole request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            UnitSystem::Metric => WeightUnit::Kg,
            UnitSystem::Imperial => WeightUnit::Lbs,
        }
    }

    pub fn height_unit(&self) -> HeightUnit {
        match self {
            UnitSystem::Metric => HeightUnit::Cm,
            UnitSystem::Imperial => HeightUnit::Inches,
        }
    }

    /// Convert a (weight, height) pair into (kg, cm)
    pub fn to_metric(&self, weight: f64, height: f64) -> (f64, f64) {
        (self.weight_unit().to_kg(weight), self.height_unit().to_cm(height))
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" | "kg/cm" => Ok(UnitSystem::Metric),
            "imperial" | "us" | "lb/in" | "lbs/in" => Ok(UnitSystem::Imperial),
            _ => Err(format!("must be one of: metric, imperial (got '{}')", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_conversions() {
        assert!((WeightUnit::Lbs.to_kg(100.0) - 45.3592).abs() < 1e-9);
        assert!((HeightUnit::Inches.to_cm(70.0) - 177.8).abs() < 1e-9);
        assert_eq!(WeightUnit::Kg.to_kg(80.0), 80.0);
        assert_eq!(HeightUnit::Cm.to_cm(180.0), 180.0);
    }

    #[test]
    fn test_imperial_to_metric() {
        let (kg, cm) = UnitSystem::Imperial.to_metric(176.0, 71.0);
        assert!((kg - 79.832192).abs() < 1e-6);
        assert!((cm - 180.34).abs() < 1e-9);
    }

    #[test]
    fn test_unit_system_parsing() {
        assert_eq!("Metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!("IMPERIAL".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert!("stones".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn test_default_is_metric() {
        assert_eq!(UnitSystem::default(), UnitSystem::Metric);
        assert_eq!(UnitSystem::default().weight_unit(), WeightUnit::Kg);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: imperial conversion preserves ordering
        #[test]
        fn prop_conversion_monotonic(a in 44.0f64..1100.0, b in 44.0f64..1100.0) {
            let (ka, kb) = (WeightUnit::Lbs.to_kg(a), WeightUnit::Lbs.to_kg(b));
            if a < b {
                prop_assert!(ka <= kb);
            }
        }

        #[test]
        fn prop_positive_stays_positive(inches in 0.1f64..120.0) {
            prop_assert!(HeightUnit::Inches.to_cm(inches) > 0.0);
        }
    }
}
