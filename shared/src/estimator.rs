//! Calorie estimation pipeline
//!
//! BMR → activity-scaled TDEE → body-type nudge → goal delta → safety floor
//! → macro split. Every step is a pure function of the profile and the
//! estimator's constants; the same input always yields the same result.

use crate::constants::{EstimationConstants, MacroEnergy, DAYS_PER_WEEK};
use crate::errors::{EstimationError, MacroOverflowError};
use crate::health_metrics::{apply_body_type_adjustment, calculate_bmr_mifflin, calculate_tdee};
use crate::models::{EstimationResult, InputProfile, MacroBreakdown};
use crate::validation::{validate_profile, ValidationError};
use tracing::debug;

/// Estimator bound to one validated set of constants
///
/// Immutable after construction, so a single instance can serve any number
/// of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    constants: EstimationConstants,
}

impl Estimator {
    /// Create an estimator, rejecting constants that break its invariants
    pub fn new(constants: EstimationConstants) -> Result<Self, ValidationError> {
        constants.validate()?;
        Ok(Self { constants })
    }

    pub fn constants(&self) -> &EstimationConstants {
        &self.constants
    }

    /// Run the full pipeline for one profile
    pub fn estimate(&self, profile: &InputProfile) -> Result<EstimationResult, EstimationError> {
        validate_profile(profile)?;
        let c = &self.constants;

        let bmr_kcal = calculate_bmr_mifflin(
            profile.weight_kg,
            profile.height_cm,
            profile.age_years,
            profile.sex,
        );
        if bmr_kcal <= 0.0 {
            return Err(ValidationError::new(
                "age_years",
                "produces a non-positive basal metabolic rate",
            )
            .into());
        }

        // Overflow of the energy figures is attributed to the input that drove it
        let energy_field = if (profile.weight_kg * 10.0).is_finite() {
            "height_cm"
        } else {
            "weight_kg"
        };
        ensure_finite(energy_field, bmr_kcal)?;

        let activity_multiplier = c.activity_multiplier(profile.activity_level);
        let tdee_kcal = calculate_tdee(bmr_kcal, activity_multiplier);

        let body_type_pct = c.body_type_pct(profile.body_type);
        let body_type_adjusted_kcal = apply_body_type_adjustment(tdee_kcal, body_type_pct);
        ensure_finite(energy_field, body_type_adjusted_kcal)?;

        let daily_goal_delta_kcal = daily_goal_delta_kcal(
            profile.goal_weight_change_kg,
            profile.timeframe_weeks,
            c.kcal_per_kg,
        );
        let goal_field = if (profile.goal_weight_change_kg * c.kcal_per_kg).is_finite() {
            "timeframe_weeks"
        } else {
            "goal_weight_change_kg"
        };
        ensure_finite(goal_field, daily_goal_delta_kcal)?;

        let requested_kcal = body_type_adjusted_kcal + daily_goal_delta_kcal;
        ensure_finite(goal_field, requested_kcal)?;

        let floor_kcal = c.floor_kcal(profile.sex);
        let (goal_adjusted_kcal, floor_applied) = apply_calorie_floor(requested_kcal, floor_kcal);
        if floor_applied {
            debug!(requested_kcal, floor_kcal, "Calorie target raised to safety floor");
        }

        let macro_breakdown = split_macros(
            goal_adjusted_kcal,
            profile.weight_kg,
            profile.protein_g_per_kg,
            profile.fat_fraction_of_kcal,
            &c.macro_energy,
        )
        .map_err(|e| -> EstimationError {
            if e.protein_kcal.is_finite() {
                e.into()
            } else {
                non_finite("protein_g_per_kg").into()
            }
        })?;
        ensure_finite("protein_g_per_kg", macro_breakdown.protein_g)?;
        ensure_finite("protein_g_per_kg", macro_breakdown.carb_kcal)?;

        let goal_pct = (goal_adjusted_kcal - body_type_adjusted_kcal) / body_type_adjusted_kcal;
        ensure_finite(goal_field, goal_pct)?;

        debug!(
            bmr_kcal,
            tdee_kcal,
            goal_adjusted_kcal,
            floor_applied,
            "Estimate complete"
        );

        Ok(EstimationResult {
            bmr_kcal,
            activity_multiplier,
            tdee_kcal,
            body_type_pct,
            body_type_adjusted_kcal,
            goal_kind: profile.goal_kind(),
            daily_goal_delta_kcal,
            goal_pct,
            goal_adjusted_kcal,
            floor_applied,
            floor_kcal,
            macro_breakdown,
        })
    }
}

fn non_finite(field: &str) -> ValidationError {
    ValidationError::new(field, "produces a non-finite calorie target")
}

fn ensure_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(non_finite(field))
    }
}

/// Estimate with the default constants
pub fn estimate(profile: &InputProfile) -> Result<EstimationResult, EstimationError> {
    Estimator::default().estimate(profile)
}

/// Daily calorie delta needed to change weight by `weight_change_kg` over the timeframe
///
/// daily_delta = (kg × kcal_per_kg) / (weeks × 7). A zero goal yields zero
/// without looking at the timeframe.
pub fn daily_goal_delta_kcal(weight_change_kg: f64, timeframe_weeks: f64, kcal_per_kg: f64) -> f64 {
    if weight_change_kg == 0.0 {
        return 0.0;
    }
    (weight_change_kg * kcal_per_kg) / (timeframe_weeks * DAYS_PER_WEEK)
}

/// Clamp a target to the floor, reporting whether the floor bound
pub fn apply_calorie_floor(target_kcal: f64, floor_kcal: f64) -> (f64, bool) {
    if target_kcal < floor_kcal {
        (floor_kcal, true)
    } else {
        (target_kcal, false)
    }
}

/// Split a calorie target into protein, fat and carbohydrate
///
/// Protein is fixed by body weight, fat by its share of the target, and
/// carbohydrate takes whatever remains. A negative remainder is an error.
pub fn split_macros(
    target_kcal: f64,
    weight_kg: f64,
    protein_g_per_kg: f64,
    fat_fraction_of_kcal: f64,
    energy: &MacroEnergy,
) -> Result<MacroBreakdown, MacroOverflowError> {
    let protein_g = protein_g_per_kg * weight_kg;
    let protein_kcal = protein_g * energy.protein_kcal_per_g;

    let fat_kcal = target_kcal * fat_fraction_of_kcal;
    let fat_g = fat_kcal / energy.fat_kcal_per_g;

    let carb_kcal = target_kcal - protein_kcal - fat_kcal;
    if carb_kcal < 0.0 {
        return Err(MacroOverflowError {
            protein_kcal,
            fat_kcal,
            target_kcal,
        });
    }
    let carb_g = carb_kcal / energy.carb_kcal_per_g;

    Ok(MacroBreakdown {
        protein_g,
        protein_kcal,
        fat_g,
        fat_kcal,
        carb_g,
        carb_kcal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::{ActivityLevel, BiologicalSex, BodyType};
    use crate::models::GoalKind;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn reference_male() -> InputProfile {
        InputProfile::new(
            BiologicalSex::Male,
            80.0,
            180.0,
            30,
            ActivityLevel::Sedentary,
            BodyType::Mesomorph,
        )
        .with_macros(2.0, 0.25)
    }

    // =========================================================================
    // Worked example
    // =========================================================================

    #[test]
    fn test_reference_maintenance_example() {
        let result = estimate(&reference_male()).unwrap();

        assert!((result.bmr_kcal - 1780.0).abs() < EPS);
        assert!((result.tdee_kcal - 2136.0).abs() < EPS);
        assert!((result.body_type_adjusted_kcal - 2136.0).abs() < EPS);
        assert_eq!(result.daily_goal_delta_kcal, 0.0);
        assert!((result.goal_adjusted_kcal - 2136.0).abs() < EPS);
        assert!(!result.floor_applied);
        assert_eq!(result.floor_kcal, 1500.0);
        assert_eq!(result.goal_kind, GoalKind::Maintain);

        let m = result.macro_breakdown;
        assert!((m.protein_g - 160.0).abs() < EPS);
        assert!((m.protein_kcal - 640.0).abs() < EPS);
        assert!((m.fat_kcal - 534.0).abs() < EPS);
        assert!((m.fat_g - 59.333).abs() < 0.001);
        assert!((m.carb_kcal - 962.0).abs() < EPS);
        assert!((m.carb_g - 240.5).abs() < EPS);
    }

    #[test]
    fn test_negative_weight_is_validation_error() {
        let mut p = reference_male();
        p.weight_kg = -5.0;
        match estimate(&p) {
            Err(EstimationError::Validation(e)) => {
                assert_eq!(e.field, "weight_kg");
                assert_eq!(e.reason, "must be positive");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    // =========================================================================
    // Goal and floor
    // =========================================================================

    #[test]
    fn test_loss_goal_daily_delta() {
        // -5 kg over 10 weeks: -38500 / 70 = -550 kcal/day
        let result = estimate(&reference_male().with_goal(-5.0, 10.0)).unwrap();
        assert!((result.daily_goal_delta_kcal + 550.0).abs() < EPS);
        assert!((result.goal_adjusted_kcal - 1586.0).abs() < EPS);
        assert!(!result.floor_applied);
        assert_eq!(result.goal_kind, GoalKind::Lose);
        assert!(result.goal_pct < 0.0);
    }

    #[test]
    fn test_zero_goal_ignores_timeframe() {
        assert_eq!(daily_goal_delta_kcal(0.0, 0.0, 7700.0), 0.0);
        assert_eq!(daily_goal_delta_kcal(0.0, -1.0, 7700.0), 0.0);
    }

    #[test]
    fn test_aggressive_loss_hits_male_floor() {
        // -10 kg over 4 weeks: -2750 kcal/day, far below 1500
        let result = estimate(&reference_male().with_goal(-10.0, 4.0)).unwrap();
        assert!(result.floor_applied);
        assert_eq!(result.goal_adjusted_kcal, 1500.0);
        assert_eq!(result.floor_kcal, 1500.0);
        assert!((result.macro_breakdown.total_kcal() - 1500.0).abs() < EPS);
    }

    #[test]
    fn test_female_floor_is_lower() {
        let profile = InputProfile::new(
            BiologicalSex::Female,
            55.0,
            160.0,
            45,
            ActivityLevel::Sedentary,
            BodyType::Endomorph,
        )
        .with_goal(-8.0, 4.0)
        .with_macros(1.2, 0.25);
        let result = estimate(&profile).unwrap();
        assert!(result.floor_applied);
        assert_eq!(result.goal_adjusted_kcal, 1200.0);
    }

    #[test]
    fn test_floor_helper() {
        assert_eq!(apply_calorie_floor(1100.0, 1200.0), (1200.0, true));
        assert_eq!(apply_calorie_floor(1200.0, 1200.0), (1200.0, false));
        assert_eq!(apply_calorie_floor(2500.0, 1200.0), (2500.0, false));
    }

    #[test]
    fn test_tiny_timeframe_is_validation_error() {
        match estimate(&reference_male().with_goal(1.0, 1e-308)) {
            Err(EstimationError::Validation(e)) => {
                assert_eq!(e.field, "timeframe_weeks");
                assert_eq!(e.reason, "produces a non-finite calorie target");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[rstest::rstest]
    #[case(f64::MAX, 180.0, "weight_kg")]
    #[case(80.0, f64::MAX, "height_cm")]
    fn test_overflowing_body_size_is_validation_error(
        #[case] weight_kg: f64,
        #[case] height_cm: f64,
        #[case] field: &str,
    ) {
        let mut profile = reference_male();
        profile.weight_kg = weight_kg;
        profile.height_cm = height_cm;
        match estimate(&profile) {
            Err(EstimationError::Validation(e)) => assert_eq!(e.field, field),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_goal_is_validation_error() {
        match estimate(&reference_male().with_goal(f64::MAX, 1.0)) {
            Err(EstimationError::Validation(e)) => assert_eq!(e.field, "goal_weight_change_kg"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_protein_is_validation_error() {
        let profile = reference_male().with_macros(f64::MAX, 0.25);
        match estimate(&profile) {
            Err(EstimationError::Validation(e)) => assert_eq!(e.field, "protein_g_per_kg"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_large_weight_stays_consistent() {
        let mut profile = reference_male();
        profile.weight_kg = 1e200;
        profile.protein_g_per_kg = 0.0;
        let result = estimate(&profile).unwrap();
        let m = result.macro_breakdown;
        assert!(m.carb_kcal.is_finite());
        assert!((m.total_kcal() - result.goal_adjusted_kcal).abs() <= result.goal_adjusted_kcal * 1e-12);
    }

    // =========================================================================
    // Macro overflow
    // =========================================================================

    #[test]
    fn test_macro_overflow_detected() {
        // 4 g/kg protein = 1280 kcal, 50% fat = 1068 kcal > 2136 target
        let profile = reference_male().with_macros(4.0, 0.5);
        match estimate(&profile) {
            Err(EstimationError::MacroOverflow(e)) => {
                assert!((e.protein_kcal - 1280.0).abs() < EPS);
                assert!((e.fat_kcal - 1068.0).abs() < EPS);
                assert!((e.target_kcal - 2136.0).abs() < EPS);
                assert!(e.excess_kcal() > 0.0);
            }
            other => panic!("expected macro overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_fit_leaves_zero_carbs() {
        let m = split_macros(2000.0, 50.0, 5.0, 0.5, &MacroEnergy::default()).unwrap();
        assert_eq!(m.carb_kcal, 0.0);
        assert_eq!(m.carb_g, 0.0);
    }

    #[test]
    fn test_non_positive_bmr_rejected() {
        let profile = InputProfile::new(
            BiologicalSex::Female,
            1.0,
            1.0,
            200,
            ActivityLevel::Sedentary,
            BodyType::Mesomorph,
        );
        match estimate(&profile) {
            Err(EstimationError::Validation(e)) => assert_eq!(e.field, "age_years"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    // =========================================================================
    // Custom constants
    // =========================================================================

    #[test]
    fn test_custom_constants_change_results() {
        let constants = EstimationConstants {
            kcal_per_kg: 7000.0,
            ..Default::default()
        };
        let estimator = Estimator::new(constants).unwrap();
        let result = estimator.estimate(&reference_male().with_goal(-1.0, 1.0)).unwrap();
        assert!((result.daily_goal_delta_kcal + 1000.0).abs() < EPS);
    }

    #[test]
    fn test_invalid_constants_rejected() {
        let mut constants = EstimationConstants::default();
        constants.activity_multipliers.moderately_active = 0.5;
        assert!(Estimator::new(constants).is_err());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn sex_strategy() -> impl Strategy<Value = BiologicalSex> {
        prop_oneof![Just(BiologicalSex::Male), Just(BiologicalSex::Female)]
    }

    fn activity_strategy() -> impl Strategy<Value = ActivityLevel> {
        prop::sample::select(ActivityLevel::ALL.to_vec())
    }

    fn body_type_strategy() -> impl Strategy<Value = BodyType> {
        prop::sample::select(BodyType::ALL.to_vec())
    }

    prop_compose! {
        fn valid_profile()(
            sex in sex_strategy(),
            weight in 40.0f64..200.0,
            height in 140.0f64..210.0,
            age in 18u32..90,
            activity in activity_strategy(),
            body_type in body_type_strategy(),
            goal in -20.0f64..20.0,
            weeks in 4.0f64..52.0,
            protein in 0.0f64..2.0,
            fat in 0.0f64..0.35
        ) -> InputProfile {
            InputProfile::new(sex, weight, height, age, activity, body_type)
                .with_goal(goal, weeks)
                .with_macros(protein, fat)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMR is positive and TDEE never below BMR
        #[test]
        fn prop_bmr_positive_and_tdee_at_least_bmr(profile in valid_profile()) {
            if let Ok(result) = estimate(&profile) {
                prop_assert!(result.bmr_kcal > 0.0);
                prop_assert!(result.tdee_kcal >= result.bmr_kcal);
            }
        }

        /// Property: macro calories sum to the target within 1 kcal
        #[test]
        fn prop_macros_sum_to_target(profile in valid_profile()) {
            if let Ok(result) = estimate(&profile) {
                let total = result.macro_breakdown.total_kcal();
                prop_assert!((total - result.goal_adjusted_kcal).abs() <= 1.0,
                    "macros {} != target {}", total, result.goal_adjusted_kcal);
            }
        }

        /// Property: the target never falls below the floor
        #[test]
        fn prop_target_never_below_floor(profile in valid_profile()) {
            if let Ok(result) = estimate(&profile) {
                prop_assert!(result.goal_adjusted_kcal >= result.floor_kcal);
                if result.floor_applied {
                    prop_assert_eq!(result.goal_adjusted_kcal, result.floor_kcal);
                }
            }
        }

        /// Property: identical input gives identical output
        #[test]
        fn prop_idempotent(profile in valid_profile()) {
            prop_assert_eq!(estimate(&profile), estimate(&profile));
        }

        /// Property: a higher activity level strictly increases TDEE
        #[test]
        fn prop_activity_monotonic(profile in valid_profile()) {
            let mut previous: Option<f64> = None;
            for level in ActivityLevel::ALL {
                let mut p = profile.clone();
                p.activity_level = level;
                p.protein_g_per_kg = 0.0;
                let tdee = estimate(&p).unwrap().tdee_kcal;
                if let Some(prev) = previous {
                    prop_assert!(tdee > prev);
                }
                previous = Some(tdee);
            }
        }

        /// Property: a larger goal strictly increases the target while unclamped
        #[test]
        fn prop_goal_monotonic(
            profile in valid_profile(),
            goal in -5.0f64..5.0,
            step in 0.1f64..5.0
        ) {
            let base = profile.with_macros(0.0, 0.0);
            let lower = estimate(&base.clone().with_goal(goal, 12.0)).unwrap();
            let higher = estimate(&base.with_goal(goal + step, 12.0)).unwrap();
            if !lower.floor_applied && !higher.floor_applied {
                prop_assert!(higher.goal_adjusted_kcal > lower.goal_adjusted_kcal);
            }
        }

        /// Property: protein + fat above the target always overflows
        #[test]
        fn prop_overflow_when_protein_and_fat_exceed_target(
            target in 1200.0f64..4000.0,
            weight in 50.0f64..150.0,
            fat in 0.5f64..0.99
        ) {
            // protein alone covers the non-fat share plus one extra kcal
            let protein_kcal_needed = target * (1.0 - fat) + 1.0;
            let protein_g_per_kg = protein_kcal_needed / 4.0 / weight;
            let result = split_macros(target, weight, protein_g_per_kg, fat, &MacroEnergy::default());
            prop_assert!(result.is_err());
        }
    }
}
