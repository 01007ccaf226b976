//! Energy expenditure formulas: BMR, TDEE and target calories.

use crate::domain::{ActivityLevel, Gender, Goal};

/// Mifflin-St Jeor coefficients (weight in kg, height in cm, age in years).
mod mifflin {
    pub const WEIGHT_COEF: f64 = 10.0;
    pub const HEIGHT_COEF: f64 = 6.25;
    pub const AGE_COEF: f64 = 5.0;
    pub const MALE_CONSTANT: f64 = 5.0;
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// Calorie offset subtracted for weight loss and added for muscle gain.
const GOAL_CALORIE_OFFSET: f64 = 500.0;

/// Rounds a value to `places` decimal places.
///
/// Half-way values round away from zero (`f64::round` semantics); this is
/// the rounding policy for every figure the engine reports.
pub(crate) fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Calculates Basal Metabolic Rate using the Mifflin-St Jeor formula.
///
/// ```text
/// male:   10 × weight + 6.25 × height − 5 × age + 5
/// female: 10 × weight + 6.25 × height − 5 × age − 161
/// ```
///
/// Result is rounded to 2 decimal places. Range validation is the caller's
/// job; physiologically nonsensical inputs still produce a number.
///
/// # Arguments
/// * `gender` - Formula branch selector
/// * `weight_kg` - Bodyweight in kilograms
/// * `height_cm` - Height in centimeters
/// * `age_years` - Age in years
///
/// # Returns
/// BMR in kcal/day
pub fn calculate_bmr(gender: Gender, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let base = mifflin::WEIGHT_COEF * weight_kg + mifflin::HEIGHT_COEF * height_cm
        - mifflin::AGE_COEF * f64::from(age_years);

    let bmr = match gender {
        Gender::Male => base + mifflin::MALE_CONSTANT,
        Gender::Female => base + mifflin::FEMALE_CONSTANT,
    };

    round_dp(bmr, 2)
}

/// Calculates Total Daily Energy Expenditure by scaling BMR with the
/// activity multiplier, rounded to 2 decimal places.
pub fn calculate_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    round_dp(bmr * activity.multiplier(), 2)
}

/// Calculates the daily calorie target for a goal.
///
/// Weight loss subtracts a fixed 500 kcal from TDEE, muscle gain adds it,
/// maintenance keeps TDEE unchanged. Rounded to 2 decimal places.
pub fn calculate_target_calories(tdee: f64, goal: Goal) -> f64 {
    let target = match goal {
        Goal::Loss => tdee - GOAL_CALORIE_OFFSET,
        Goal::Gain => tdee + GOAL_CALORIE_OFFSET,
        Goal::Maintenance => tdee,
    };

    round_dp(target, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_dp_half_away_from_zero() {
        // 1.25 and 12.5 are exact in binary, so this exercises the policy
        // rather than representation noise
        assert_eq!(round_dp(1.25, 1), 1.3);
        assert_eq!(round_dp(-1.25, 1), -1.3);
        assert_eq!(round_dp(2.5, 0), 3.0);
    }

    #[test]
    fn test_bmr_male_reference() {
        // 10 × 70 + 6.25 × 175 − 5 × 25 + 5 = 1673.75
        assert_eq!(calculate_bmr(Gender::Male, 70.0, 175.0, 25), 1673.75);
    }

    #[test]
    fn test_bmr_female_reference() {
        // 10 × 60 + 6.25 × 165 − 5 × 30 − 161 = 1320.25
        assert_eq!(calculate_bmr(Gender::Female, 60.0, 165.0, 30), 1320.25);
    }

    #[test]
    fn test_bmr_accepts_degenerate_inputs() {
        // No range validation in the engine: zero biometrics reduce the
        // formula to the gender constant
        assert_eq!(calculate_bmr(Gender::Male, 0.0, 0.0, 0), 5.0);
        assert_eq!(calculate_bmr(Gender::Female, 0.0, 0.0, 0), -161.0);
    }

    #[test]
    fn test_tdee_moderate_reference() {
        // 1780 × 1.55 = 2759
        assert_eq!(calculate_tdee(1780.0, ActivityLevel::Moderate), 2759.0);
    }

    #[test]
    fn test_tdee_sedentary_is_default_multiplier() {
        assert_eq!(calculate_tdee(1500.0, ActivityLevel::Sedentary), 1800.0);
    }

    #[test]
    fn test_tdee_strictly_increasing_with_activity() {
        let bmr = 1673.75;
        let tdees: Vec<f64> = ActivityLevel::all()
            .iter()
            .map(|level| calculate_tdee(bmr, *level))
            .collect();

        for pair in tdees.windows(2) {
            assert!(
                pair[0] < pair[1],
                "TDEE should increase with activity: {} vs {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_target_calories_offsets() {
        assert_eq!(calculate_target_calories(2000.0, Goal::Loss), 1500.0);
        assert_eq!(calculate_target_calories(2000.0, Goal::Gain), 2500.0);
        assert_eq!(calculate_target_calories(2000.0, Goal::Maintenance), 2000.0);
    }

    #[test]
    fn test_target_calories_unknown_goal_behaves_as_maintenance() {
        let goal = Goal::from_label("recomp");
        assert_eq!(calculate_target_calories(2000.0, goal), 2000.0);
    }
}
