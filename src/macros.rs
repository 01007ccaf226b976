//! Macronutrient allocation for a daily calorie target.
//!
//! Splits target calories into protein, fat and carbohydrates in a fixed
//! order: protein from bodyweight, fat as the larger of an energy share and
//! a bodyweight floor, carbohydrates from whatever calories remain. After
//! gram rounding the calorie totals are re-derived, so the reported total
//! may drift slightly from the nominal target.

use serde::Serialize;

use crate::domain::Goal;
use crate::energy::round_dp;
use crate::error::EngineError;

// === Constants ===

/// Energy density of protein (kcal per gram).
const PROTEIN_KCAL_PER_G: f64 = 4.0;

/// Energy density of fat (kcal per gram).
const FAT_KCAL_PER_G: f64 = 9.0;

/// Energy density of carbohydrates (kcal per gram).
const CARB_KCAL_PER_G: f64 = 4.0;

/// Protein allowance in grams per kg bodyweight, by goal.
mod protein_per_kg {
    /// Deficit: higher protein to preserve muscle.
    pub const LOSS: f64 = 2.0;
    /// Maintenance baseline.
    pub const MAINTENANCE: f64 = 1.6;
    /// Surplus: highest protein for muscle growth.
    pub const GAIN: f64 = 2.2;
}

/// Share of target calories allotted to fat.
const FAT_ENERGY_SHARE: f64 = 0.25;

/// Bodyweight-based fat floor (grams per kg).
const FAT_G_PER_KG: f64 = 0.9;

// === Data Structures ===

/// One macronutrient's share of the daily budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroPart {
    pub grams: f64,
    pub calories: f64,
    pub percent: f64,
}

/// Full macronutrient split for a calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroBreakdown {
    pub protein: MacroPart,
    pub fat: MacroPart,
    pub carbs: MacroPart,
    /// Sum of the three calorie components after gram rounding. Not forced
    /// back to the nominal target.
    pub total_calories: f64,
}

/// Free-text guidance for one goal, independent of the numeric inputs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MacroGuidance {
    pub protein: &'static str,
    pub fat: &'static str,
    pub carbs: &'static str,
}

// === Calculation ===

/// Allocates a calorie target across protein, fat and carbohydrates.
///
/// The order matters: protein is fixed by bodyweight, fat takes the larger
/// of 25% of calories and 0.9 g/kg, carbohydrates absorb the remainder.
/// A remainder driven negative by a small target is reported as-is, not
/// floored.
///
/// # Arguments
/// * `target_calories` - Daily calorie budget to split
/// * `goal` - Selects the protein allowance
/// * `weight_kg` - Bodyweight in kilograms
///
/// # Returns
/// The macro split, or `EngineError::ZeroCalorieTotal` when the rounded
/// split sums to zero calories and percentages would be undefined.
pub fn calculate_macros(
    target_calories: f64,
    goal: Goal,
    weight_kg: f64,
) -> Result<MacroBreakdown, EngineError> {
    let protein_rate = match goal {
        Goal::Loss => protein_per_kg::LOSS,
        Goal::Maintenance => protein_per_kg::MAINTENANCE,
        Goal::Gain => protein_per_kg::GAIN,
    };
    let protein_grams = round_dp(weight_kg * protein_rate, 1);
    let protein_calories = protein_grams * PROTEIN_KCAL_PER_G;

    // Fat: energy share vs bodyweight floor, larger one wins
    let fat_grams_from_share = round_dp(target_calories * FAT_ENERGY_SHARE / FAT_KCAL_PER_G, 1);
    let fat_grams_from_weight = round_dp(weight_kg * FAT_G_PER_KG, 1);
    let fat_grams = fat_grams_from_share.max(fat_grams_from_weight);
    let fat_calories = fat_grams * FAT_KCAL_PER_G;

    // Carbohydrates absorb the remainder, then calories are re-derived
    // from the rounded gram amount
    let carb_remainder = target_calories - protein_calories - fat_calories;
    let carb_grams = round_dp(carb_remainder / CARB_KCAL_PER_G, 1);
    let carb_calories = carb_grams * CARB_KCAL_PER_G;

    let total_calories = protein_calories + fat_calories + carb_calories;
    if total_calories == 0.0 {
        return Err(EngineError::ZeroCalorieTotal {
            target: target_calories,
        });
    }

    Ok(MacroBreakdown {
        protein: MacroPart {
            grams: protein_grams,
            calories: protein_calories,
            percent: round_dp(protein_calories / total_calories * 100.0, 1),
        },
        fat: MacroPart {
            grams: fat_grams,
            calories: fat_calories,
            percent: round_dp(fat_calories / total_calories * 100.0, 1),
        },
        carbs: MacroPart {
            grams: carb_grams,
            calories: carb_calories,
            percent: round_dp(carb_calories / total_calories * 100.0, 1),
        },
        total_calories,
    })
}

/// Returns the guidance entry for a goal.
///
/// Unknown form labels were already normalized to `Maintenance` when the
/// goal was parsed, so the table is total.
pub fn guidance_for(goal: Goal) -> MacroGuidance {
    match goal {
        Goal::Loss => MacroGuidance {
            protein: "1.8-2.2 g/kg - helps preserve muscle in a calorie deficit",
            fat: "0.8-1 g/kg (20-30% of calories) - needed for hormone production",
            carbs: "Remaining calories - kept low to hold the deficit",
        },
        Goal::Maintenance => MacroGuidance {
            protein: "1.2-1.6 g/kg - maintains muscle mass",
            fat: "0.8-1 g/kg (25-35% of calories)",
            carbs: "45-55% of calories - the main energy source",
        },
        Goal::Gain => MacroGuidance {
            protein: "1.8-2.5 g/kg - supports muscle growth",
            fat: "0.8-1 g/kg (20-30% of calories)",
            carbs: "50-60% of calories - fuel for training and recovery",
        },
    }
}
