//! Domain types for calculation inputs.
//!
//! Form values arrive as free-form labels; every enum here parses with an
//! explicit default arm so that unknown labels land on a documented
//! fallback instead of an error.

/// Biological sex used by the BMR formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parses a form label. Only `male` (after trimming and lowercasing)
    /// selects the male formula branch; every other label, including an
    /// empty one, falls back to `Female`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            _ => Gender::Female,
        }
    }

    /// Returns the canonical label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Daily activity level scaling BMR up to total energy expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Returns all levels, ordered from least to most active.
    pub fn all() -> &'static [ActivityLevel] {
        &[
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ]
    }

    /// TDEE multiplier applied to BMR.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Parses a form label; unknown labels fall back to `Sedentary`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    /// Returns the canonical label.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Returns the display name for the level.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light activity (1-3 days/week)",
            ActivityLevel::Moderate => "Moderate activity (3-5 days/week)",
            ActivityLevel::Active => "High activity (6-7 days/week)",
            ActivityLevel::VeryActive => "Very high activity (hard daily training)",
        }
    }
}

/// Body-composition goal driving the calorie offset and protein allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Loss,
    Maintenance,
    Gain,
}

impl Goal {
    /// Returns all goal variants.
    pub fn all() -> &'static [Goal] {
        &[Goal::Loss, Goal::Maintenance, Goal::Gain]
    }

    /// Parses a form label; unknown labels fall back to `Maintenance`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "loss" => Goal::Loss,
            "gain" => Goal::Gain,
            _ => Goal::Maintenance,
        }
    }

    /// Returns the canonical label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Goal::Loss => "loss",
            Goal::Maintenance => "maintenance",
            Goal::Gain => "gain",
        }
    }

    /// Returns the display name for the goal.
    pub fn display_name(&self) -> &'static str {
        match self {
            Goal::Loss => "Weight loss",
            Goal::Maintenance => "Weight maintenance",
            Goal::Gain => "Muscle gain",
        }
    }
}

/// Normalized input for one calculation, assembled by the request layer.
///
/// The engine trusts these values; weight and height are range-checked
/// (positive, finite) before this struct is built.
#[derive(Debug, Clone, Copy)]
pub struct CalculationInput {
    pub gender: Gender,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}
