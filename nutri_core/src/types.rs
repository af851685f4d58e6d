//! Core domain types for the Nutri tracker.
//!
//! This module defines the values the calculator works on:
//! - Per-unit food nutrition and its quantity-scaled counterpart
//! - Consumed quantity with its lenient parsing rules
//! - Biometric input and activity levels for energy estimates
//! - Macronutrient energy breakdown

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Food Nutrition
// ============================================================================

/// Per-unit nutrition reference data for a food
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodNutrition {
    pub calories_per_unit: f64,
    pub protein_grams_per_unit: f64,
    pub carbs_grams_per_unit: f64,
    pub fat_grams_per_unit: f64,
}

/// Nutrition for a consumed quantity of a food
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaledNutrition {
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
}

impl std::ops::Add for ScaledNutrition {
    type Output = ScaledNutrition;

    fn add(self, other: ScaledNutrition) -> ScaledNutrition {
        ScaledNutrition {
            calories: self.calories + other.calories,
            protein_grams: self.protein_grams + other.protein_grams,
            carbs_grams: self.carbs_grams + other.carbs_grams,
            fat_grams: self.fat_grams + other.fat_grams,
        }
    }
}

impl std::iter::Sum for ScaledNutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ScaledNutrition::default(), |acc, n| acc + n)
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// Number of units consumed
///
/// Always positive and finite. Anything else (missing, non-numeric,
/// zero, negative, NaN, infinite) collapses to a single unit.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    /// One unit, used whenever the input is not a usable number
    pub const ONE: Quantity = Quantity(1.0);

    /// Wrap a raw value, substituting one unit for invalid input
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Quantity(value)
        } else {
            Self::ONE
        }
    }

    /// Parse user-entered text (e.g. a form field)
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(value) => Self::new(value),
            Err(_) => {
                tracing::debug!("Quantity {:?} is not a number, using 1", input);
                Self::ONE
            }
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::new(value)
    }
}

impl From<Option<f64>> for Quantity {
    fn from(value: Option<f64>) -> Self {
        value.map(Quantity::new).unwrap_or_default()
    }
}

impl From<Quantity> for f64 {
    fn from(quantity: Quantity) -> f64 {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Biometrics and Activity
// ============================================================================

/// Sex term used by the Mifflin–St Jeor equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    #[serde(other)]
    Other,
}

impl Sex {
    /// Parse a sex name; anything but "male" uses the other-sex constant
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "male" => Sex::Male,
            _ => Sex::Other,
        }
    }
}

/// Biometric input for the BMR estimate
///
/// No range checks are applied; callers validate before estimating.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiometricInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub sex: Sex,
}

/// Daily activity level applied to BMR to get TDEE
///
/// Serialized by name; unknown names read back as sedentary.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Energy expenditure multiplier for this level
    pub const fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Parse a level name; unrecognized names fall back to sedentary
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        match Self::ALL.iter().find(|level| level.name() == normalized) {
            Some(level) => *level,
            None => {
                tracing::warn!("Unknown activity level {:?}, using sedentary", name);
                ActivityLevel::Sedentary
            }
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(name: String) -> Self {
        ActivityLevel::from_name(&name)
    }
}

impl From<ActivityLevel> for String {
    fn from(level: ActivityLevel) -> String {
        level.name().to_string()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Macro Breakdown and Facts
// ============================================================================

/// Share of total energy contributed by each macronutrient, in whole percent
///
/// Shares are rounded independently, so they can sum to 99 or 101.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_pct: i32,
    pub carbs_pct: i32,
    pub fat_pct: i32,
}

/// Scaled nutrition for a named food, including fiber
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub name: String,
    pub quantity: Quantity,
    pub nutrition: ScaledNutrition,
    pub fiber_grams: f64,
}
