//! Nutrition calculator.
//!
//! Pure functions over the domain types:
//! - Quantity scaling of per-unit food values
//! - BMR (Mifflin–St Jeor) and TDEE estimates
//! - Macronutrient energy breakdown
//! - Display formatting of nutrition values
//!
//! Every function here is total: invalid input is substituted with a
//! default instead of producing an error.

use crate::catalog::FoodItem;
use crate::{
    ActivityLevel, BiometricInput, FoodNutrition, MacroBreakdown, NutritionFacts, Quantity,
    ScaledNutrition, Sex,
};

/// Energy density of protein (kcal per gram)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal per gram)
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal per gram)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Unit label that switches formatting to one decimal below 1
pub const GRAM_UNIT: &str = "g";

/// Scale a food's per-unit values by the consumed quantity
///
/// No rounding is applied; see [`format_nutrition`] for display.
pub fn scale(food: &FoodNutrition, quantity: impl Into<Quantity>) -> ScaledNutrition {
    let q = quantity.into().value();
    ScaledNutrition {
        calories: food.calories_per_unit * q,
        protein_grams: food.protein_grams_per_unit * q,
        carbs_grams: food.carbs_grams_per_unit * q,
        fat_grams: food.fat_grams_per_unit * q,
    }
}

/// Basal metabolic rate in kcal/day (Mifflin–St Jeor)
///
/// Inputs are not range checked; zero or negative values flow through.
pub fn estimate_bmr(input: &BiometricInput) -> f64 {
    let base = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * input.age_years;
    match input.sex {
        Sex::Male => base + 5.0,
        Sex::Other => base - 161.0,
    }
}

/// Total daily energy expenditure for a BMR and activity level
pub fn estimate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Share of energy from each macronutrient, in whole percent
///
/// Returns all zeros when total energy is exactly zero.
pub fn macro_percentages(protein_grams: f64, carbs_grams: f64, fat_grams: f64) -> MacroBreakdown {
    let protein_kcal = protein_grams * KCAL_PER_GRAM_PROTEIN;
    let carbs_kcal = carbs_grams * KCAL_PER_GRAM_CARBS;
    let fat_kcal = fat_grams * KCAL_PER_GRAM_FAT;
    let total_kcal = protein_kcal + carbs_kcal + fat_kcal;

    if total_kcal == 0.0 {
        return MacroBreakdown::default();
    }

    let pct = |kcal: f64| round_half_up(kcal / total_kcal * 100.0) as i32;

    MacroBreakdown {
        protein_pct: pct(protein_kcal),
        carbs_pct: pct(carbs_kcal),
        fat_pct: pct(fat_kcal),
    }
}

/// Format a nutrition value for display
///
/// Grams below 1 keep one decimal ("0.4g"); everything else is rounded to
/// a whole number ("6g", "1979kcal"). Non-finite values render as "0".
/// Re-formatting the number shown in the output gives the same string.
pub fn format_nutrition(value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return format!("0{}", unit);
    }

    if unit == GRAM_UNIT {
        let tenths = format_tenths(value);
        // 0.95..1.0 would show "1.0g"; render it as the integer instead
        if tenths.parse::<f64>().map_or(false, |shown| shown < 1.0) {
            return format!("{}{}", tenths, unit);
        }
    }

    format!("{}{}", round_half_up(value), unit)
}

/// One-decimal rendering of the exact decimal value of `value`
///
/// Exact ties (0.25, -3.25) go away from zero like the browser's
/// `toFixed(1)`; everything else is correctly rounded by `{:.1}`.
fn format_tenths(value: f64) -> String {
    let scaled = value * 10.0;
    let exact = value.mul_add(10.0, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        let away = (scaled.abs().floor() + 1.0).copysign(value);
        return format!("{:.1}", away / 10.0);
    }
    format!("{:.1}", value)
}

/// Format raw text as a nutrition value; non-numeric text renders as "0"
pub fn format_nutrition_input(raw: &str, unit: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) => format_nutrition(value, unit),
        Err(_) => format!("0{}", unit),
    }
}

/// Scaled facts for a catalog food, fiber included
pub fn nutrition_facts(food: &FoodItem, quantity: impl Into<Quantity>) -> NutritionFacts {
    let quantity = quantity.into();
    NutritionFacts {
        name: food.name.clone(),
        quantity,
        nutrition: scale(&food.nutrition(), quantity),
        fiber_grams: food.fiber * quantity.value(),
    }
}

/// Round to the nearest integer, halves toward positive infinity
///
/// Matches the browser's `Math.round`, which the breakdown and display
/// values were always computed with. Negative zero is normalized.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded + 0.0
}
