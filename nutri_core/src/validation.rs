//! Food record validation.
//!
//! Checks a food as entered (admin form, catalog file) before it reaches
//! the catalog. The calculator never calls into this module.

use serde::{Deserialize, Serialize};

/// A food as entered, before it is assigned an id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodDraft {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
}

/// Validate a food draft, returning every problem found
///
/// An empty list means the draft is acceptable.
pub fn validate_food(draft: &FoodDraft) -> Vec<String> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push("Food name is required".to_string());
    }

    if draft.calories < 0.0 {
        errors.push("Calories cannot be negative".to_string());
    }

    if draft.protein < 0.0 || draft.carbs < 0.0 || draft.fat < 0.0 {
        errors.push("Macronutrients cannot be negative".to_string());
    }

    if draft.fiber < 0.0 {
        errors.push("Fiber cannot be negative".to_string());
    }

    let values = [
        draft.calories,
        draft.protein,
        draft.carbs,
        draft.fat,
        draft.fiber,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        errors.push("Nutrition values must be finite numbers".to_string());
    }

    errors
}
