#![forbid(unsafe_code)]

//! Core domain model and nutrition math for the Nutri tracker.
//!
//! This crate provides:
//! - Domain types (food nutrition, biometrics, activity levels, breakdowns)
//! - The nutrition calculator (scaling, BMR/TDEE, macro split, formatting)
//! - Food catalog management and search
//! - Food record validation
//! - Meal-day aggregation

pub mod types;
pub mod error;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod validation;
pub mod meals;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use calculator::{
    estimate_bmr, estimate_tdee, format_nutrition, format_nutrition_input, macro_percentages,
    nutrition_facts, scale,
};
pub use catalog::{build_default_catalog, get_default_catalog, FoodCatalog, FoodItem};
pub use config::Config;
pub use validation::{validate_food, FoodDraft};
pub use meals::{daily_totals, DailyTotals, MealEntry};
