//! Meal-day aggregation.
//!
//! A meal entry snapshots the scaled nutrition of one food at the time it
//! was eaten; daily totals sum the entries of a single date.

use crate::calculator::{macro_percentages, scale};
use crate::catalog::FoodItem;
use crate::{MacroBreakdown, Quantity, ScaledNutrition};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One food eaten on a given date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub food_id: String,
    pub food_name: String,
    pub quantity: Quantity,
    pub date: NaiveDate,
    pub nutrition: ScaledNutrition,
    pub fiber_grams: f64,
}

impl MealEntry {
    /// Snapshot a food's nutrition for the consumed quantity
    pub fn new(food: &FoodItem, quantity: impl Into<Quantity>, date: NaiveDate) -> Self {
        let quantity = quantity.into();
        MealEntry {
            food_id: food.id.clone(),
            food_name: food.name.clone(),
            quantity,
            date,
            nutrition: scale(&food.nutrition(), quantity),
            fiber_grams: food.fiber * quantity.value(),
        }
    }
}

/// Summed nutrition for one day
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: Option<NaiveDate>,
    pub entries: usize,
    pub nutrition: ScaledNutrition,
    pub fiber_grams: f64,
}

impl DailyTotals {
    pub fn macro_breakdown(&self) -> MacroBreakdown {
        macro_percentages(
            self.nutrition.protein_grams,
            self.nutrition.carbs_grams,
            self.nutrition.fat_grams,
        )
    }
}

/// Sum the entries that fall on `date`
pub fn daily_totals(entries: &[MealEntry], date: NaiveDate) -> DailyTotals {
    let todays: Vec<&MealEntry> = entries.iter().filter(|e| e.date == date).collect();

    DailyTotals {
        date: Some(date),
        entries: todays.len(),
        nutrition: todays.iter().map(|e| e.nutrition).sum(),
        fiber_grams: todays.iter().map(|e| e.fiber_grams).sum(),
    }
}
