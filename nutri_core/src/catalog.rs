//! Food catalog and search.
//!
//! This module provides the built-in reference foods, lookup and
//! case-insensitive search, admin-style edits, and loading a replacement
//! catalog from a JSON or CSV file.

use crate::validation::{validate_food, FoodDraft};
use crate::{Error, FoodNutrition, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// A food record in the search-service shape
///
/// Values are per unit consumed (calories in kcal, the rest in grams).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl FoodItem {
    fn from_draft(id: String, draft: FoodDraft) -> Self {
        FoodItem {
            id,
            name: draft.name,
            calories: draft.calories,
            protein: draft.protein,
            carbs: draft.carbs,
            fat: draft.fat,
            fiber: draft.fiber,
            created_at: Utc::now(),
        }
    }

    /// Per-unit values used by the calculator
    pub fn nutrition(&self) -> FoodNutrition {
        FoodNutrition {
            calories_per_unit: self.calories,
            protein_grams_per_unit: self.protein,
            carbs_grams_per_unit: self.carbs,
            fat_grams_per_unit: self.fat,
        }
    }

    pub fn draft(&self) -> FoodDraft {
        FoodDraft {
            name: self.name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
        }
    }
}

/// Row format for catalog files; `id` may be omitted
#[derive(Debug, Deserialize)]
struct FoodRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    #[serde(default)]
    fiber: f64,
}

impl FoodRecord {
    fn into_parts(self) -> (Option<String>, FoodDraft) {
        let id = self.id.filter(|id| !id.trim().is_empty());
        let draft = FoodDraft {
            name: self.name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
        };
        (id, draft)
    }
}

/// An ordered collection of foods
///
/// Foods keep insertion order, so listings and search results are stable.
#[derive(Clone, Debug, Default)]
pub struct FoodCatalog {
    foods: Vec<FoodItem>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<FoodCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static FoodCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog of common reference foods
///
/// Prefer `get_default_catalog()` unless the catalog is going to be edited.
pub fn build_default_catalog() -> FoodCatalog {
    // name, calories, protein, carbs, fat, fiber
    const SEED: [(&str, f64, f64, f64, f64, f64); 15] = [
        ("Apple", 52.0, 0.3, 14.0, 0.2, 2.4),
        ("Banana", 89.0, 1.1, 23.0, 0.3, 2.6),
        ("Chicken Breast", 165.0, 31.0, 0.0, 3.6, 0.0),
        ("Salmon", 208.0, 22.0, 0.0, 12.0, 0.0),
        ("Brown Rice", 111.0, 2.6, 23.0, 0.9, 1.8),
        ("Broccoli", 34.0, 2.8, 7.0, 0.4, 2.6),
        ("Eggs", 155.0, 13.0, 1.1, 11.0, 0.0),
        ("Greek Yogurt", 59.0, 10.0, 3.6, 0.4, 0.0),
        ("Quinoa", 120.0, 4.4, 22.0, 1.9, 2.8),
        ("Spinach", 23.0, 2.9, 3.6, 0.4, 2.2),
        ("Sweet Potato", 86.0, 1.6, 20.0, 0.1, 3.0),
        ("Almonds", 576.0, 21.0, 22.0, 49.0, 12.0),
        ("Avocado", 160.0, 2.0, 9.0, 15.0, 7.0),
        ("Oatmeal", 68.0, 2.4, 12.0, 1.4, 1.7),
        ("Turkey", 135.0, 25.0, 0.0, 3.2, 0.0),
    ];

    let foods = SEED
        .iter()
        .map(|&(name, calories, protein, carbs, fat, fiber)| {
            FoodItem::from_draft(
                slug(name),
                FoodDraft {
                    name: name.into(),
                    calories,
                    protein,
                    carbs,
                    fat,
                    fiber,
                },
            )
        })
        .collect();

    FoodCatalog { foods }
}

/// Stable id for a built-in food ("Brown Rice" -> "brown_rice")
fn slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All foods in insertion order
    pub fn all(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Look up a food by exact id
    pub fn get(&self, id: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|food| food.id == id)
    }

    /// Look up a food by id, falling back to a case-insensitive name match
    pub fn find(&self, id_or_name: &str) -> Option<&FoodItem> {
        let needle = id_or_name.trim();
        self.get(needle).or_else(|| {
            let lower = needle.to_lowercase();
            self.foods
                .iter()
                .find(|food| food.name.to_lowercase() == lower)
        })
    }

    /// Case-insensitive substring search on food names
    ///
    /// A blank query returns nothing rather than the whole catalog.
    pub fn search(&self, query: &str) -> Vec<&FoodItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let results: Vec<&FoodItem> = self
            .foods
            .iter()
            .filter(|food| food.name.to_lowercase().contains(&query))
            .collect();

        tracing::debug!("Search {:?} matched {} foods", query, results.len());
        results
    }

    /// Add a new food, returning its generated id
    pub fn add_food(&mut self, draft: FoodDraft) -> Result<String> {
        check_draft(&draft)?;

        let id = Uuid::new_v4().to_string();
        tracing::info!("Added food {:?} ({})", draft.name, id);
        self.foods.push(FoodItem::from_draft(id.clone(), draft));
        Ok(id)
    }

    /// Replace the values of an existing food, keeping its id and timestamp
    pub fn update_food(&mut self, id: &str, draft: FoodDraft) -> Result<()> {
        check_draft(&draft)?;

        let food = self
            .foods
            .iter_mut()
            .find(|food| food.id == id)
            .ok_or_else(|| Error::FoodNotFound(id.to_string()))?;

        food.name = draft.name;
        food.calories = draft.calories;
        food.protein = draft.protein;
        food.carbs = draft.carbs;
        food.fat = draft.fat;
        food.fiber = draft.fiber;

        tracing::info!("Updated food {:?} ({})", food.name, id);
        Ok(())
    }

    /// Remove a food, returning it
    pub fn delete_food(&mut self, id: &str) -> Result<FoodItem> {
        let index = self
            .foods
            .iter()
            .position(|food| food.id == id)
            .ok_or_else(|| Error::FoodNotFound(id.to_string()))?;

        let removed = self.foods.remove(index);
        tracing::info!("Deleted food {:?} ({})", removed.name, id);
        Ok(removed)
    }

    /// Validate catalog integrity
    ///
    /// Returns a list of validation errors (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for food in &self.foods {
            if food.id.trim().is_empty() {
                errors.push(format!("Food '{}' has empty ID", food.name));
            } else if !seen.insert(food.id.as_str()) {
                errors.push(format!("Duplicate food ID '{}'", food.id));
            }

            for problem in validate_food(&food.draft()) {
                errors.push(format!("Food '{}': {}", food.id, problem));
            }
        }

        errors
    }

    /// Load a catalog from a `.json` or `.csv` file
    ///
    /// JSON files hold an array of food records; CSV files need the header
    /// `name,calories,protein,carbs,fat,fiber` with an optional `id` column.
    /// Records without an id get a generated one.
    pub fn load_from(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        let records: Vec<FoodRecord> = match extension.as_deref() {
            Some("json") => {
                let contents = std::fs::read_to_string(path)?;
                serde_json::from_str(&contents)?
            }
            Some("csv") => {
                let mut reader = csv::Reader::from_path(path)?;
                reader
                    .deserialize()
                    .collect::<std::result::Result<Vec<FoodRecord>, csv::Error>>()?
            }
            _ => {
                return Err(Error::CatalogValidation(format!(
                    "Unsupported catalog format: {:?} (expected .json or .csv)",
                    path
                )))
            }
        };

        let foods = records
            .into_iter()
            .map(|record| {
                let (id, draft) = record.into_parts();
                let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
                FoodItem::from_draft(id, draft)
            })
            .collect();

        let catalog = FoodCatalog { foods };
        let errors = catalog.validate();
        if !errors.is_empty() {
            for error in &errors {
                tracing::warn!("Catalog {:?}: {}", path, error);
            }
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        tracing::info!("Loaded {} foods from {:?}", catalog.len(), path);
        Ok(catalog)
    }
}

fn check_draft(draft: &FoodDraft) -> Result<()> {
    let errors = validate_food(draft);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::CatalogValidation(errors.join("; ")))
    }
}
