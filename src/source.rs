//! External data boundaries
//!
//! The engine consumes persistent storage through two narrow traits:
//! [`RecipeRepository`] for recipe/chef/category/ingredient records and
//! [`NutrientSource`] for per-100-unit nutrient profiles. Both return
//! eventually-consistent, read-only snapshots. Implementations live with
//! the storage layer; the engine only defines the contract.
//!
//! This module also sanitizes raw nutrient data ([`process_ingredient`]):
//! remote lookups return user-entered values with mixed casing, accents
//! and non-numeric fields, and nothing dirty may reach the aggregation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::SourceError,
    filter::FilterCriteria,
    model::{Chef, IngredientId, IngredientRef, Recipe, RecipeId},
    nutrition::NutrientProfile,
    text,
};

/// Read access to the recipe store
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch a recipe snapshot, optionally pre-filtered by the backend
    async fn fetch_recipes(
        &self,
        criteria: Option<&FilterCriteria>,
    ) -> Result<Vec<Recipe>, SourceError>;

    async fn fetch_recipe_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, SourceError>;

    /// Chefs whose name contains `term` (case-insensitive)
    async fn search_chefs_by_name(&self, term: &str) -> Result<Vec<Chef>, SourceError>;

    /// Known ingredients whose name contains `term` (case-insensitive)
    async fn search_ingredients_by_name(&self, term: &str)
        -> Result<Vec<IngredientRef>, SourceError>;
}

/// Read access to per-ingredient nutrient profiles
#[async_trait]
pub trait NutrientSource: Send + Sync {
    /// Resolve the profile of one ingredient.
    ///
    /// `Ok(None)` signals an unknown ingredient; the engine degrades to a
    /// zero contribution for it. Only a genuine boundary failure is an
    /// error.
    async fn resolve_profile(
        &self,
        ingredient: IngredientId,
    ) -> Result<Option<NutrientProfile>, SourceError>;
}

/// Nutrient data as it arrives from a remote lookup, before sanitization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawIngredient {
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub unit: Option<String>,
    pub allergens: Vec<String>,
}

/// A sanitized ingredient ready for the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedIngredient {
    /// Normalized name (lowercase, accents folded)
    pub name: String,
    pub profile: NutrientProfile,
    /// Normalized allergen tags, `:`-namespacing preserved
    pub allergens: Vec<String>,
}

/// Sanitize one raw lookup result.
///
/// Missing or non-finite numbers become 0, negative values are clamped,
/// the reference unit is standardized to `g`/`ml`/`un` (defaulting to
/// grams) and the name and allergen tags are normalized for matching.
pub fn process_ingredient(raw: &RawIngredient) -> ProcessedIngredient {
    let number = |v: Option<f64>| match v {
        Some(n) if n.is_finite() => n.max(0.0),
        _ => 0.0,
    };

    let name = raw.name.as_deref().unwrap_or("unknown ingredient");

    ProcessedIngredient {
        name: text::normalize(name),
        profile: NutrientProfile {
            calories: number(raw.calories),
            protein: number(raw.protein),
            carbs: number(raw.carbs),
            fat: number(raw.fat),
            fiber: number(raw.fiber),
            sodium: number(raw.sodium),
            reference_unit: standardize_unit(raw.unit.as_deref()),
        },
        allergens: raw.allergens.iter().map(|a| text::normalize_tag(a)).collect(),
    }
}

/// Map the many spellings remote APIs use for a reference unit onto
/// `g`, `ml` or `un`. Anything unrecognized is grams.
fn standardize_unit(unit: Option<&str>) -> String {
    let Some(unit) = unit else {
        return "g".to_string();
    };
    let lower = unit.to_lowercase();
    if lower.contains("gram") || lower == "g" {
        "g".to_string()
    } else if lower.contains("milliliter") || lower == "ml" {
        "ml".to_string()
    } else if lower.contains("unit") || lower == "un" {
        "un".to_string()
    } else {
        "g".to_string()
    }
}
