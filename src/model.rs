//! Recipe and searchable-entity representation
//!
//! These are snapshot records handed over by the repository. The engine
//! never mutates them; every computation takes them by reference and
//! returns new values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::nutrition::MacroTotals;

/// Identifier of a recipe in the repository
pub type RecipeId = u64;
/// Identifier of a category in the repository
pub type CategoryId = u64;
/// Identifier of a known ingredient in the nutrient source
pub type IngredientId = u64;
/// Identifier of a chef account (owned by the auth collaborator)
pub type ChefId = String;

/// A published recipe, as loaded from the repository
///
/// `macros` holds the authored-and-stored **per-serving** values. They are
/// fixed at publish time and never change with the viewer's chosen display
/// portion count (see [`displayed_quantities`](crate::nutrition::displayed_quantities)).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub description: String,
    pub image_url: Option<Url>,
    /// Preparation time in minutes
    pub prep_time_minutes: u32,
    /// Number of servings the recipe was authored for
    pub servings: u32,
    pub difficulty: Difficulty,
    /// Average rating. [`None`] when the recipe has no ratings yet.
    pub rating: Option<f64>,
    pub ratings_count: u32,
    pub created_at: DateTime<Utc>,
    pub author: Author,
    /// Category names, zero or more
    pub categories: Vec<String>,
    /// Allergen tags derived transitively from the ingredients
    ///
    /// Tagging itself happens outside the engine; these arrive already
    /// normalized (see [`process_ingredient`](crate::source::process_ingredient)).
    pub allergens: Vec<String>,
    /// Authored per-serving macro values
    pub macros: MacroTotals,
}

impl Recipe {
    /// Average rating with unrated recipes counting as 0.
    ///
    /// Sorting and rating filters treat missing ratings this way so new
    /// recipes are ranked last instead of excluded.
    pub fn average_rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Recipe author summary embedded in a [`Recipe`]
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Author {
    pub id: ChefId,
    pub name: String,
    pub avatar_url: Option<Url>,
}

/// Difficulty label of a recipe
///
/// Parsed case-insensitively from the English or Portuguese labels the
/// platform has used (`"easy"`, `"Fácil"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    #[strum(to_string = "easy", serialize = "fácil", serialize = "facil")]
    Easy,
    #[strum(to_string = "medium", serialize = "médio", serialize = "medio")]
    Medium,
    #[strum(to_string = "hard", serialize = "difícil", serialize = "dificil")]
    Hard,
}

/// A chef profile, as returned by the repository's name lookup
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Chef {
    pub id: ChefId,
    pub name: String,
    pub avatar_url: Option<Url>,
}

/// A recipe category
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Inactive categories stay on old recipes but are hidden from pickers
    pub active: bool,
}

/// A known ingredient, as returned by the repository's name lookup
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct IngredientRef {
    pub id: IngredientId,
    pub name: String,
}
