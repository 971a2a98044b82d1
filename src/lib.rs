//! Nutrition aggregation and multi-criteria recipe discovery.
//!
//! This crate is the computational core of a recipe-sharing platform:
//! - Converting heterogeneous ingredient quantities into normalized
//!   macro-nutrient totals and per-serving values.
//! - Filtering and sorting a recipe collection across independent,
//!   composable criteria.
//! - Multi-entity search (recipes, chefs, categories, ingredients) with
//!   debouncing and a small persisted query history.
//!
//! Storage, authentication and presentation are external collaborators,
//! consumed through the [`source`] traits. The engine operates on
//! snapshots and holds no mutable state besides the recent-query list.
//!
//! # Basic usage
//!
//! Aggregate a recipe's ingredient lines into macro totals:
//!
//! ```rust
//! use nutridex::{Converter, IngredientLine, NutrientProfile};
//! use nutridex::nutrition::{self, ProfileMap};
//!
//! let converter = Converter::default();
//! let lines = vec![IngredientLine::new(1, 150.0, "g")];
//!
//! let mut profiles = ProfileMap::new();
//! profiles.insert(1, NutrientProfile {
//!     calories: 165.0,
//!     protein: 31.0,
//!     carbs: 0.0,
//!     fat: 3.6,
//!     fiber: 0.0,
//!     sodium: 74.0,
//!     reference_unit: "g".into(),
//! });
//!
//! let totals = nutrition::compute_recipe_totals(&lines, &profiles, &converter);
//! assert_eq!(totals.calories, 247.5);
//! assert_eq!(totals.protein, 46.5);
//! ```
//!
//! Filtering and sorting are pure functions over a snapshot; see
//! [`filter::discover`]. Keystroke search goes through
//! [`search::DebouncedSearch`], which needs a tokio runtime.

#![warn(rustdoc::broken_intra_doc_links, clippy::doc_markdown)]

pub mod convert;
pub mod error;
pub mod filter;
pub mod model;
pub mod nutrition;
pub mod search;
pub mod session;
pub mod source;
pub mod wellness;

mod text;

pub use convert::Converter;
pub use error::{HistoryError, SourceError};
pub use filter::{discover, matches, sort_recipes, ActiveFilters, FilterCriteria, SortStrategy};
pub use model::*;
pub use nutrition::{
    caloric_breakdown, compute_recipe_totals, daily_value_percentages, displayed_quantities,
    per_serving, IngredientLine, MacroTotals, Macronutrient, NutrientProfile,
};
pub use search::{DebouncedSearch, MultiEntitySearch, SearchResults, SearchUpdate};
pub use session::{MemoryHistoryStore, QueryHistoryStore, SearchSession};
pub use source::{NutrientSource, RecipeRepository};

#[cfg(test)]
pub(crate) mod test_support;
