//! Shared fixtures for unit tests

use chrono::{TimeZone, Utc};

use crate::model::{Author, Difficulty, Recipe, RecipeId};
use crate::nutrition::MacroTotals;

pub(crate) fn recipe(id: RecipeId, title: &str, description: &str) -> Recipe {
    Recipe {
        id,
        title: title.into(),
        description: description.into(),
        image_url: None,
        prep_time_minutes: 30,
        servings: 2,
        difficulty: Difficulty::Easy,
        rating: Some(4.5),
        ratings_count: 3,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        author: Author {
            id: "chef-1".into(),
            name: "Ana".into(),
            avatar_url: None,
        },
        categories: vec!["Proteico".into()],
        allergens: Vec::new(),
        macros: MacroTotals::default(),
    }
}
