//! Multi-criteria recipe filtering and sorting
//!
//! [`matches`] is the logical AND of independent predicates over one
//! recipe; [`sort_recipes`] orders a collection by a named strategy.
//! Both are pure functions over (collection, criteria): there is no
//! incremental state, every criteria change recomputes from the snapshot.

use std::collections::BTreeSet;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{
    model::{Difficulty, Recipe},
    text,
};

/// Upper position of the prep-time slider
///
/// Reaching it means "unbounded above", not the literal number of
/// minutes: a range ending at this value includes every prep time.
pub const TIME_RANGE_MAX: u32 = 181;

/// Default prep-time range (everything)
pub const DEFAULT_TIME_RANGE: (u32, u32) = (0, TIME_RANGE_MAX);

/// Default servings range, matching the 1..=12 slider
pub const DEFAULT_SERVINGS_RANGE: (u32, u32) = (1, 12);

/// Named orderings for a filtered recipe collection
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortStrategy {
    /// Creation timestamp, newest first
    #[default]
    Newest,
    /// Creation timestamp, oldest first
    Oldest,
    /// Average rating descending; unrated recipes sort as rating 0
    Rating,
    /// Preparation time ascending
    Time,
}

bitflags! {
    /// Which criteria currently differ from their defaults
    ///
    /// Derived from a [`FilterCriteria`] on demand, never stored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ActiveFilters: u32 {
        const SEARCH     = 1 << 0;
        const CATEGORY   = 1 << 1;
        const DIFFICULTY = 1 << 2;
        const TIME       = 1 << 3;
        const SERVINGS   = 1 << 4;
        const RATING     = 1 << 5;
        const ALLERGENS  = 1 << 6;
    }
}

/// The criteria of one discovery session
///
/// Constructed fresh per page view and mutated incrementally by the user.
/// Nothing here is persisted except the `excluded_allergens` seed, which
/// comes from the stored allergy profile via
/// [`FilterCriteria::with_allergy_profile`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub search_term: String,
    /// `None` means "all categories"
    pub category: Option<String>,
    /// `None` means "all difficulties"
    pub difficulty: Option<Difficulty>,
    pub sort_by: SortStrategy,
    /// Inclusive prep-time bounds in minutes; an upper bound of
    /// [`TIME_RANGE_MAX`] or more means unbounded
    pub time_range: (u32, u32),
    /// Inclusive servings bounds
    pub servings_range: (u32, u32),
    /// Minimum average rating, inactive when `None`
    pub min_rating: Option<f64>,
    /// Allergen tags to exclude, only consulted when
    /// `allergen_filter_enabled` is set
    pub excluded_allergens: BTreeSet<String>,
    pub allergen_filter_enabled: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            difficulty: None,
            sort_by: SortStrategy::default(),
            time_range: DEFAULT_TIME_RANGE,
            servings_range: DEFAULT_SERVINGS_RANGE,
            min_rating: None,
            excluded_allergens: BTreeSet::new(),
            allergen_filter_enabled: false,
        }
    }
}

impl FilterCriteria {
    /// Fresh criteria with every filter at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh criteria seeded with the user's stored allergy profile.
    ///
    /// Seeding fills `excluded_allergens` but leaves the filter toggle
    /// off; enabling it is an explicit user action.
    pub fn with_allergy_profile<I, S>(allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_allergens: allergens.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Which criteria differ from their defaults.
    ///
    /// The seeded allergen set alone does not count: allergen filtering is
    /// active only when the toggle is on *and* at least one tag is
    /// excluded. `sort_by` never counts, ordering is not a filter.
    pub fn active(&self) -> ActiveFilters {
        let mut flags = ActiveFilters::empty();
        if !self.search_term.trim().is_empty() {
            flags |= ActiveFilters::SEARCH;
        }
        if self.category.is_some() {
            flags |= ActiveFilters::CATEGORY;
        }
        if self.difficulty.is_some() {
            flags |= ActiveFilters::DIFFICULTY;
        }
        if self.time_range != DEFAULT_TIME_RANGE {
            flags |= ActiveFilters::TIME;
        }
        if self.servings_range != DEFAULT_SERVINGS_RANGE {
            flags |= ActiveFilters::SERVINGS;
        }
        if self.min_rating.is_some() {
            flags |= ActiveFilters::RATING;
        }
        if self.allergen_filter_enabled && !self.excluded_allergens.is_empty() {
            flags |= ActiveFilters::ALLERGENS;
        }
        flags
    }

    /// True if any criterion differs from its default
    pub fn has_active_filters(&self) -> bool {
        !self.active().is_empty()
    }

    /// Reset everything except the seeded allergen set.
    ///
    /// The seed survives a "clear all" so re-enabling the toggle brings
    /// the profile back; the toggle itself is switched off.
    pub fn clear(&mut self) {
        let seed = std::mem::take(&mut self.excluded_allergens);
        *self = Self {
            excluded_allergens: seed,
            ..Self::default()
        };
    }
}

/// Check one recipe against all criteria.
///
/// Logical AND of the independent predicates; an inactive criterion is
/// always true.
pub fn matches(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    matches_search(recipe, criteria)
        && matches_category(recipe, criteria)
        && matches_difficulty(recipe, criteria)
        && matches_time(recipe, criteria)
        && matches_servings(recipe, criteria)
        && matches_rating(recipe, criteria)
        && matches_allergens(recipe, criteria)
}

fn matches_search(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    let term = criteria.search_term.trim();
    term.is_empty()
        || text::contains_ignore_case(&recipe.title, term)
        || text::contains_ignore_case(&recipe.description, term)
}

fn matches_category(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    match &criteria.category {
        None => true,
        // substring match, not exact
        Some(wanted) => recipe
            .categories
            .iter()
            .any(|cat| text::contains_ignore_case(cat, wanted)),
    }
}

fn matches_difficulty(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    match criteria.difficulty {
        None => true,
        Some(wanted) => recipe.difficulty == wanted,
    }
}

fn matches_time(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    let (min, max) = criteria.time_range;
    let unbounded = max >= TIME_RANGE_MAX;
    recipe.prep_time_minutes >= min && (unbounded || recipe.prep_time_minutes <= max)
}

fn matches_servings(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    let (min, max) = criteria.servings_range;
    recipe.servings >= min && recipe.servings <= max
}

fn matches_rating(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    match criteria.min_rating {
        None => true,
        Some(threshold) => recipe.average_rating() >= threshold,
    }
}

fn matches_allergens(recipe: &Recipe, criteria: &FilterCriteria) -> bool {
    if !criteria.allergen_filter_enabled {
        return true;
    }
    recipe
        .allergens
        .iter()
        .all(|tag| !criteria.excluded_allergens.contains(tag))
}

/// Order a recipe collection in place by the given strategy.
///
/// The sort is stable: recipes comparing equal keep their input order,
/// there is no secondary key.
pub fn sort_recipes(recipes: &mut [Recipe], strategy: SortStrategy) {
    recipes.sort_by(|a, b| compare(a, b, strategy));
}

/// Filter a snapshot and order the survivors.
pub fn discover<'a>(recipes: &'a [Recipe], criteria: &FilterCriteria) -> Vec<&'a Recipe> {
    let mut hits: Vec<&Recipe> = recipes.iter().filter(|r| matches(r, criteria)).collect();
    hits.sort_by(|a, b| compare(a, b, criteria.sort_by));
    hits
}

fn compare(a: &Recipe, b: &Recipe, strategy: SortStrategy) -> std::cmp::Ordering {
    match strategy {
        SortStrategy::Newest => b.created_at.cmp(&a.created_at),
        SortStrategy::Oldest => a.created_at.cmp(&b.created_at),
        SortStrategy::Rating => b.average_rating().total_cmp(&a.average_rating()),
        SortStrategy::Time => a.prep_time_minutes.cmp(&b.prep_time_minutes),
    }
}
