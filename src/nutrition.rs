//! Nutrient profiles, macro totals and recipe aggregation
//!
//! The aggregation pipeline: each [`IngredientLine`] quantity is converted
//! to grams with the [`Converter`], scaled against the ingredient's
//! per-100 [`NutrientProfile`] and accumulated into [`MacroTotals`].
//! Totals are for the recipe as authored; [`per_serving`] divides them by
//! the serving count. All values stay raw `f64`s internally; rounding is a
//! separate, non-destructive display step.

use enum_map::{enum_map, Enum, EnumMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    convert::Converter,
    error::SourceError,
    model::IngredientId,
    source::NutrientSource,
};

/// Nutrient content of an ingredient, normalized to 100 reference units
///
/// Owned by the [`NutrientSource`]; the engine only reads it. `sodium` is
/// in milligrams, everything else in grams (calories in kcal).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientProfile {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sodium: f64,
    /// Unit the per-100 normalization refers to (`"g"`, `"ml"` or `"un"`)
    pub reference_unit: String,
}

/// One ingredient line of a recipe: a quantity of a referenced ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientLine {
    pub ingredient: IngredientId,
    pub quantity: f64,
    pub unit: String,
}

impl IngredientLine {
    /// Creates a line, sanitizing the quantity: non-finite or negative
    /// input becomes 0. Invalid quantities never raise.
    pub fn new(ingredient: IngredientId, quantity: f64, unit: impl Into<String>) -> Self {
        let quantity = if quantity.is_finite() {
            quantity.max(0.0)
        } else {
            0.0
        };
        Self {
            ingredient,
            quantity,
            unit: unit.into(),
        }
    }
}

/// Macro-nutrient totals, either for a whole recipe or per serving
///
/// All fields are raw, unrounded values; use [`MacroTotals::rounded`] for
/// display so further arithmetic never compounds rounding error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sodium: f64,
}

impl MacroTotals {
    /// Display rounding: calories to the nearest integer, every other
    /// field to one decimal place. Returns a new value, the raw totals
    /// are kept as they are.
    pub fn rounded(&self) -> MacroTotals {
        let one_dp = |v: f64| (v * 10.0).round() / 10.0;
        MacroTotals {
            calories: self.calories.round(),
            protein: one_dp(self.protein),
            carbs: one_dp(self.carbs),
            fat: one_dp(self.fat),
            fiber: one_dp(self.fiber),
            sodium: one_dp(self.sodium),
        }
    }

    fn grams_of(&self, m: Macronutrient) -> f64 {
        match m {
            Macronutrient::Protein => self.protein,
            Macronutrient::Carbs => self.carbs,
            Macronutrient::Fat => self.fat,
        }
    }
}

/// Resolved nutrient profiles keyed by ingredient, in recipe order
pub type ProfileMap = IndexMap<IngredientId, NutrientProfile>;

/// Sum the macro totals of a recipe's ingredient lines.
///
/// Each line resolves its profile in `profiles`; a line without one
/// contributes zero, the computation still succeeds. Summation is
/// commutative, so the result does not depend on line order.
#[tracing::instrument(level = "debug", skip_all, fields(lines = lines.len()))]
pub fn compute_recipe_totals(
    lines: &[IngredientLine],
    profiles: &ProfileMap,
    converter: &Converter,
) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for line in lines {
        let Some(profile) = profiles.get(&line.ingredient) else {
            tracing::debug!(
                ingredient = line.ingredient,
                "missing nutrient profile, contributes zero"
            );
            continue;
        };
        let factor = converter.grams_of(line.quantity, &line.unit) / 100.0;
        totals.calories += factor * profile.calories;
        totals.protein += factor * profile.protein;
        totals.carbs += factor * profile.carbs;
        totals.fat += factor * profile.fat;
        totals.fiber += factor * profile.fiber;
        totals.sodium += factor * profile.sodium;
    }
    totals
}

/// Divide recipe totals by the serving count.
///
/// A serving count of 0 is treated as 1, so this never divides by zero.
pub fn per_serving(totals: &MacroTotals, servings: u32) -> MacroTotals {
    let div = servings.max(1) as f64;
    MacroTotals {
        calories: totals.calories / div,
        protein: totals.protein / div,
        carbs: totals.carbs / div,
        fat: totals.fat / div,
        fiber: totals.fiber / div,
        sodium: totals.sodium / div,
    }
}

/// A calorie-bearing macronutrient
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Hash,
    strum::Display,
    strum::EnumString,
    Enum,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Macronutrient {
    Protein,
    Carbs,
    Fat,
}

impl Macronutrient {
    /// Energy density in kcal per gram
    pub fn kcal_per_gram(self) -> f64 {
        match self {
            Macronutrient::Protein => 4.0,
            Macronutrient::Carbs => 4.0,
            Macronutrient::Fat => 9.0,
        }
    }
}

/// Fraction of the total caloric load contributed by each macronutrient.
///
/// Computed as `grams * kcal_per_gram / total_calories`. When the total
/// calories are 0 (no ingredients yet) every fraction is 0, never NaN.
pub fn caloric_breakdown(totals: &MacroTotals) -> EnumMap<Macronutrient, f64> {
    if totals.calories <= 0.0 {
        return EnumMap::default();
    }
    enum_map! {
        m => totals.grams_of(m) * m.kcal_per_gram() / totals.calories
    }
}

/// Reference daily intake: 2000 kcal, 50 g protein, 300 g carbs, 65 g fat,
/// 25 g fiber, 2300 mg sodium.
pub const DAILY_VALUES: MacroTotals = MacroTotals {
    calories: 2000.0,
    protein: 50.0,
    carbs: 300.0,
    fat: 65.0,
    fiber: 25.0,
    sodium: 2300.0,
};

/// Percent of the reference daily value per macro field, capped at 100
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyValuePercents {
    pub calories: u8,
    pub protein: u8,
    pub carbs: u8,
    pub fat: u8,
    pub fiber: u8,
    pub sodium: u8,
}

/// Percentage of the reference daily intake covered by one serving.
///
/// Values are rounded to the nearest integer and capped at 100 for the
/// progress bars.
pub fn daily_value_percentages(per_serving: &MacroTotals) -> DailyValuePercents {
    let pct = |value: f64, reference: f64| ((value / reference) * 100.0).round().min(100.0) as u8;
    DailyValuePercents {
        calories: pct(per_serving.calories, DAILY_VALUES.calories),
        protein: pct(per_serving.protein, DAILY_VALUES.protein),
        carbs: pct(per_serving.carbs, DAILY_VALUES.carbs),
        fat: pct(per_serving.fat, DAILY_VALUES.fat),
        fiber: pct(per_serving.fiber, DAILY_VALUES.fiber),
        sodium: pct(per_serving.sodium, DAILY_VALUES.sodium),
    }
}

/// Rescale displayed ingredient quantities for a viewer-chosen portion
/// count.
///
/// A recipe authored for `original_servings` viewed at `display_servings`
/// shows each quantity scaled by `display / original`. This is display
/// only: the stored per-serving macro values of the recipe are independent
/// of how many portions the viewer wants listed and must not be recomputed
/// from the result.
pub fn displayed_quantities(
    lines: &[IngredientLine],
    display_servings: u32,
    original_servings: u32,
) -> Vec<IngredientLine> {
    let factor = display_servings.max(1) as f64 / original_servings.max(1) as f64;
    lines
        .iter()
        .map(|line| IngredientLine {
            ingredient: line.ingredient,
            quantity: line.quantity * factor,
            unit: line.unit.clone(),
        })
        .collect()
}

/// Resolve the nutrient profile of every line from the source.
///
/// Each distinct ingredient is resolved once; resolutions run concurrently
/// and the call returns only when all of them finished. An ingredient the
/// source does not know (`Ok(None)`) is simply absent from the map and
/// later contributes zero; a [`SourceError`] aborts the whole resolution
/// and propagates to the caller.
pub async fn resolve_profiles(
    lines: &[IngredientLine],
    source: &dyn NutrientSource,
) -> Result<ProfileMap, SourceError> {
    let mut ids: Vec<IngredientId> = Vec::new();
    for line in lines {
        if !ids.contains(&line.ingredient) {
            ids.push(line.ingredient);
        }
    }

    let resolved =
        futures_util::future::try_join_all(ids.iter().map(|&id| source.resolve_profile(id)))
            .await?;

    let mut profiles = ProfileMap::new();
    for (id, profile) in ids.into_iter().zip(resolved) {
        match profile {
            Some(p) => {
                profiles.insert(id, p);
            }
            None => tracing::warn!(ingredient = id, "ingredient has no nutrient profile"),
        }
    }
    Ok(profiles)
}

/// Resolve all profiles and aggregate in one call.
#[tracing::instrument(level = "debug", skip_all, fields(lines = lines.len()))]
pub async fn compute_totals_resolving(
    lines: &[IngredientLine],
    source: &dyn NutrientSource,
    converter: &Converter,
) -> Result<MacroTotals, SourceError> {
    let profiles = resolve_profiles(lines, source).await?;
    Ok(compute_recipe_totals(lines, &profiles, converter))
}
