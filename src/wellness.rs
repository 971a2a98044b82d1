//! Standalone wellness calculators
//!
//! The platform's tools page: body-mass index and daily macro targets.
//! Pure functions, no engine state involved.

use serde::{Deserialize, Serialize};

/// Body-mass classification bands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiClass {
    /// Classify a body-mass index: `< 18.5` underweight, `< 25` normal,
    /// `< 30` overweight, obese above.
    pub fn of(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiClass::Underweight
        } else if bmi < 25.0 {
            BmiClass::Normal
        } else if bmi < 30.0 {
            BmiClass::Overweight
        } else {
            BmiClass::Obese
        }
    }
}

/// Body-mass index from weight in kilograms and height in meters.
///
/// A non-positive or non-finite height yields 0 instead of dividing by
/// zero; the inputs are free-typed form fields.
pub fn body_mass_index(weight_kg: f64, height_m: f64) -> f64 {
    if !height_m.is_finite() || height_m <= 0.0 || !weight_kg.is_finite() || weight_kg < 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

/// Physical activity level and its energy-expenditure multiplier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
    VeryIntense,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
            ActivityLevel::VeryIntense => 1.9,
        }
    }
}

/// Dietary goal adjusting the calorie budget
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn calorie_adjustment(self) -> f64 {
        match self {
            Goal::Lose => 0.8,
            Goal::Maintain => 1.0,
            Goal::Gain => 1.2,
        }
    }
}

/// Daily calorie budget and macro split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// kcal per day
    pub calories: f64,
    /// grams per day
    pub protein: f64,
    /// grams per day
    pub carbs: f64,
    /// grams per day
    pub fat: f64,
}

/// Compute daily targets from body data, activity and goal.
///
/// Basal rate is `10·weight + 6.25·height − 5·age + 5`, scaled by the
/// activity multiplier and the goal adjustment. The split: protein at
/// 2 g per kg of body weight, fat at 25 % of calories (9 kcal/g), carbs
/// take the remaining calories at 4 kcal/g.
pub fn macro_targets(
    age_years: u32,
    weight_kg: f64,
    height_cm: f64,
    activity: ActivityLevel,
    goal: Goal,
) -> MacroTargets {
    let basal = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + 5.0;
    let calories = basal * activity.multiplier() * goal.calorie_adjustment();

    let protein = weight_kg * 2.0;
    let fat = calories * 0.25 / 9.0;
    let carbs = (calories - protein * 4.0 - fat * 9.0) / 4.0;

    MacroTargets {
        calories,
        protein,
        carbs,
        fat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_bands() {
        assert_eq!(BmiClass::of(body_mass_index(50.0, 1.75)), BmiClass::Underweight);
        assert_eq!(BmiClass::of(body_mass_index(70.0, 1.75)), BmiClass::Normal);
        assert_eq!(BmiClass::of(body_mass_index(85.0, 1.75)), BmiClass::Overweight);
        assert_eq!(BmiClass::of(body_mass_index(110.0, 1.75)), BmiClass::Obese);
    }

    #[test]
    fn bmi_never_divides_by_zero() {
        assert_eq!(body_mass_index(70.0, 0.0), 0.0);
        assert_eq!(body_mass_index(70.0, f64::NAN), 0.0);
    }

    #[test]
    fn maintenance_targets() {
        let targets = macro_targets(30, 70.0, 175.0, ActivityLevel::Moderate, Goal::Maintain);
        let expected_calories = (700.0 + 1093.75 - 150.0 + 5.0) * 1.55;
        assert!((targets.calories - expected_calories).abs() < 1e-9);
        assert_eq!(targets.protein, 140.0);
        // the split adds back up to the calorie budget
        let total = targets.protein * 4.0 + targets.carbs * 4.0 + targets.fat * 9.0;
        assert!((total - targets.calories).abs() < 1e-9);
    }

    #[test]
    fn goals_scale_the_budget() {
        let maintain = macro_targets(25, 60.0, 165.0, ActivityLevel::Light, Goal::Maintain);
        let lose = macro_targets(25, 60.0, 165.0, ActivityLevel::Light, Goal::Lose);
        let gain = macro_targets(25, 60.0, 165.0, ActivityLevel::Light, Goal::Gain);
        assert!((lose.calories - maintain.calories * 0.8).abs() < 1e-9);
        assert!((gain.calories - maintain.calories * 1.2).abs() < 1e-9);
    }
}
