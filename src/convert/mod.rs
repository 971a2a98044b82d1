//! Support for **configurable** unit conversion
//!
//! This includes:
//! - A unit table loaded from a [`UnitsFile`]
//! - Lossy conversion of recipe-line quantities to grams
//! - Exact conversion between two known units

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use thiserror::Error;

pub use units_file::UnitsFile;

pub mod units_file;

/// Main struct to perform conversions
///
/// This holds all the known units and their ratios relative to one gram.
/// Volume units carry the gram-equivalent ratio of water, because nutrient
/// profiles are normalized per 100 grams *or* milliliters interchangeably.
///
/// [`Converter::default`] changes with the feature `bundled_units`:
/// - When enabled, [`Converter::bundled`].
/// - When disabled, [`Converter::empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    all_units: Vec<Arc<Unit>>,
    unit_index: UnitIndex,
}

impl Converter {
    /// Empty converter
    ///
    /// This is the default when the `bundled_units` feature is disabled.
    ///
    /// An empty converter knows no units, so [`Converter::grams_of`] treats
    /// every quantity as already-grams and [`Converter::convert`] fails for
    /// everything.
    pub fn empty() -> Self {
        Self {
            all_units: Default::default(),
            unit_index: Default::default(),
        }
    }

    /// Converter with the bundled units
    ///
    /// The bundled table covers the units recipe authors actually type:
    /// metric mass and volume, kitchen measures and their Portuguese
    /// aliases.
    ///
    /// This is only available when the `bundled_units` feature is enabled.
    ///
    /// This is the default when the `bundled_units` feature is enabled.
    #[cfg(feature = "bundled_units")]
    pub fn bundled() -> Self {
        Self::from_units_file(UnitsFile::bundled()).unwrap()
    }

    /// Build a converter from a [`UnitsFile`]
    pub fn from_units_file(file: UnitsFile) -> Result<Self, ConverterBuildError> {
        let mut all_units = Vec::with_capacity(file.units.len());
        let mut unit_index = UnitIndex::default();

        for entry in file.units {
            if entry.names.is_empty() && entry.symbols.is_empty() && entry.aliases.is_empty() {
                return Err(ConverterBuildError::EmptyUnit);
            }
            if !entry.ratio.is_finite() || entry.ratio <= 0.0 {
                return Err(ConverterBuildError::InvalidRatio {
                    unit: entry.names.first().cloned().unwrap_or_default(),
                    ratio: entry.ratio,
                });
            }

            let unit = Arc::new(Unit {
                names: entry.names.into_iter().map(Arc::from).collect(),
                symbols: entry.symbols.into_iter().map(Arc::from).collect(),
                aliases: entry.aliases.into_iter().map(Arc::from).collect(),
                ratio: entry.ratio,
            });

            let id = all_units.len();
            for key in unit.all_keys() {
                let key: Arc<str> = Arc::from(key.to_lowercase());
                if unit_index.0.insert(Arc::clone(&key), id).is_some() {
                    return Err(ConverterBuildError::DuplicateKey(key.to_string()));
                }
            }
            all_units.push(unit);
        }

        Ok(Self {
            all_units,
            unit_index,
        })
    }

    /// Get the total number of known units.
    ///
    /// This is **not** all the known unit names, just **different units**.
    pub fn unit_count(&self) -> usize {
        self.all_units.len()
    }

    /// Get an iterator of all the known units.
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.all_units.iter().map(|u| u.as_ref())
    }

    /// Find a unit by any of it's names, symbols or aliases
    ///
    /// Lookup is case insensitive.
    pub fn find_unit(&self, unit: &str) -> Option<Arc<Unit>> {
        let uid = self.unit_index.get_unit_id(unit).ok()?;
        Some(Arc::clone(&self.all_units[uid]))
    }

    /// Convert a recipe-line quantity to grams.
    ///
    /// This never fails:
    /// - A non-finite or negative quantity is clamped to 0 before
    ///   multiplying.
    /// - An unknown unit falls back to ratio 1, treating the value as
    ///   already-grams. Ingredient data is user-entered and a typo in a
    ///   unit must not block nutrition computation.
    pub fn grams_of(&self, quantity: f64, unit: &str) -> f64 {
        let quantity = if quantity.is_finite() {
            quantity.max(0.0)
        } else {
            0.0
        };

        let ratio = match self.unit_index.get_unit_id(unit) {
            Ok(id) => self.all_units[id].ratio,
            Err(_) => {
                tracing::debug!("unknown unit '{unit}', treating as grams");
                1.0
            }
        };

        quantity * ratio
    }

    /// Convert a value between two known units.
    ///
    /// Unlike [`Converter::grams_of`], both units must be known here: this
    /// backs the standalone measure-converter tool where the user picks
    /// units from the table, so an unknown key is a real error.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnknownUnit> {
        let from = &self.all_units[self.unit_index.get_unit_id(from)?];
        let to = &self.all_units[self.unit_index.get_unit_id(to)?];
        Ok(value * from.ratio / to.ratio)
    }
}

#[cfg(not(feature = "bundled_units"))]
impl Default for Converter {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(feature = "bundled_units")]
impl Default for Converter {
    fn default() -> Self {
        Self::bundled()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct UnitIndex(HashMap<Arc<str>, usize>);

impl UnitIndex {
    fn get_unit_id(&self, key: &str) -> Result<usize, UnknownUnit> {
        self.0
            .get(key.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnknownUnit(key.to_string()))
    }
}

/// A unit
///
/// Conversion to grams is `val * [Self::ratio]`.
///
/// It implements [Display](std::fmt::Display). It will use [`Self::symbol`]
/// or, if alternate (`#`) is given, it will try the first name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Unit {
    /// All the names that may be used to format the unit
    pub names: Vec<Arc<str>>,
    /// All the symbols (abbreviations), like `ml` for `millilitres`
    pub symbols: Vec<Arc<str>>,
    /// Custom aliases to parse the unit from a different string
    pub aliases: Vec<Arc<str>>,
    /// Gram-equivalent of one of this unit
    pub ratio: f64,
}

impl Unit {
    fn all_keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.names.iter().chain(&self.symbols).chain(&self.aliases)
    }

    /// Get the symbol that represent this unit. The process is:
    /// - First symbol (if any)
    /// - Or first name (if any)
    /// - Or first alias (if any)
    /// - **panics**
    pub fn symbol(&self) -> &str {
        self.symbols
            .first()
            .or_else(|| self.names.first())
            .or_else(|| self.aliases.first())
            .expect("symbol, name or alias in unit")
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() && !self.names.is_empty() {
            write!(f, "{}", self.names[0])
        } else {
            write!(f, "{}", self.symbol())
        }
    }
}

/// Error when try to convert an unknown unit
#[derive(Debug, Error)]
#[error("Unknown unit: '{0}'")]
pub struct UnknownUnit(pub String);

/// Errors building a [`Converter`] from a [`UnitsFile`]
#[derive(Debug, Error)]
pub enum ConverterBuildError {
    #[error("Duplicate unit key: '{0}'")]
    DuplicateKey(String),

    #[error("Unit with no names, symbols or aliases")]
    EmptyUnit,

    #[error("Invalid conversion ratio for '{unit}': {ratio}")]
    InvalidRatio { unit: String, ratio: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[cfg(feature = "bundled_units")]
    #[test_case(2.0, "kg" => 2000.0 ; "kilograms")]
    #[test_case(150.0, "g" => 150.0 ; "grams")]
    #[test_case(500.0, "mg" => 0.5 ; "milligrams")]
    #[test_case(1.0, "xicara" => 120.0 ; "cup alias")]
    #[test_case(2.0, "tbsp" => 30.0 ; "tablespoons")]
    #[test_case(3.0, "colher de chá" => 15.0 ; "teaspoons pt")]
    #[test_case(5.0, "unknown-unit" => 5.0 ; "unknown unit falls back to grams")]
    #[test_case(-3.0, "kg" => 0.0 ; "negative clamps to zero")]
    #[test_case(f64::NAN, "g" => 0.0 ; "nan clamps to zero")]
    #[test_case(f64::INFINITY, "g" => 0.0 ; "infinity clamps to zero")]
    fn grams_of(quantity: f64, unit: &str) -> f64 {
        Converter::bundled().grams_of(quantity, unit)
    }

    #[cfg(feature = "bundled_units")]
    #[test]
    fn convert_between_known_units() {
        let converter = Converter::bundled();
        assert_eq!(
            converter.convert(2.0, "xicara", "colher-sopa").unwrap(),
            16.0
        );
        assert_eq!(converter.convert(1.5, "l", "ml").unwrap(), 1500.0);
    }

    #[cfg(feature = "bundled_units")]
    #[test]
    fn convert_rejects_unknown_units() {
        let converter = Converter::bundled();
        assert!(converter.convert(1.0, "parsec", "g").is_err());
        assert!(converter.convert(1.0, "g", "parsec").is_err());
    }

    #[cfg(feature = "bundled_units")]
    #[test]
    fn lookup_is_case_insensitive() {
        let converter = Converter::bundled();
        assert_eq!(converter.grams_of(1.0, "KG"), 1000.0);
        assert!(converter.find_unit("Xícara").is_some());
    }

    #[test]
    fn empty_converter_knows_nothing() {
        let converter = Converter::empty();
        assert_eq!(converter.unit_count(), 0);
        // still usable, everything is grams
        assert_eq!(converter.grams_of(2.0, "kg"), 2.0);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let file = UnitsFile {
            units: vec![
                units_file::UnitEntry {
                    names: vec!["gram".into()],
                    symbols: vec!["g".into()],
                    aliases: vec![],
                    ratio: 1.0,
                },
                units_file::UnitEntry {
                    names: vec!["gros".into()],
                    symbols: vec!["g".into()],
                    aliases: vec![],
                    ratio: 144.0,
                },
            ],
        };
        assert!(matches!(
            Converter::from_units_file(file),
            Err(ConverterBuildError::DuplicateKey(k)) if k == "g"
        ));
    }
}
