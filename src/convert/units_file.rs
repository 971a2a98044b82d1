//! Configuration data structures used to build a [`Converter`](super::Converter)

use serde::Deserialize;

/// Configuration struct for units
///
/// This structure is designed for deserializing [TOML](https://toml.io/en/),
/// but you can try other formats supported by serde.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnitsFile {
    /// Declared units
    pub units: Vec<UnitEntry>,
}

/// A unit declaration in a [`UnitsFile`]
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UnitEntry {
    /// Full names of the unit
    pub names: Vec<String>,
    /// Symbols (abbreviations) of the unit
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Extra strings the unit can be parsed from
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Gram-equivalent of one of this unit
    pub ratio: f64,
}

#[cfg(feature = "bundled_units")]
impl UnitsFile {
    /// Get the bundled units file
    ///
    /// This is only available with the `bundled_units` feature.
    pub fn bundled() -> Self {
        const TEXT: &str = include_str!("../../units.toml");
        toml::from_str(TEXT).expect("invalid bundled units file")
    }
}

#[cfg(all(test, feature = "bundled_units"))]
mod tests {
    use super::*;

    #[test]
    fn bundled_units_parse() {
        let file = UnitsFile::bundled();
        assert!(!file.units.is_empty());
        let gram = file
            .units
            .iter()
            .find(|u| u.symbols.iter().any(|s| s == "g"))
            .expect("gram unit bundled");
        assert_eq!(gram.ratio, 1.0);
    }
}
