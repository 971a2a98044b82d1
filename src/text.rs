//! Text normalization for matching user-entered data
//!
//! Titles, category names and ingredient names come from users (and remote
//! nutrient APIs) in mixed case and with Portuguese diacritics. Matching is
//! always done on a folded form.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static NON_ALNUM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s:]").unwrap());

/// Normalize free text: lowercase, diacritics folded, everything outside
/// `[a-z0-9\s]` stripped, surrounding whitespace trimmed.
pub(crate) fn normalize(text: &str) -> String {
    let folded = fold_diacritics(&text.to_lowercase());
    NON_ALNUM.replace_all(&folded, "").trim().to_string()
}

/// Same as [`normalize`] but keeps `:`, used for namespaced allergen tags.
pub(crate) fn normalize_tag(text: &str) -> String {
    let folded = fold_diacritics(&text.to_lowercase());
    NON_ALNUM_TAG.replace_all(&folded, "").trim().to_string()
}

/// Case-insensitive substring containment.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Fold the Latin diacritics that show up in recipe data to their base
/// letter. Input is expected to be lowercase already.
fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}
