//! Allergen safety filter
//!
//! Matching is deliberately conservative and fixed in one direction: a
//! recipe is unsafe when any lowercased ingredient name contains a
//! normalized allergen as a substring. "shellfish" therefore excludes
//! "Shellfish Stock" but not "Shrimp"; category-level matching is out of
//! scope. Excluding a safe recipe is acceptable, suggesting an unsafe one
//! is not.

/// Normalizes one declared allergen: trims, lowercases and strips residual
/// list-literal punctuation (brackets and quotes) left by upstream storage.
pub fn normalize_allergen(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Normalizes a user's full allergen list, dropping entries that normalize
/// to nothing
pub fn normalize_allergens(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|a| normalize_allergen(a))
        .filter(|a| !a.is_empty())
        .collect()
}

/// True when no ingredient name contains any of the normalized allergens
pub fn is_safe(ingredient_names: &[String], normalized_allergens: &[String]) -> bool {
    !ingredient_names.iter().any(|name| {
        let name = name.to_lowercase();
        normalized_allergens
            .iter()
            .any(|allergen| name.contains(allergen.as_str()))
    })
}
