//! Error types for the varia interpreter.

use strsim::levenshtein;
use thiserror::Error;

/// The plural-category provider has no rules for a locale.
///
/// Variant selection absorbs this error and falls back to the first plural
/// category; it only reaches callers that query a provider directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("locale not supported: '{locale}'")]
pub struct LocaleNotSupported {
    pub locale: String,
}

impl LocaleNotSupported {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

/// Compute "did you mean" suggestions for an unknown name.
///
/// Returns up to three candidates within edit distance 2, closest first.
pub fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let name = name.to_ascii_lowercase();
    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(|candidate| (levenshtein(&name, candidate), *candidate))
        .filter(|(distance, _)| *distance <= 2)
        .collect();
    scored.sort_unstable();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_are_sorted_by_distance() {
        let suggestions = compute_suggestions("ur", &["en", "ru", "uk", "ar"]);
        assert_eq!(suggestions, vec!["ar", "uk", "en"]);
    }

    #[test]
    fn distant_names_are_not_suggested() {
        assert!(compute_suggestions("klingon", &["en", "ru"]).is_empty());
    }
}
