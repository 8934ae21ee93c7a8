//! CLI command implementations.

mod categories;
mod eval;
mod inspect;

pub use categories::{run_categories, CategoriesArgs};
pub use eval::{run_eval, EvalArgs};
pub use inspect::{run_inspect, InspectArgs};

use miette::Report;
use varia::{compute_suggestions, primary_subtag, CldrPluralRegistry, PluralDetectorRegistry};

use crate::output::LocaleDiagnostic;

/// Parse a `key=value` argument.
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Report a locale without plural rules and return the exit code.
pub(crate) fn unknown_locale(locale: &str) -> i32 {
    let language = primary_subtag(locale);
    let registry = CldrPluralRegistry::new();
    let suggestions = compute_suggestions(language, &registry.supported_locales());
    eprintln!("{:?}", Report::new(LocaleDiagnostic::new(locale, &suggestions)));
    exitcode::DATAERR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("%%=%"),
            Ok(("%%".to_string(), "%".to_string()))
        );
        assert_eq!(
            parse_key_val("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_val("count").is_err());
    }

    #[test]
    fn unsupported_locale_is_a_data_error() {
        assert_eq!(unknown_locale("tlh_QO"), exitcode::DATAERR);
    }
}
