//! String filters applied to parameter names and values before substitution.
//!
//! A filter is any `Fn(&str) -> String`. Every parameter is substituted once
//! per filter, so registering [`capitalize`] next to the default
//! [`stringify`] makes both `{name}` and `{Name}` resolve.

use std::sync::Arc;

use icu_casemap::CaseMapper;
use icu_locale_core::langid;
use unicode_segmentation::UnicodeSegmentation;

/// A shareable filter function.
pub type Filter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Identity filter: the value's plain string form.
pub fn stringify(value: &str) -> String {
    value.to_string()
}

/// Full Unicode upper-casing.
///
/// ```
/// assert_eq!(varia::filters::upper("straße"), "STRASSE");
/// ```
pub fn upper(value: &str) -> String {
    String::from(CaseMapper::new().uppercase_to_string(value, &langid!("und")))
}

/// Full Unicode lower-casing.
pub fn lower(value: &str) -> String {
    String::from(CaseMapper::new().lowercase_to_string(value, &langid!("und")))
}

/// Upper-cases the first grapheme cluster.
///
/// ```
/// assert_eq!(varia::filters::capitalize("name"), "Name");
/// assert_eq!(varia::filters::capitalize("émile"), "Émile");
/// ```
pub fn capitalize(value: &str) -> String {
    let mut graphemes = value.graphemes(true);
    match graphemes.next() {
        Some(first) => format!("{}{}", upper(first), graphemes.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_keeps_combining_marks_together() {
        assert_eq!(capitalize("e\u{301}te\u{301}"), "E\u{301}te\u{301}");
    }

    #[test]
    fn empty_input() {
        assert_eq!(capitalize(""), "");
        assert_eq!(upper(""), "");
    }

    #[test]
    fn lower_is_unicode_aware() {
        assert_eq!(lower("ÀÉÎ"), "àéî");
    }
}
