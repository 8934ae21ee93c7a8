//! Miette diagnostic wrappers for template warnings and unknown locales.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use varia::parser::TemplateWarning;

/// A miette-compatible diagnostic for a template lint warning.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(varia::lint), severity(Warning))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("this part")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic spanning the part a warning refers to.
    pub fn from_warning(template: &str, delimiter: &str, warning: &TemplateWarning) -> Self {
        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = warning.offset().min(template.len());
        let rest = template.get(offset..).unwrap_or_default();
        let length = if delimiter.is_empty() {
            rest.len()
        } else {
            rest.find(delimiter).unwrap_or(rest.len())
        };

        let help = match warning {
            TemplateWarning::MalformedRule { .. } => {
                "rules are `{n,...}` or an interval such as `[a,b[`; bounds may be -Inf or +Inf"
            }
            TemplateWarning::EmptyInterval { .. } => {
                "the lower bound must not exceed the upper bound"
            }
            TemplateWarning::DuplicateExplicitValue { .. } => {
                "the later part wins; remove one of the bindings"
            }
        };

        TemplateDiagnostic {
            src: NamedSource::new("template", template.to_string()),
            span: (offset, length.max(1)).into(),
            message: warning.to_string(),
            help: Some(help.to_string()),
        }
    }
}

/// An unknown locale, with "did you mean" suggestions.
#[derive(Debug, Error, Diagnostic)]
#[error("no plural rules for locale '{locale}'")]
#[diagnostic(code(varia::locale))]
pub struct LocaleDiagnostic {
    locale: String,

    #[help]
    help: Option<String>,
}

impl LocaleDiagnostic {
    pub fn new(locale: &str, suggestions: &[String]) -> Self {
        let help = (!suggestions.is_empty())
            .then(|| format!("did you mean: {}?", suggestions.join(", ")));
        LocaleDiagnostic {
            locale: locale.to_string(),
            help,
        }
    }
}
