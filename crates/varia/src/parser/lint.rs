//! Static lint rules for variant templates.
//!
//! Parsing is deliberately permissive, so a typo in an interval silently turns
//! it into a plain variant. These rules surface such cases for tooling.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::ast::Part;
use super::variants::parse_part;

/// A warning about a template part. Offsets are byte positions in the raw
/// template.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateWarning {
    /// The part opens like a rule but does not match the rule grammar.
    #[error("part {index} looks like a rule but is treated as a plain variant: '{text}'")]
    MalformedRule {
        index: usize,
        offset: usize,
        text: String,
    },

    /// The interval can never contain any number.
    #[error("part {index} has an empty interval {rule}")]
    EmptyInterval {
        index: usize,
        offset: usize,
        rule: String,
    },

    /// The same explicit value is bound by more than one part.
    #[error("value {value} in part {index} overrides the binding from part {previous}")]
    DuplicateExplicitValue {
        index: usize,
        offset: usize,
        previous: usize,
        value: String,
    },
}

impl TemplateWarning {
    /// Byte offset of the offending part.
    pub fn offset(&self) -> usize {
        match self {
            TemplateWarning::MalformedRule { offset, .. }
            | TemplateWarning::EmptyInterval { offset, .. }
            | TemplateWarning::DuplicateExplicitValue { offset, .. } => *offset,
        }
    }

    /// Index of the offending part.
    pub fn index(&self) -> usize {
        match self {
            TemplateWarning::MalformedRule { index, .. }
            | TemplateWarning::EmptyInterval { index, .. }
            | TemplateWarning::DuplicateExplicitValue { index, .. } => *index,
        }
    }
}

/// Runs all lint rules over a raw template.
///
/// # Example
///
/// ```
/// use varia::parser::{TemplateWarning, lint_template};
///
/// let warnings = lint_template("[0,10 few|many", "|");
/// assert!(matches!(warnings[0], TemplateWarning::MalformedRule { index: 0, .. }));
/// assert!(lint_template("{0}none|{count} apples", "|").is_empty());
/// ```
pub fn lint_template(template: &str, delimiter: &str) -> Vec<TemplateWarning> {
    let mut warnings = Vec::new();
    let mut bound_values: BTreeMap<String, usize> = BTreeMap::new();

    for (index, (offset, text)) in part_offsets(template, delimiter).into_iter().enumerate() {
        match parse_part(text) {
            Part::Plain(_) => {
                if looks_like_rule(text) {
                    warnings.push(TemplateWarning::MalformedRule {
                        index,
                        offset,
                        text: text.to_string(),
                    });
                }
            }
            Part::Interval { rule, .. } => {
                if rule.is_empty() {
                    warnings.push(TemplateWarning::EmptyInterval {
                        index,
                        offset,
                        rule: rule.to_string(),
                    });
                }
            }
            Part::Explicit { values, .. } => {
                for value in values {
                    if let Some(previous) = bound_values.insert(value.clone(), index) {
                        warnings.push(TemplateWarning::DuplicateExplicitValue {
                            index,
                            offset,
                            previous,
                            value,
                        });
                    }
                }
            }
        }
    }
    warnings
}

/// Pair each part with its byte offset in the raw template.
fn part_offsets<'a>(template: &'a str, delimiter: &str) -> Vec<(usize, &'a str)> {
    if delimiter.is_empty() {
        return vec![(0, template)];
    }
    let mut offset = 0;
    template
        .split(delimiter)
        .map(|part| {
            let start = offset;
            offset += part.len() + delimiter.len();
            (start, part)
        })
        .collect()
}

/// A plain part that opens with a rule bracket followed by something numeric.
///
/// `{name}` placeholders are not flagged.
fn looks_like_rule(part: &str) -> bool {
    let mut chars = part.chars();
    let Some(open) = chars.next() else {
        return false;
    };
    let next = chars.as_str().trim_start().chars().next();
    match open {
        '{' => next.is_some_and(|c| c.is_ascii_digit() || c == '-'),
        '[' | ']' => next.is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | 'I')),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_account_for_multi_byte_delimiters() {
        assert_eq!(
            part_offsets("ab::c::", "::"),
            vec![(0, "ab"), (4, "c"), (7, "")]
        );
    }

    #[test]
    fn placeholders_are_not_rules() {
        assert!(!looks_like_rule("{count} apples"));
        assert!(!looks_like_rule("[note] text"));
        assert!(looks_like_rule("{1 apple"));
        assert!(looks_like_rule("]Inf,0]x"));
    }

    #[test]
    fn empty_interval_is_reported() {
        let warnings = lint_template("one|]5,5[never|]9,1]never", "|");
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].index(), 1);
        assert_eq!(warnings[0].offset(), 4);
        assert_eq!(warnings[1].index(), 2);
    }

    #[test]
    fn duplicate_explicit_value_names_both_parts() {
        let warnings = lint_template("{1,2}a|{2.0}b", "|");
        assert_eq!(
            warnings,
            vec![TemplateWarning::DuplicateExplicitValue {
                index: 1,
                offset: 7,
                previous: 0,
                value: "2".into(),
            }]
        );
    }
}
