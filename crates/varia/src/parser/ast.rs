//! Public types for classified template parts.
//!
//! These types are public to enable external tooling (linters, inspectors).

use crate::types::IntervalRule;

/// One delimiter-separated part of a raw template.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// `{n1,n2,...}text`: bound to exact values.
    ///
    /// `values` holds the canonical form of each listed number.
    Explicit {
        values: Vec<String>,
        template: String,
    },
    /// `[a,b[text` and friends: bound to a numeric range.
    Interval { rule: IntervalRule, template: String },
    /// Anything else, matched positionally against plural categories.
    Plain(String),
}

impl Part {
    /// The variant text this part contributes.
    pub fn template(&self) -> &str {
        match self {
            Part::Explicit { template, .. } | Part::Interval { template, .. } => template,
            Part::Plain(template) => template,
        }
    }

    /// Short name of the part kind, for diagnostics and tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Part::Explicit { .. } => "explicit",
            Part::Interval { .. } => "interval",
            Part::Plain(_) => "plain",
        }
    }
}
