use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::parser::Part;

/// A numeric range with independent inclusivity at each bound.
///
/// Bounds may be infinite. A number is contained when it lies strictly
/// between the bounds, or equals a bound that is inclusive.
///
/// # Example
///
/// ```
/// use varia::IntervalRule;
///
/// // ]10,50[
/// let rule = IntervalRule::new(10.0, 50.0, false, false);
/// assert!(rule.contains(30.0));
/// assert!(!rule.contains(10.0));
/// assert!(!rule.contains(50.0));
///
/// // [-Inf,0[
/// let negative = IntervalRule::new(f64::NEG_INFINITY, 0.0, true, false);
/// assert!(negative.contains(f64::NEG_INFINITY));
/// assert!(negative.contains(-0.5));
/// assert_eq!(negative.to_string(), "[-Inf,0[");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRule {
    pub lower: f64,
    pub upper: f64,
    pub lower_inclusive: bool,
    pub upper_inclusive: bool,
}

impl IntervalRule {
    pub fn new(lower: f64, upper: f64, lower_inclusive: bool, upper_inclusive: bool) -> Self {
        Self {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        }
    }

    /// Check whether `n` satisfies this interval.
    pub fn contains(&self, n: f64) -> bool {
        (self.lower_inclusive && n == self.lower)
            || (self.upper_inclusive && n == self.upper)
            || (self.lower < n && n < self.upper)
    }

    /// Returns true if no number can satisfy this interval.
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
            || (self.lower == self.upper && !self.lower_inclusive && !self.upper_inclusive)
    }
}

impl Display for IntervalRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let open = if self.lower_inclusive { '[' } else { ']' };
        let close = if self.upper_inclusive { ']' } else { '[' };
        write!(
            f,
            "{open}{},{}{close}",
            format_bound(self.lower),
            format_bound(self.upper)
        )
    }
}

fn format_bound(bound: f64) -> String {
    if bound == f64::INFINITY {
        "Inf".to_string()
    } else if bound == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{bound}")
    }
}

/// The parsed form of one raw template.
///
/// Variants are split into three independent collections so selection can
/// apply a fixed priority (explicit, then interval, then plural category)
/// regardless of the order in which they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantSet {
    explicit: BTreeMap<String, String>,
    intervals: Vec<(IntervalRule, String)>,
    ordinals: Vec<String>,
    default: String,
}

impl VariantSet {
    /// Assemble a variant set from classified parts.
    ///
    /// The default variant is the template of the first part, or `raw` when
    /// there are no parts.
    pub fn from_parts(raw: &str, parts: Vec<Part>) -> Self {
        let default = parts
            .first()
            .map_or_else(|| raw.to_string(), |part| part.template().to_string());

        let mut set = VariantSet {
            default,
            ..VariantSet::default()
        };
        for part in parts {
            match part {
                Part::Explicit { values, template } => {
                    for value in values {
                        set.explicit.insert(value, template.clone());
                    }
                }
                Part::Interval { rule, template } => set.intervals.push((rule, template)),
                Part::Plain(template) => set.ordinals.push(template),
            }
        }
        set
    }

    /// Look up the explicit variant bound to a canonical number.
    pub fn explicit(&self, canonical: &str) -> Option<&str> {
        self.explicit.get(canonical).map(String::as_str)
    }

    /// Explicit entries ordered by key.
    pub fn explicit_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.explicit.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Interval rules in declaration order.
    pub fn intervals(&self) -> &[(IntervalRule, String)] {
        &self.intervals
    }

    /// Plain variants in declaration order.
    pub fn ordinals(&self) -> &[String] {
        &self.ordinals
    }

    /// The variant used when nothing else matches.
    pub fn default_variant(&self) -> &str {
        &self.default
    }
}
