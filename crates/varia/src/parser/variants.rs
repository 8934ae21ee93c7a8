//! Variant template parser using winnow.
//!
//! Recognizes two rule forms at the start of a part:
//! - Explicit values: `{0}`, `{1, 2, 3}`
//! - Intervals: `[0,10]`, `]10,50[`, `[-Inf,0[`, `]50,+Inf]`
//!
//! The text after the rule (minus leading whitespace) is the variant
//! template. A part that does not start with a complete rule is plain.

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, preceded, separated, terminated};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::ast::Part;
use crate::types::{IntervalRule, VariantSet, canonical_literal};

/// Split a raw template into parts.
///
/// An empty delimiter never splits.
pub fn split_parts<'a>(template: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![template];
    }
    template.split(delimiter).collect()
}

/// Parse a raw template into a [`VariantSet`].
///
/// # Example
///
/// ```
/// use varia::parser::parse_variants;
///
/// let set = parse_variants("{0}none|]0,10]a few|plenty", "|");
/// assert_eq!(set.explicit("0"), Some("none"));
/// assert_eq!(set.intervals().len(), 1);
/// assert_eq!(set.ordinals(), ["plenty"]);
/// assert_eq!(set.default_variant(), "none");
/// ```
pub fn parse_variants(template: &str, delimiter: &str) -> VariantSet {
    let parts = split_parts(template, delimiter)
        .into_iter()
        .map(parse_part)
        .collect();
    VariantSet::from_parts(template, parts)
}

/// Classify a single part.
pub fn parse_part(part: &str) -> Part {
    let mut remaining = part;
    match terminated(rule, ws).parse_next(&mut remaining) {
        Ok(Rule::Explicit(values)) => Part::Explicit {
            values,
            template: remaining.to_string(),
        },
        Ok(Rule::Interval(rule)) => Part::Interval {
            rule,
            template: remaining.to_string(),
        },
        Err(_) => Part::Plain(part.to_string()),
    }
}

/// A recognized rule prefix.
enum Rule {
    Explicit(Vec<String>),
    Interval(IntervalRule),
}

fn rule(input: &mut &str) -> ModalResult<Rule> {
    alt((
        explicit_values.map(Rule::Explicit),
        interval.map(Rule::Interval),
    ))
    .parse_next(input)
}

/// Parse `{n1, n2, ...}` into canonical numbers.
fn explicit_values(input: &mut &str) -> ModalResult<Vec<String>> {
    let literals: Vec<&str> = delimited(
        ('{', ws),
        separated(1.., decimal_literal, (ws, ',', ws)),
        (ws, '}'),
    )
    .parse_next(input)?;
    Ok(literals.into_iter().map(canonical_literal).collect())
}

/// Parse `[a,b]`, `]a,b]`, `[a,b[` or `]a,b[`.
fn interval(input: &mut &str) -> ModalResult<IntervalRule> {
    let open: char = one_of(['[', ']']).parse_next(input)?;
    ws(input)?;
    let lower = lower_bound(input)?;
    (ws, ',', ws).void().parse_next(input)?;
    let upper = upper_bound(input)?;
    ws(input)?;
    let close: char = one_of(['[', ']']).parse_next(input)?;
    Ok(IntervalRule::new(lower, upper, open == '[', close == ']'))
}

fn lower_bound(input: &mut &str) -> ModalResult<f64> {
    alt(("-Inf".value(f64::NEG_INFINITY), decimal)).parse_next(input)
}

fn upper_bound(input: &mut &str) -> ModalResult<f64> {
    alt((preceded(opt('+'), "Inf").value(f64::INFINITY), decimal)).parse_next(input)
}

fn decimal(input: &mut &str) -> ModalResult<f64> {
    decimal_literal
        .try_map(|literal: &str| literal.parse::<f64>())
        .parse_next(input)
}

/// `-?\d+(\.\d+)?`
fn decimal_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace() || c == '\x0B')
        .void()
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_list_allows_inner_whitespace() {
        assert_eq!(
            parse_part("{ 1 ,2,  3 }  items"),
            Part::Explicit {
                values: vec!["1".into(), "2".into(), "3".into()],
                template: "items".into(),
            }
        );
    }

    #[test]
    fn trailing_whitespace_of_template_is_kept() {
        assert_eq!(parse_part("{0} none ").template(), "none ");
    }

    #[test]
    fn interval_bounds_and_inclusivity() {
        let Part::Interval { rule, template } = parse_part("] -1.5 , +Inf ]rest") else {
            panic!("expected interval");
        };
        assert_eq!(rule.lower, -1.5);
        assert_eq!(rule.upper, f64::INFINITY);
        assert!(!rule.lower_inclusive);
        assert!(rule.upper_inclusive);
        assert_eq!(template, "rest");
    }

    #[test]
    fn upper_bound_cannot_be_negative_infinity() {
        assert_eq!(parse_part("[0,-Inf]x"), Part::Plain("[0,-Inf]x".into()));
    }

    #[test]
    fn lower_bound_cannot_be_positive_infinity() {
        assert_eq!(parse_part("[Inf,0]x"), Part::Plain("[Inf,0]x".into()));
    }

    #[test]
    fn leading_whitespace_makes_part_plain() {
        assert_eq!(parse_part(" {0}none"), Part::Plain(" {0}none".into()));
    }

    #[test]
    fn incomplete_rules_are_plain() {
        for part in ["{}", "{1,}x", "[1,2", "[1]x", "{1.}x", "{.5}x", "[a,b]x"] {
            assert_eq!(parse_part(part), Part::Plain(part.into()), "{part}");
        }
    }

    #[test]
    fn empty_delimiter_never_splits() {
        assert_eq!(split_parts("a|b", ""), vec!["a|b"]);
    }

    #[test]
    fn multi_character_delimiter() {
        assert_eq!(split_parts("one || other", " || "), vec!["one", "other"]);
    }
}
