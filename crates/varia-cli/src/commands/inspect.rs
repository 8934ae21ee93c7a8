//! Implementation of the `varia inspect` command.

use std::collections::BTreeMap;

use clap::Args;
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use varia::parser::{lint_template, parse_part, split_parts, Part, TemplateWarning};
use varia::{CldrPluralRegistry, PluralCategory, PluralDetectorRegistry, VariantSet};

use super::unknown_locale;
use crate::output::table::{format_parts_table, PartRow};
use crate::output::TemplateDiagnostic;

/// Arguments for the inspect command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Template to inspect.
    pub template: String,

    /// Separator between plural variants.
    #[arg(long, default_value = "|", env = "VARIA_DELIMITER")]
    pub delimiter: String,

    /// Locale whose plural categories label the plain variants.
    #[arg(long)]
    pub lang: Option<String>,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for inspection results.
#[derive(Debug, Serialize)]
struct InspectJson {
    parts: Vec<PartRow>,
    explicit: BTreeMap<String, String>,
    default: String,
    warnings: Vec<TemplateWarning>,
}

/// Run the inspect command.
pub fn run_inspect(args: InspectArgs) -> Result<i32> {
    let categories = match &args.lang {
        Some(lang) => match CldrPluralRegistry::new().get(lang) {
            Ok(detector) => Some(detector.allowed_categories()),
            Err(_) => return Ok(unknown_locale(lang)),
        },
        None => None,
    };

    let parts: Vec<Part> = split_parts(&args.template, &args.delimiter)
        .into_iter()
        .map(parse_part)
        .collect();
    let rows = part_rows(&parts, categories.as_deref());
    let set = VariantSet::from_parts(&args.template, parts);
    let explicit = explicit_bindings(&set);
    let default = set.default_variant().to_string();
    let warnings = lint_template(&args.template, &args.delimiter);

    if args.json {
        let json_output = serde_json::to_string_pretty(&InspectJson {
            parts: rows,
            explicit,
            default,
            warnings: warnings.clone(),
        })
        .into_diagnostic()?;
        println!("{}", json_output);
    } else {
        println!("{}", format_parts_table(&rows));
        if !explicit.is_empty() {
            let bindings: Vec<String> = explicit
                .iter()
                .map(|(value, template)| format!("{value} => {template}"))
                .collect();
            println!(
                "{} {}",
                "explicit:".if_supports_color(Stream::Stdout, |text| text.bold()),
                bindings.join(", ")
            );
        }
        println!(
            "{} {}",
            "default:".if_supports_color(Stream::Stdout, |text| text.bold()),
            default
        );
        for warning in &warnings {
            let diagnostic = TemplateDiagnostic::from_warning(&args.template, &args.delimiter, warning);
            eprintln!("{:?}", Report::new(diagnostic));
        }
    }

    if warnings.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

/// Explicit value bindings after later parts override earlier ones.
fn explicit_bindings(set: &VariantSet) -> BTreeMap<String, String> {
    set.explicit_entries()
        .map(|(value, template)| (value.to_string(), template.to_string()))
        .collect()
}

/// Build table rows, labelling plain parts with the category at their position.
fn part_rows(parts: &[Part], categories: Option<&[PluralCategory]>) -> Vec<PartRow> {
    let mut ordinal = 0;
    parts
        .iter()
        .enumerate()
        .map(|(index, part)| {
            let (rule, category) = match part {
                Part::Explicit { values, .. } => (format!("{{{}}}", values.join(",")), None),
                Part::Interval { rule, .. } => (rule.to_string(), None),
                Part::Plain(_) => {
                    let category = categories.map(|categories| {
                        categories
                            .get(ordinal)
                            .map_or_else(|| "(unused)".to_string(), ToString::to_string)
                    });
                    ordinal += 1;
                    (String::new(), category)
                }
            };
            PartRow {
                index,
                kind: part.kind(),
                rule,
                category,
                template: part.template().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_parts_are_labelled_in_order() {
        let parts: Vec<Part> = ["{0}none", "one", "[2,5]some", "other", "extra"]
            .into_iter()
            .map(parse_part)
            .collect();
        let rows = part_rows(&parts, Some([PluralCategory::One, PluralCategory::Other].as_slice()));

        let categories: Vec<Option<&str>> =
            rows.iter().map(|row| row.category.as_deref()).collect();
        assert_eq!(
            categories,
            vec![None, Some("one"), None, Some("other"), Some("(unused)")]
        );
        assert_eq!(rows[0].rule, "{0}");
        assert_eq!(rows[2].rule, "[2,5]");
    }

    #[test]
    fn explicit_bindings_reflect_overrides() {
        let set = varia::parser::parse_variants("{0,1}few|{1.0}single|many", "|");
        let bindings = explicit_bindings(&set);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings["0"], "few");
        assert_eq!(bindings["1"], "single");
    }
}
