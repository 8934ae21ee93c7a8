//! Implementation of the `varia categories` command.

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use varia::{
    category_index, CldrPluralRegistry, PluralCategory, PluralDetector, PluralDetectorRegistry,
    Quantity,
};

use super::unknown_locale;
use crate::output::table::{format_numbers_table, NumberRow};

/// Arguments for the categories command.
#[derive(Debug, Args)]
pub struct CategoriesArgs {
    /// Locale code (e.g., en, ru_RU, ar).
    pub lang: String,

    /// Numbers to classify.
    #[arg(allow_hyphen_values = true)]
    pub numbers: Vec<String>,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for category data.
#[derive(Debug, Serialize)]
struct CategoriesJson {
    locale: String,
    categories: Vec<PluralCategory>,
    numbers: Vec<NumberRow>,
}

/// Run the categories command.
pub fn run_categories(args: CategoriesArgs) -> Result<i32> {
    let registry = CldrPluralRegistry::new();
    let Ok(detector) = registry.get(&args.lang) else {
        return Ok(unknown_locale(&args.lang));
    };
    let categories = detector.allowed_categories();

    let rows = args
        .numbers
        .iter()
        .map(|input| number_row(input, &args.lang, detector.as_ref(), &registry))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        let json_output = serde_json::to_string_pretty(&CategoriesJson {
            locale: args.lang,
            categories,
            numbers: rows,
        })
        .into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let names: Vec<&str> = categories.iter().map(PluralCategory::as_str).collect();
        println!(
            "{}: {}",
            args.lang.if_supports_color(Stream::Stdout, |text| text.bold()),
            names.join(", ")
        );
        if !rows.is_empty() {
            println!("{}", format_numbers_table(&rows));
        }
    }

    Ok(exitcode::OK)
}

/// Classify one number, with the variant index a template would select.
fn number_row(
    input: &str,
    lang: &str,
    detector: &dyn PluralDetector,
    registry: &dyn PluralDetectorRegistry,
) -> Result<NumberRow> {
    let quantity = Quantity::parse(input).ok_or_else(|| miette!("'{}' is not a number", input))?;
    Ok(NumberRow {
        input: input.to_string(),
        category: detector.detect(&quantity).to_string(),
        index: category_index(&quantity, lang, registry),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_use_the_selection_index() {
        let registry = CldrPluralRegistry::new();
        let detector = registry.get("ru_RU").unwrap();

        let row = number_row("5", "ru_RU", detector.as_ref(), &registry).unwrap();
        assert_eq!(row.category, "many");
        assert_eq!(row.index, 2);

        let row = number_row("-21", "ru_RU", detector.as_ref(), &registry).unwrap();
        assert_eq!(row.category, "one");
        assert_eq!(row.index, 0);

        assert!(number_row("lots", "ru_RU", detector.as_ref(), &registry).is_err());
    }
}
