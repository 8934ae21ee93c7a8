//! Implementation of the `varia eval` command.

use std::collections::HashMap;

use clap::ValueEnum;
use miette::IntoDiagnostic;
use serde::Serialize;
use tracing::debug;
use varia::{filters, CacheLimit, PluralHandler, TemplateResolver, Value};

use super::parse_key_val;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Locale code for plural rules (e.g., en, en_US, ru, ar)
    #[arg(long, required = true)]
    pub lang: String,

    /// Template string to resolve
    #[arg(long, required = true)]
    pub template: String,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Placeholder prefix
    #[arg(long, default_value = "{", env = "VARIA_PREFIX")]
    pub prefix: String,

    /// Placeholder suffix
    #[arg(long, default_value = "}", env = "VARIA_SUFFIX")]
    pub suffix: String,

    /// Separator between plural variants
    #[arg(long, default_value = "|", env = "VARIA_DELIMITER")]
    pub delimiter: String,

    /// Parameter that triggers plural selection
    #[arg(long, default_value = "count")]
    pub trigger: String,

    /// Substitute parameters without selecting a plural variant
    #[arg(long)]
    pub no_plural: bool,

    /// Extra name filters applied to every parameter (repeatable)
    #[arg(long = "filter", value_enum)]
    pub filters: Vec<FilterKind>,

    /// Fixed replacements in search=replace format (repeatable)
    #[arg(long = "replace", value_parser = parse_key_val)]
    pub replacements: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Built-in parameter filters.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterKind {
    Upper,
    Lower,
    Capitalize,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
}

/// Convert a raw argument into a parameter value.
fn parse_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        Value::from(f)
    } else {
        Value::from(raw)
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let plural_handler = (!args.no_plural).then(|| {
        PluralHandler::builder()
            .parameter_name(args.trigger.as_str())
            .delimiter(args.delimiter.as_str())
            .cache_limit(CacheLimit::DISABLED)
            .build()
    });

    let mut resolver = TemplateResolver::builder()
        .prefix(args.prefix.as_str())
        .suffix(args.suffix.as_str())
        .maybe_plural_handler(plural_handler)
        .build();

    for kind in &args.filters {
        match kind {
            FilterKind::Upper => resolver.add_filter(filters::upper),
            FilterKind::Lower => resolver.add_filter(filters::lower),
            FilterKind::Capitalize => resolver.add_filter(filters::capitalize),
        };
    }
    for (search, replace) in args.replacements {
        resolver.add_replacement(search, replace);
    }

    let params: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();
    debug!(lang = %args.lang, params = params.len(), "resolving template");

    let result = resolver.resolve(&args.template, &params, &args.lang);
    if args.json {
        let output = EvalResult { result };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", result);
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_arguments_become_numbers() {
        assert_eq!(parse_value("3".into()), Value::Number(3));
        assert_eq!(parse_value("1.5".into()), Value::Float(1.5));
        assert_eq!(parse_value("apples".into()), Value::String("apples".into()));
        assert_eq!(parse_value("Inf".into()), Value::String("Inf".into()));
    }
}
