//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use serde::Serialize;

/// One classified part of a template.
#[derive(Debug, Serialize)]
pub struct PartRow {
    /// Position in the template.
    pub index: usize,
    /// "explicit", "interval" or "plain".
    pub kind: &'static str,
    /// The rule prefix, empty for plain parts.
    pub rule: String,
    /// The plural category a plain part stands for, when a locale is given.
    pub category: Option<String>,
    pub template: String,
}

/// A classified number.
#[derive(Debug, Serialize)]
pub struct NumberRow {
    pub input: String,
    pub category: String,
    /// Position of the category in the locale's list.
    pub index: usize,
}

/// Format template parts as an ASCII table.
pub fn format_parts_table(rows: &[PartRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Kind", "Rule", "Category", "Template"]);

    for row in rows {
        table.add_row(vec![
            row.index.to_string(),
            row.kind.to_string(),
            row.rule.clone(),
            row.category.clone().unwrap_or_default(),
            row.template.clone(),
        ]);
    }

    table
}

/// Format classified numbers as an ASCII table.
pub fn format_numbers_table(rows: &[NumberRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Number", "Category", "Index"]);

    for row in rows {
        table.add_row(vec![
            row.input.clone(),
            row.category.clone(),
            row.index.to_string(),
        ]);
    }

    table
}
