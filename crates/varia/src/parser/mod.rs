//! Variant template parser.
//!
//! Splits a raw template on its delimiter and classifies every part as an
//! explicit-value rule, an interval rule, or a plain variant. Parsing never
//! fails: anything outside the rule grammar is a plain variant. The lint pass
//! reports parts that look like rules but were degraded.

pub mod ast;
mod lint;
mod variants;

pub use ast::Part;
pub use lint::{TemplateWarning, lint_template};
pub use variants::{parse_part, parse_variants, split_parts};
