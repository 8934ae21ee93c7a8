//! Core value types shared by the parser and the interpreter.

mod quantity;
mod template_key;
mod value;
mod variant_set;

pub use quantity::Quantity;
pub(crate) use quantity::canonical_literal;
pub use template_key::TemplateKey;
pub use value::Value;
pub use variant_set::{IntervalRule, VariantSet};
