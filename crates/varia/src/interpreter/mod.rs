//! varia interpreter: plural rules, variant caching, selection and
//! placeholder substitution.

mod cache;
mod error;
pub mod filters;
mod handler;
mod plural;
mod resolver;
mod selector;

pub use cache::{CacheLimit, CacheStats, VariantCache};
pub use error::{LocaleNotSupported, compute_suggestions};
pub use handler::PluralHandler;
pub use plural::{
    CldrPluralRegistry, PluralCategory, PluralDetector, PluralDetectorRegistry, primary_subtag,
};
pub use resolver::{TemplateResolver, replace_tokens};
pub use selector::{category_index, select};
