//! Plural handler: trigger detection, cached parsing and selection.

use std::collections::HashMap;
use std::sync::Arc;

use bon::bon;
use tracing::trace;

use crate::interpreter::cache::{CacheLimit, VariantCache};
use crate::interpreter::plural::{CldrPluralRegistry, PluralDetectorRegistry};
use crate::interpreter::selector::select;
use crate::parser::parse_variants;
use crate::types::{Quantity, TemplateKey, Value, VariantSet};

/// Selects plural variants of templates.
///
/// The handler owns the variant cache, so one handler should be shared (it
/// is `Send + Sync`) rather than rebuilt per call.
///
/// # Example
///
/// ```
/// use varia::{CacheLimit, PluralHandler, params};
///
/// let handler = PluralHandler::builder()
///     .parameter_name("n")
///     .cache_limit(CacheLimit::Items(64))
///     .build();
///
/// let template = "{0}empty|one file|many files";
/// assert_eq!(handler.get_template(template, &params! { "n" => 0 }, "en"), "empty");
/// assert_eq!(handler.get_template(template, &params! { "n" => 1 }, "en"), "one file");
/// assert_eq!(handler.get_template(template, &params! { "n" => 9 }, "en"), "many files");
/// ```
pub struct PluralHandler {
    /// Source of per-locale plural rules.
    registry: Arc<dyn PluralDetectorRegistry>,
    /// Parameter whose presence triggers pluralization.
    parameter_name: String,
    /// Separator between variants.
    delimiter: String,
    cache: VariantCache,
}

#[bon]
impl PluralHandler {
    #[builder]
    pub fn new(
        #[builder(default = default_registry())] registry: Arc<dyn PluralDetectorRegistry>,
        #[builder(into, default = String::from("count"))] parameter_name: String,
        #[builder(into, default = String::from("|"))] delimiter: String,
        #[builder(default)] cache_limit: CacheLimit,
    ) -> Self {
        Self {
            registry,
            parameter_name,
            delimiter,
            cache: VariantCache::new(cache_limit),
        }
    }
}

impl Default for PluralHandler {
    fn default() -> Self {
        PluralHandler::builder().build()
    }
}

impl PluralHandler {
    /// Returns true if `parameters` contains the trigger parameter.
    pub fn needs_pluralization(&self, parameters: &HashMap<String, Value>) -> bool {
        parameters.contains_key(&self.parameter_name)
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The variant cache, for inspection.
    pub fn cache(&self) -> &VariantCache {
        &self.cache
    }

    pub fn registry(&self) -> &dyn PluralDetectorRegistry {
        self.registry.as_ref()
    }

    /// Parsed variants of `template`, served from the cache when possible.
    pub fn variants(&self, template: &str) -> Arc<VariantSet> {
        self.cache
            .get_or_insert_with(TemplateKey::from_template(template), || {
                trace!(len = template.len(), "parsing variant template");
                parse_variants(template, &self.delimiter)
            })
    }

    /// Select the variant of `template` for an explicit quantity.
    pub fn select_variant(&self, template: &str, quantity: &Quantity, locale: &str) -> String {
        let variants = self.variants(template);
        select(&variants, quantity, locale, self.registry()).to_string()
    }

    /// Select the variant of `template` for the trigger parameter.
    ///
    /// Without the trigger parameter the template is returned unchanged. A
    /// trigger value that is not a number selects the default variant.
    pub fn get_template(
        &self,
        template: &str,
        parameters: &HashMap<String, Value>,
        locale: &str,
    ) -> String {
        let Some(value) = parameters.get(&self.parameter_name) else {
            return template.to_string();
        };
        match value.to_quantity() {
            Some(quantity) => self.select_variant(template, &quantity, locale),
            None => self.variants(template).default_variant().to_string(),
        }
    }
}

fn default_registry() -> Arc<dyn PluralDetectorRegistry> {
    Arc::new(CldrPluralRegistry::new())
}
