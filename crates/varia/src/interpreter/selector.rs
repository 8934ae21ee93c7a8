//! Variant selection.
//!
//! Selection applies a fixed priority, first hit wins:
//! 1. Explicit value matching the canonical form of the quantity
//! 2. First interval (in declaration order) containing the quantity
//! 3. Plain variant at the index of the quantity's plural category
//! 4. The default variant

use tracing::{debug, trace};

use crate::interpreter::plural::PluralDetectorRegistry;
use crate::types::{Quantity, VariantSet};

/// Select the variant for `quantity` under `locale`. Never fails.
///
/// # Example
///
/// ```
/// use varia::{CldrPluralRegistry, Quantity, parser::parse_variants, select};
///
/// let registry = CldrPluralRegistry::new();
/// let set = parse_variants("{0}no apples|one apple|{count} apples", "|");
///
/// let pick = |n| select(&set, &Quantity::from_integer(n), "en", &registry).to_string();
/// assert_eq!(pick(0), "no apples");
/// assert_eq!(pick(1), "one apple");
/// assert_eq!(pick(7), "{count} apples");
/// ```
pub fn select<'a>(
    variants: &'a VariantSet,
    quantity: &Quantity,
    locale: &str,
    registry: &dyn PluralDetectorRegistry,
) -> &'a str {
    if let Some(template) = variants.explicit(quantity.canonical()) {
        trace!(quantity = quantity.canonical(), "selected explicit variant");
        return template;
    }

    let n = quantity.value();
    if let Some((rule, template)) = variants.intervals().iter().find(|(rule, _)| rule.contains(n)) {
        trace!(quantity = quantity.canonical(), %rule, "selected interval variant");
        return template;
    }

    let index = category_index(quantity, locale, registry);
    if let Some(template) = variants.ordinals().get(index) {
        trace!(quantity = quantity.canonical(), index, "selected plural variant");
        return template;
    }

    trace!(quantity = quantity.canonical(), "selected default variant");
    variants.default_variant()
}

/// Position of the quantity's plural category in the locale's category list.
///
/// An unsupported locale, or a category missing from the list, maps to 0.
pub fn category_index(
    quantity: &Quantity,
    locale: &str,
    registry: &dyn PluralDetectorRegistry,
) -> usize {
    let detector = match registry.get(locale) {
        Ok(detector) => detector,
        Err(e) => {
            debug!(%e, "falling back to the first plural category");
            return 0;
        }
    };
    let category = detector.detect(quantity);
    detector
        .allowed_categories()
        .iter()
        .position(|allowed| *allowed == category)
        .unwrap_or(0)
}
