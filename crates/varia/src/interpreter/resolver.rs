//! Placeholder substitution with optional plural-variant selection.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use bon::bon;

use crate::interpreter::filters::{Filter, stringify};
use crate::interpreter::handler::PluralHandler;
use crate::types::Value;

/// Resolves templates into final text.
///
/// Resolution runs in three steps:
/// 1. If a plural handler is configured and the trigger parameter is present,
///    the template is replaced by the selected variant.
/// 2. Each parameter, passed through every filter, is substituted for its
///    wrapped name (`{name}` with the default prefix and suffix).
/// 3. Fixed replacements (e.g. `%%` to `%`) are applied.
///
/// Steps 2 and 3 are single passes: at each position the longest matching
/// token is replaced and the output is never rescanned.
///
/// # Example
///
/// ```
/// use varia::{PluralHandler, TemplateResolver, params};
///
/// let resolver = TemplateResolver::builder()
///     .prefix("%")
///     .suffix("%")
///     .plural_handler(PluralHandler::default())
///     .build();
///
/// let template = "%count% zero|%count% one|%count% two|%count% few|%count% many|%count% other";
/// assert_eq!(resolver.resolve(template, &params! { "count" => 6 }, "ar"), "6 few");
/// ```
pub struct TemplateResolver {
    prefix: String,
    suffix: String,
    plural_handler: Option<PluralHandler>,
    filters: Vec<Filter>,
    /// Fixed replacements applied after parameter substitution.
    replacements: BTreeMap<String, String>,
}

#[bon]
impl TemplateResolver {
    #[builder]
    pub fn new(
        #[builder(into, default = String::from("{"))] prefix: String,
        #[builder(into, default = String::from("}"))] suffix: String,
        plural_handler: Option<PluralHandler>,
    ) -> Self {
        let default_filter: Filter = Arc::new(stringify);
        Self {
            prefix,
            suffix,
            plural_handler,
            filters: vec![default_filter],
            replacements: BTreeMap::new(),
        }
    }
}

impl Default for TemplateResolver {
    fn default() -> Self {
        TemplateResolver::builder().build()
    }
}

impl TemplateResolver {
    /// Add a fixed replacement. A repeated `search` overwrites the previous one.
    pub fn add_replacement(
        &mut self,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> &mut Self {
        self.replacements.insert(search.into(), replace.into());
        self
    }

    /// Append a filter to the chain.
    pub fn add_filter(
        &mut self,
        filter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn plural_handler(&self) -> Option<&PluralHandler> {
        self.plural_handler.as_ref()
    }

    /// Resolve `template` with `parameters` under `locale`.
    pub fn resolve(
        &self,
        template: &str,
        parameters: &HashMap<String, Value>,
        locale: &str,
    ) -> String {
        let translated = match &self.plural_handler {
            Some(handler) if handler.needs_pluralization(parameters) => {
                handler.get_template(template, parameters, locale)
            }
            _ => template.to_string(),
        };

        let pairs = self.parameter_pairs(parameters);
        let translated = replace_tokens(&translated, pairs);
        replace_tokens(&translated, self.replacements.clone())
    }

    /// Token-to-value pairs for every parameter and filter.
    ///
    /// Parameters are visited in name order so that collisions between
    /// distinct names wrapping to the same token resolve deterministically:
    /// the later pair wins.
    fn parameter_pairs(&self, parameters: &HashMap<String, Value>) -> BTreeMap<String, String> {
        let mut names: Vec<&String> = parameters.keys().collect();
        names.sort_unstable();

        let mut pairs = BTreeMap::new();
        for name in names {
            let value = parameters[name].to_string();
            for filter in &self.filters {
                let filtered_name = filter(name.as_str());
                if filtered_name.is_empty() {
                    continue;
                }
                pairs.insert(self.wrap(&filtered_name), filter(value.as_str()));
            }
        }
        pairs
    }

    /// Add the prefix and suffix unless the name already carries them.
    fn wrap(&self, name: &str) -> String {
        let mut wrapped = String::with_capacity(self.prefix.len() + name.len() + self.suffix.len());
        if !name.starts_with(self.prefix.as_str()) {
            wrapped.push_str(&self.prefix);
        }
        wrapped.push_str(name);
        if !name.ends_with(self.suffix.as_str()) {
            wrapped.push_str(&self.suffix);
        }
        wrapped
    }
}

/// Replace all tokens in one left-to-right pass, longest token first.
///
/// Replaced text is never rescanned, so `{a -> b, b -> a}` swaps. Empty
/// tokens are ignored.
pub fn replace_tokens(text: &str, pairs: BTreeMap<String, String>) -> String {
    let mut pairs: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(from, _)| !from.is_empty())
        .collect();
    if pairs.is_empty() {
        return text.to_string();
    }
    pairs.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        match pairs.iter().find(|(from, _)| rest.starts_with(from.as_str())) {
            Some((from, to)) => {
                out.push_str(to);
                rest = &rest[from.len()..];
            }
            None => {
                let step = rest.chars().next().map_or(rest.len(), char::len_utf8);
                out.push_str(&rest[..step]);
                rest = &rest[step..];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn swaps_without_rescanning() {
        let result = replace_tokens("hello, world", pairs(&[("hello", "world"), ("world", "hello")]));
        assert_eq!(result, "world, hello");
    }

    #[test]
    fn longest_token_wins() {
        let result = replace_tokens("%%a%", pairs(&[("%", "P"), ("%%", "%"), ("%%a", "X")]));
        assert_eq!(result, "XP");
    }

    #[test]
    fn multi_byte_text_is_preserved() {
        let result = replace_tokens("žluť {x} kůň", pairs(&[("{x}", "✓")]));
        assert_eq!(result, "žluť ✓ kůň");
    }

    #[test]
    fn wrap_respects_existing_affixes() {
        let resolver = TemplateResolver::builder().prefix("{{").suffix("}}").build();
        assert_eq!(resolver.wrap("name"), "{{name}}");
        assert_eq!(resolver.wrap("{{name}}"), "{{name}}");
        assert_eq!(resolver.wrap("{{name"), "{{name}}");
    }

    #[test]
    fn empty_affixes_leave_names_bare() {
        let resolver = TemplateResolver::builder().prefix("").suffix("").build();
        assert_eq!(resolver.wrap("name"), "name");
    }
}
