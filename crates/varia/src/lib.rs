pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    CacheLimit, CacheStats, CldrPluralRegistry, LocaleNotSupported, PluralCategory,
    PluralDetector, PluralDetectorRegistry, PluralHandler, TemplateResolver, VariantCache,
    category_index, compute_suggestions, filters, primary_subtag, select,
};
pub use types::{IntervalRule, Quantity, TemplateKey, Value, VariantSet};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, or strings directly.
///
/// # Example
///
/// ```
/// use varia::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
