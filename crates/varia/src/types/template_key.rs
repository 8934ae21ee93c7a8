use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A compact cache key derived from the text of a raw template.
///
/// `TemplateKey` wraps a 64-bit FNV-1a hash of the template. Keying the
/// variant cache by digest instead of by the raw text keeps the memory held
/// per entry constant no matter how long the template is.
///
/// # Example
///
/// ```
/// use varia::TemplateKey;
///
/// const APPLES: TemplateKey = TemplateKey::from_template("{0}none|one apple|many apples");
///
/// let runtime = TemplateKey::from_template("{0}none|one apple|many apples");
/// assert_eq!(APPLES, runtime);
/// assert_ne!(APPLES, TemplateKey::from_template("one apple|many apples"));
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TemplateKey(u64);

impl TemplateKey {
    /// Hash a raw template into a key. Usable in `const` context.
    pub const fn from_template(template: &str) -> Self {
        Self(fnv1a_hash_str_64(template))
    }
}

impl std::fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TemplateKey({:016x})", self.0)
    }
}
