//! CLDR plural category resolution.
//!
//! Selection consumes plural categories through the [`PluralDetectorRegistry`]
//! trait. [`CldrPluralRegistry`] is the default implementation, backed by the
//! CLDR data compiled into `icu_plurals`. English has "one" and "other",
//! Russian has "one", "few", "many" and "other", and Arabic uses all six
//! categories.
//!
//! Plural rules are cached per thread per language to avoid re-creating
//! `PluralRules` instances on every call. The cache is initialized lazily
//! on first access within each thread.

use std::cell::RefCell;
use std::fmt::{Display, Formatter, Result as FmtResult};

use fixed_decimal::Decimal;
use icu_locale_core::Locale as IcuLocale;
use icu_plurals::{PluralCategory as IcuCategory, PluralOperands, PluralRuleType, PluralRules};
use serde::Serialize;

use crate::interpreter::error::LocaleNotSupported;
use crate::types::Quantity;

/// CLDR plural categories, in CLDR order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// All categories in CLDR order.
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl From<IcuCategory> for PluralCategory {
    fn from(category: IcuCategory) -> Self {
        match category {
            IcuCategory::Zero => PluralCategory::Zero,
            IcuCategory::One => PluralCategory::One,
            IcuCategory::Two => PluralCategory::Two,
            IcuCategory::Few => PluralCategory::Few,
            IcuCategory::Many => PluralCategory::Many,
            IcuCategory::Other => PluralCategory::Other,
        }
    }
}

/// Plural rules for a single locale.
pub trait PluralDetector {
    /// The plural category of `quantity`.
    fn detect(&self, quantity: &Quantity) -> PluralCategory;

    /// The categories this locale distinguishes, in CLDR order.
    ///
    /// Plain variants are matched to categories by position in this list.
    fn allowed_categories(&self) -> Vec<PluralCategory>;
}

/// A source of per-locale plural rules.
pub trait PluralDetectorRegistry: Send + Sync {
    /// Get the plural rules for `locale`.
    fn get(&self, locale: &str) -> Result<Box<dyn PluralDetector>, LocaleNotSupported>;

    /// Locale codes this registry knows, used for suggestions.
    fn supported_locales(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Language codes with plural rules in the CLDR `plurals.xml` cardinal set.
///
/// Rules come from the data compiled into `icu_plurals`; a listed language
/// without compiled data falls back to root rules ("other" only).
const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "ak", "am", "an", "ar", "ars", "as", "asa", "ast", "az", "bal", "be", "bem", "bez", "bg",
    "bho", "bm", "bn", "bo", "br", "brx", "bs", "ca", "ce", "ceb", "cgg", "chr", "ckb", "cs", "cy",
    "da", "de", "doi", "dsb", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff",
    "fi", "fil", "fo", "fr", "fur", "fy", "ga", "gd", "gl", "gsw", "gu", "guw", "gv", "ha", "haw",
    "he", "hi", "hnj", "hr", "hsb", "hu", "hy", "ia", "id", "ig", "ii", "io", "is", "it", "iu",
    "ja", "jbo", "jgo", "jmc", "jv", "ka", "kab", "kaj", "kcg", "kde", "kea", "kk", "kkj", "kl",
    "km", "kn", "ko", "ks", "ksb", "ksh", "ku", "kw", "ky", "lag", "lb", "lg", "lij", "lkt", "lld",
    "ln", "lo", "lt", "lv", "mas", "mg", "mgo", "mk", "ml", "mn", "mr", "ms", "mt", "my", "nah",
    "naq", "nb", "nd", "ne", "nl", "nn", "nnh", "no", "nqo", "nr", "nso", "ny", "nyn", "om", "or",
    "os", "osa", "pa", "pap", "pcm", "pl", "prg", "ps", "pt", "rm", "ro", "rof", "ru", "rwk",
    "sah", "saq", "sat", "sc", "scn", "sd", "sdh", "se", "seh", "ses", "sg", "shi", "si", "sk",
    "sl", "sma", "smi", "smj", "smn", "sms", "sn", "so", "sq", "sr", "ss", "ssy", "st", "su", "sv",
    "sw", "syr", "ta", "te", "teo", "th", "ti", "tig", "tk", "tl", "tn", "to", "tpi", "tr", "ts",
    "tzm", "ug", "uk", "ur", "uz", "ve", "vec", "vi", "vo", "vun", "wa", "wae", "wo", "xh", "xog",
    "yi", "yo", "yue", "zh", "zu",
];

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language code.
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, Option<PluralRules>)>> = const { RefCell::new(Vec::new()) };
}

/// Plural rules from CLDR data compiled into `icu_plurals`.
///
/// Accepts `ll`, `ll_RR` and `ll-RR` locale codes; only the language subtag
/// is significant. Languages outside the CLDR cardinal plural set (see
/// [`PluralDetectorRegistry::supported_locales`]) are not supported.
///
/// # Example
///
/// ```
/// use varia::{CldrPluralRegistry, PluralCategory, PluralDetectorRegistry, Quantity};
///
/// let registry = CldrPluralRegistry::new();
/// let russian = registry.get("ru_RU").unwrap();
/// assert_eq!(russian.detect(&Quantity::from_integer(1)), PluralCategory::One);
/// assert_eq!(russian.detect(&Quantity::from_integer(3)), PluralCategory::Few);
/// assert_eq!(russian.detect(&Quantity::from_integer(5)), PluralCategory::Many);
///
/// assert!(registry.get("tlh").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPluralRegistry;

impl CldrPluralRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl PluralDetectorRegistry for CldrPluralRegistry {
    fn get(&self, locale: &str) -> Result<Box<dyn PluralDetector>, LocaleNotSupported> {
        let language = normalize_lang(locale).ok_or_else(|| LocaleNotSupported::new(locale))?;
        Ok(Box::new(CldrDetector { language }))
    }

    fn supported_locales(&self) -> Vec<&str> {
        SUPPORTED_LANGUAGES.to_vec()
    }
}

/// Plural rules for one supported language.
#[derive(Debug, Clone, Copy)]
struct CldrDetector {
    language: &'static str,
}

impl PluralDetector for CldrDetector {
    fn detect(&self, quantity: &Quantity) -> PluralCategory {
        let Some(operands) = operands_for(quantity) else {
            return PluralCategory::Other;
        };
        with_rules(self.language, |rules| {
            rules.map_or(PluralCategory::Other, |rules| {
                rules.category_for(operands).into()
            })
        })
    }

    fn allowed_categories(&self) -> Vec<PluralCategory> {
        let mut categories: Vec<PluralCategory> = with_rules(self.language, |rules| {
            rules.map_or_else(
                || vec![PluralCategory::Other],
                |rules| rules.categories().map(PluralCategory::from).collect(),
            )
        });
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

/// The language subtag of a `ll`, `ll_RR` or `ll-RR` locale code.
///
/// ```
/// assert_eq!(varia::primary_subtag("pt_BR"), "pt");
/// assert_eq!(varia::primary_subtag("sr-Latn-RS"), "sr");
/// ```
pub fn primary_subtag(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Map a locale code to a supported static language code.
fn normalize_lang(locale: &str) -> Option<&'static str> {
    let primary = primary_subtag(locale);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|code| code.eq_ignore_ascii_case(primary))
        .copied()
}

/// Build `PluralRules` for a normalized language code.
fn build_rules(lang: &str) -> Option<PluralRules> {
    let locale = IcuLocale::try_from_str(lang).ok()?;
    PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Run `f` with the cached rules for `lang`, building them on first use.
fn with_rules<T>(lang: &'static str, f: impl FnOnce(Option<&PluralRules>) -> T) -> T {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        let index = match cache.iter().position(|(code, _)| *code == lang) {
            Some(index) => index,
            None => {
                cache.push((lang, build_rules(lang)));
                cache.len() - 1
            }
        };
        f(cache[index].1.as_ref())
    })
}

/// CLDR operands for a quantity. Infinities have none.
///
/// Operands ignore the sign, so negative quantities classify like their
/// absolute value.
fn operands_for(quantity: &Quantity) -> Option<PluralOperands> {
    if let Some(n) = quantity.as_integer() {
        return Some(PluralOperands::from(n));
    }
    if !quantity.value().is_finite() {
        return None;
    }
    let decimal: Decimal = quantity.canonical().trim_start_matches('-').parse().ok()?;
    Some(PluralOperands::from(&decimal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(locale: &str, quantity: Quantity) -> PluralCategory {
        CldrPluralRegistry::new()
            .get(locale)
            .unwrap()
            .detect(&quantity)
    }

    #[test]
    fn region_subtags_are_ignored() {
        assert_eq!(normalize_lang("en_US"), Some("en"));
        assert_eq!(normalize_lang("pt-BR"), Some("pt"));
        assert_eq!(normalize_lang("EN"), Some("en"));
        assert_eq!(normalize_lang("xx"), None);
    }

    #[test]
    fn arabic_uses_all_categories() {
        let detector = CldrPluralRegistry::new().get("ar").unwrap();
        assert_eq!(detector.allowed_categories(), PluralCategory::ALL.to_vec());
    }

    #[test]
    fn english_has_one_and_other() {
        let detector = CldrPluralRegistry::new().get("en").unwrap();
        assert_eq!(
            detector.allowed_categories(),
            vec![PluralCategory::One, PluralCategory::Other]
        );
    }

    #[test]
    fn fractional_quantities_use_visible_digits() {
        let q = Quantity::from_float(1.5).unwrap();
        assert_eq!(detect("en", q), PluralCategory::Other);
        let q = Quantity::from_float(1.1).unwrap();
        assert_eq!(detect("ar", q), PluralCategory::Other);
    }

    #[test]
    fn negative_quantities_use_absolute_value() {
        assert_eq!(detect("en", Quantity::from_integer(-1)), PluralCategory::One);
    }

    #[test]
    fn fractional_operands_follow_visible_digits() {
        let operands = operands_for(&Quantity::from_float(2.5).unwrap());
        assert!(operands.is_some());
        assert_eq!(detect("ru", Quantity::from_float(2.5).unwrap()), PluralCategory::Other);
        assert_eq!(detect("ar", Quantity::from_float(-1.1).unwrap()), PluralCategory::Other);
        assert_eq!(detect("fr", Quantity::from_float(1.5).unwrap()), PluralCategory::One);
    }

    #[test]
    fn detector_outlives_registry() {
        let detector = CldrPluralRegistry::new().get("ru").unwrap();
        assert_eq!(detector.detect(&Quantity::from_integer(21)), PluralCategory::One);
    }

    #[test]
    fn smaller_cldr_languages_are_supported() {
        for language in ["mt", "gd", "lb", "ast"] {
            assert_eq!(normalize_lang(language), Some(language));
        }
        assert_eq!(detect("gd", Quantity::from_integer(11)), PluralCategory::One);
        assert_eq!(detect("lb", Quantity::from_integer(1)), PluralCategory::One);
        let maltese = CldrPluralRegistry::new().get("mt_MT").unwrap();
        assert!(maltese.allowed_categories().contains(&PluralCategory::Few));
    }

    #[test]
    fn primary_subtag_strips_region_and_script() {
        assert_eq!(primary_subtag("en"), "en");
        assert_eq!(primary_subtag("zh-Hant-TW"), "zh");
        assert_eq!(primary_subtag(""), "");
    }

    #[test]
    fn infinity_is_other() {
        let q = Quantity::from_float(f64::INFINITY).unwrap();
        assert_eq!(detect("en", q), PluralCategory::Other);
    }
}
