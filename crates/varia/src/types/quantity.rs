/// Largest magnitude below which every integral `f64` is exactly an `i64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// The numeric view of a pluralization parameter.
///
/// A quantity carries its real value, an exact integer when the value is
/// integral, and a canonical string form. The canonical form is what explicit
/// rules such as `{0,1}` are keyed by, so `1`, `1.0` and `"1"` all select the
/// same explicit variant.
///
/// # Example
///
/// ```
/// use varia::Quantity;
///
/// assert_eq!(Quantity::from_integer(3).canonical(), "3");
/// assert_eq!(Quantity::from_float(1.0).unwrap().canonical(), "1");
/// assert_eq!(Quantity::from_float(1.5).unwrap().canonical(), "1.5");
/// assert_eq!(Quantity::parse("-Inf").unwrap().value(), f64::NEG_INFINITY);
/// assert!(Quantity::parse("several").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: f64,
    integer: Option<i64>,
    canonical: String,
}

impl Quantity {
    /// Create a quantity from an integer.
    pub fn from_integer(n: i64) -> Self {
        Self {
            value: n as f64,
            integer: Some(n),
            canonical: n.to_string(),
        }
    }

    /// Create a quantity from a float. Returns `None` for NaN.
    ///
    /// Integral floats small enough to be exact are stored as integers, and
    /// `-0.0` is normalized to `0`.
    pub fn from_float(f: f64) -> Option<Self> {
        if f.is_nan() {
            return None;
        }
        if f.is_finite() && f.fract() == 0.0 && f.abs() < EXACT_INTEGER_LIMIT {
            return Some(Self::from_integer(f as i64));
        }
        Some(Self {
            value: f,
            integer: None,
            canonical: format!("{f}"),
        })
    }

    /// Parse a quantity from text.
    ///
    /// Accepts integers, decimals, and the interval-grammar spellings `Inf`,
    /// `+Inf` and `-Inf`. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            "Inf" | "+Inf" => return Self::from_float(f64::INFINITY),
            "-Inf" => return Self::from_float(f64::NEG_INFINITY),
            _ => {}
        }
        if let Ok(n) = text.parse::<i64>() {
            return Some(Self::from_integer(n));
        }
        text.parse::<f64>().ok().and_then(Self::from_float)
    }

    /// The real value, used for interval containment.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The exact integer value, if the quantity is integral.
    pub fn as_integer(&self) -> Option<i64> {
        self.integer
    }

    /// The canonical string form, used as the explicit-rule key.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

/// Canonical form of a numeric literal from an explicit rule.
pub(crate) fn canonical_literal(literal: &str) -> String {
    Quantity::parse(literal).map_or_else(|| literal.trim().to_string(), |q| q.canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_zero() {
        let q = Quantity::from_float(-0.0).unwrap();
        assert_eq!(q.canonical(), "0");
        assert_eq!(q.as_integer(), Some(0));
    }

    #[test]
    fn non_integral_float_has_no_integer() {
        let q = Quantity::from_float(1.1).unwrap();
        assert_eq!(q.as_integer(), None);
        assert_eq!(q.canonical(), "1.1");
    }

    #[test]
    fn literal_canonicalization_drops_redundant_digits() {
        assert_eq!(canonical_literal("1.0"), "1");
        assert_eq!(canonical_literal("007"), "7");
        assert_eq!(canonical_literal(" 2.50 "), "2.5");
        assert_eq!(canonical_literal("-0"), "0");
    }

    #[test]
    fn nan_is_rejected() {
        assert!(Quantity::from_float(f64::NAN).is_none());
        assert!(Quantity::parse("NaN").is_none());
    }

    #[test]
    fn infinities_keep_their_sign() {
        assert_eq!(Quantity::parse("Inf").unwrap().value(), f64::INFINITY);
        assert_eq!(Quantity::parse("+Inf").unwrap().value(), f64::INFINITY);
        assert_eq!(Quantity::parse("-Inf").unwrap().value(), f64::NEG_INFINITY);
        assert_eq!(Quantity::from_float(f64::INFINITY).unwrap().as_integer(), None);
    }
}
