//! Property tests for variant selection.

use proptest::prelude::*;
use varia::parser::parse_variants;
use varia::{CacheLimit, CldrPluralRegistry, PluralHandler, Quantity, select};

fn bracket(inclusive: bool, lower: bool) -> char {
    match (inclusive, lower) {
        (true, true) | (false, false) => '[',
        (false, true) | (true, false) => ']',
    }
}

fn interval_template(a: i64, b: i64, lower_inclusive: bool, upper_inclusive: bool) -> String {
    format!(
        "{}{a},{b}{}in|out",
        bracket(lower_inclusive, true),
        bracket(upper_inclusive, false)
    )
}

proptest! {
    /// An interval matches exactly when the value is strictly inside or on an
    /// inclusive bound. Locale "xx" has no rules, so a miss lands on "out".
    #[test]
    fn interval_membership(
        a in -50i64..50,
        width in 0i64..20,
        offset in -3i64..25,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) {
        let b = a + width;
        let q = a + offset;
        let set = parse_variants(&interval_template(a, b, lower_inclusive, upper_inclusive), "|");
        let expected = (lower_inclusive && q == a) || (upper_inclusive && q == b) || (a < q && q < b);

        let picked = select(&set, &Quantity::from_integer(q), "xx", &CldrPluralRegistry::new());
        prop_assert_eq!(picked == "in", expected);
    }

    /// An explicit value beats an interval containing it, wherever it is declared.
    #[test]
    fn explicit_beats_interval(q in -100i64..100, explicit_first: bool) {
        let explicit = format!("{{{q}}}explicit");
        let interval = "[-Inf,Inf]interval".to_string();
        let template = if explicit_first {
            format!("{explicit}|{interval}")
        } else {
            format!("{interval}|{explicit}")
        };
        let set = parse_variants(&template, "|");
        let picked = select(&set, &Quantity::from_integer(q), "en", &CldrPluralRegistry::new());
        prop_assert_eq!(picked, "explicit");
    }

    /// Of two overlapping intervals the one declared first wins.
    #[test]
    fn first_declared_interval_wins(q in 0i64..10) {
        let set = parse_variants("[0,10]first|[0,10]second|plain", "|");
        let picked = select(&set, &Quantity::from_integer(q), "en", &CldrPluralRegistry::new());
        prop_assert_eq!(picked, "first");
    }

    /// Caching never changes the selected variant.
    #[test]
    fn cache_is_transparent(
        templates in prop::collection::vec(0usize..6, 1..40),
        count in -5i64..30,
    ) {
        const POOL: [&str; 6] = [
            "{0}zero|one|other",
            "[0,5]low|]5,Inf]high",
            "{1,2}small|]2,10[mid|rest",
            "a|b|c|d|e|f",
            "plain",
            "[-Inf,0[neg|{0}nil|one|other",
        ];
        let cached = PluralHandler::builder().cache_limit(CacheLimit::Items(2)).build();
        let registry = CldrPluralRegistry::new();
        for index in templates {
            let template = POOL[index];
            let quantity = Quantity::from_integer(count);
            let fresh = parse_variants(template, "|");
            prop_assert_eq!(
                cached.select_variant(template, &quantity, "ru"),
                select(&fresh, &quantity, "ru", &registry)
            );
        }
    }
}
