//! Keyword tables and compiled patterns used by the menu analyzer.
//!
//! All lists are matched as lowercase substrings of a lowercased line or text.

use regex::Regex;
use std::sync::LazyLock;

use crate::analyzer::Section;

pub const REGIONAL_KEYWORDS: &[&str] = &[
    "schweiz",
    "swiss",
    "regional",
    "lokal",
    "local",
    "freiland",
    "basel",
    "zürich",
    "bern",
    "km",
    "aus der region",
    "heimisch",
];

pub const SEASONAL_KEYWORDS: &[&str] = &[
    "saisonal",
    "seasonal",
    "season",
    "marktfrisch",
    "market fresh",
    "sommer",
    "winter",
    "herbst",
    "frühling",
    "spring",
    "summer",
    "autumn",
    "fall",
];

pub const VEGAN_MARKERS: &[&str] = &["vegan", "v+", "(v+)", "pflanzlich", "plant-based"];

// " v " keeps the bare letter from matching inside words.
pub const VEGETARIAN_MARKERS: &[&str] = &["vegetarisch", "vegetarian", " v ", "(v)", "veggie"];

pub const GLUTEN_FREE_MARKERS: &[&str] =
    &["glutenfrei", "gluten-free", "gluten free", "gf ", "(gf)"];

/// Dish names that are usually gluten-free even without a marker.
pub const GLUTEN_FREE_FRIENDLY: &[&str] = &["risotto", "salat", "salad", "grilled", "gegrillt"];

pub const MENU_CONCEPTS: &[&str] = &["tavolata", "degustation", "tasting menu", "set menu"];

/// Section headers, checked in this order; the first section with a hit wins.
pub const SECTION_KEYWORDS: &[(Section, &[&str])] = &[
    (
        Section::Starter,
        &[
            "vorspeise",
            "antipasti",
            "starter",
            "appetizer",
            "insalat",
            "salat",
            "salad",
        ],
    ),
    (
        Section::Main,
        &[
            "hauptgericht",
            "hauptgang",
            "main",
            "carni",
            "pesci",
            "fleisch",
            "fisch",
            "meat",
            "fish",
            "pasta",
            "risotto",
            "dall",
        ],
    ),
    (
        Section::Dessert,
        &["dessert", "nachspeise", "dolci", "sweet", "glacé"],
    ),
];

pub const MIN_COURSES: u64 = 4;

/// Exclusive bounds for a price to count as a single menu line.
pub const MIN_ITEM_PRICE: f64 = 5.0;
pub const MAX_ITEM_PRICE: f64 = 200.0;

/// "12.50" or "12,50" at the end of a line.
pub static DECIMAL_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)[,.]([0-9]{2})\s*$").expect("decimal price pattern"));

/// "24" or the Swiss "24.-" at the end of a line.
pub static WHOLE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)(?:\.[-–])?\s*$").expect("whole price pattern"));

/// "12.50 CHF" anywhere in a line.
pub static CURRENCY_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)[,.]([0-9]{2})\s*(?:CHF|EUR|€)").expect("currency price pattern")
});

/// Trailing price text removed to form the item name.
pub static PRICE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9,.]+[-–]?\s*(?:CHF|EUR|€)?\s*$").expect("price suffix pattern")
});

/// Matched against lowercased text.
pub static COURSE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)[-\s]?(?:gang|course|gänge|gericht)").expect("course count pattern")
});

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_lowercase() {
        let tables = [
            REGIONAL_KEYWORDS,
            SEASONAL_KEYWORDS,
            VEGAN_MARKERS,
            VEGETARIAN_MARKERS,
            GLUTEN_FREE_MARKERS,
            GLUTEN_FREE_FRIENDLY,
            MENU_CONCEPTS,
        ];
        for table in tables {
            for kw in table {
                assert_eq!(*kw, kw.to_lowercase(), "{kw} must be lowercase");
            }
        }
        for (_, table) in SECTION_KEYWORDS {
            for kw in *table {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
    }

    #[test]
    fn section_order_is_starter_main_dessert() {
        let order: Vec<Section> = SECTION_KEYWORDS.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec![Section::Starter, Section::Main, Section::Dessert]);
    }

    #[test]
    fn price_patterns() {
        let caps = DECIMAL_PRICE.captures("Rösti 18,50").unwrap();
        assert_eq!(&caps[1], "18");
        assert_eq!(&caps[2], "50");

        assert_eq!(&WHOLE_PRICE.captures("Risotto 24.-").unwrap()[1], "24");
        assert_eq!(&WHOLE_PRICE.captures("Risotto 24").unwrap()[1], "24");
        assert!(WHOLE_PRICE.captures("Risotto").is_none());

        let caps = CURRENCY_PRICE.captures("Tartar 32.00 CHF (200g)").unwrap();
        assert_eq!(&caps[1], "32");
        assert!(DECIMAL_PRICE.captures("Tartar 32.00 CHF (200g)").is_none());
    }

    #[test]
    fn course_pattern_variants() {
        for text in ["4-gang menü", "5 gänge", "6course", "7 gericht"] {
            assert!(COURSE_COUNT.is_match(text), "{text}");
        }
        assert!(!COURSE_COUNT.is_match("hauptgang"));
    }

    #[test]
    fn suffix_stripping() {
        assert_eq!(PRICE_SUFFIX.replace("Rösti 18.50", "").trim(), "Rösti");
        assert_eq!(PRICE_SUFFIX.replace("Rösti 18.50 CHF", "").trim(), "Rösti");
        assert_eq!(PRICE_SUFFIX.replace("Rösti 24.-", "").trim(), "Rösti");
    }
}
