use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keywords::{
    contains_any, COURSE_COUNT, CURRENCY_PRICE, DECIMAL_PRICE, GLUTEN_FREE_FRIENDLY,
    GLUTEN_FREE_MARKERS, MAX_ITEM_PRICE, MENU_CONCEPTS, MIN_COURSES, MIN_ITEM_PRICE,
    PRICE_SUFFIX, REGIONAL_KEYWORDS, SEASONAL_KEYWORDS, SECTION_KEYWORDS, VEGAN_MARKERS,
    VEGETARIAN_MARKERS, WHOLE_PRICE,
};
use crate::labels::{Label, MenuLabelRecord};

pub const UNKNOWN_RESTAURANT: &str = "Unknown Restaurant";

const NAME_SCAN_LINES: usize = 5;
const SMALL_MENU_MAX_MAINS: usize = 4;
const LARGE_MENU_MIN_MAINS: usize = 20;
const MAIN_PRICE_THRESHOLD: f64 = 20.0;
const DIET_SHARE_THRESHOLD: f64 = 30.0;
const GLUTEN_FREE_MIN_MAINS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Starter,
    Main,
    Dessert,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
    pub section: Section,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
}

impl MenuItem {
    /// Builds an item from a trimmed line if it carries an acceptable price.
    pub fn from_line(line: &str, section: Section) -> Option<Self> {
        let price = extract_price(line)?;
        if price <= MIN_ITEM_PRICE || price >= MAX_ITEM_PRICE {
            return None;
        }

        let lower = line.to_lowercase();
        let vegan = contains_any(&lower, VEGAN_MARKERS);
        Some(Self {
            name: PRICE_SUFFIX.replace(line, "").trim().to_string(),
            price,
            section,
            vegan,
            vegetarian: vegan || contains_any(&lower, VEGETARIAN_MARKERS),
            gluten_free: contains_any(&lower, GLUTEN_FREE_MARKERS),
        })
    }

    pub fn is_main_dish(&self) -> bool {
        self.section == Section::Main
            || (self.price >= MAIN_PRICE_THRESHOLD && self.section != Section::Dessert)
    }

    // Looser than is_main_dish: desserts priced at 20 or more count here.
    fn is_priced_as_main(&self) -> bool {
        self.section == Section::Main || self.price >= MAIN_PRICE_THRESHOLD
    }

    fn looks_gluten_free(&self) -> bool {
        contains_any(&self.name.to_lowercase(), GLUTEN_FREE_FRIENDLY)
    }
}

/// Returns the price found on a line, trying the decimal, whole and
/// currency-suffixed patterns in that order.
pub fn extract_price(line: &str) -> Option<f64> {
    if let Some(caps) = DECIMAL_PRICE.captures(line) {
        return format!("{}.{}", &caps[1], &caps[2]).parse().ok();
    }
    if let Some(caps) = WHOLE_PRICE.captures(line) {
        if let Ok(value) = caps[1].parse::<f64>() {
            // Small bare numbers are usually course counts or footnotes.
            if value > MIN_ITEM_PRICE {
                return Some(value);
            }
        }
    }
    CURRENCY_PRICE
        .captures(line)
        .and_then(|caps| format!("{}.{}", &caps[1], &caps[2]).parse().ok())
}

pub fn detect_section(lower: &str) -> Option<Section> {
    SECTION_KEYWORDS
        .iter()
        .find(|(_, kws)| contains_any(lower, kws))
        .map(|(section, _)| *section)
}

pub fn extract_items(text: &str) -> Vec<MenuItem> {
    let mut items = Vec::new();
    let mut section = Section::Unknown;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        // A header on a priced line applies from the next line on.
        if let Some(item) = MenuItem::from_line(line, section) {
            items.push(item);
        }
        if let Some(next) = detect_section(&line.to_lowercase()) {
            section = next;
        }
    }

    items
}

pub fn infer_restaurant_name(text: &str) -> String {
    text.lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 3 && len < 50 && extract_price(line).is_none()
        })
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_RESTAURANT.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DietShare {
    pub qualifies: bool,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlutenFree {
    pub qualifies: bool,
    /// Raw tally of marked plus gluten-free-friendly mains. Not capped by, and
    /// not raised by, the text-mention fallback.
    pub count: usize,
}

/// Parsed view of one menu text.
#[derive(Debug, Clone)]
pub struct MenuAnalyzer {
    text_lower: String,
    restaurant_name: String,
    items: Vec<MenuItem>,
}

impl MenuAnalyzer {
    pub fn new(text: &str, restaurant_name: &str) -> Self {
        let restaurant_name = if restaurant_name.is_empty() {
            infer_restaurant_name(text)
        } else {
            restaurant_name.to_string()
        };
        let items = extract_items(text);
        debug!(
            restaurant = %restaurant_name,
            items = items.len(),
            "extracted menu items"
        );

        Self {
            text_lower: text.to_lowercase(),
            restaurant_name,
            items,
        }
    }

    pub fn restaurant_name(&self) -> &str {
        &self.restaurant_name
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn main_dishes(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.is_main_dish())
    }

    pub fn main_dish_count(&self) -> usize {
        self.main_dishes().count()
    }

    pub fn regional_seasonal(&self) -> bool {
        contains_any(&self.text_lower, REGIONAL_KEYWORDS)
            && contains_any(&self.text_lower, SEASONAL_KEYWORDS)
    }

    pub fn multi_course(&self) -> bool {
        let many_courses = COURSE_COUNT.captures_iter(&self.text_lower).any(|caps| {
            // Only overflow can fail here, and that is a very large count.
            caps[1].parse::<u64>().map_or(true, |n| n >= MIN_COURSES)
        });
        many_courses || contains_any(&self.text_lower, MENU_CONCEPTS)
    }

    pub fn small_menu(&self) -> bool {
        self.main_dish_count() <= SMALL_MENU_MAX_MAINS
    }

    pub fn large_menu(&self) -> bool {
        self.main_dish_count() > LARGE_MENU_MIN_MAINS
    }

    fn diet_share(&self, flag: impl Fn(&MenuItem) -> bool) -> DietShare {
        let mains = self.main_dish_count();
        if mains == 0 {
            return DietShare {
                qualifies: false,
                percentage: 0.0,
            };
        }
        let matching = self.main_dishes().filter(|item| flag(item)).count();
        let percentage = matching as f64 / mains as f64 * 100.0;
        DietShare {
            qualifies: percentage >= DIET_SHARE_THRESHOLD,
            percentage,
        }
    }

    pub fn vegan_options(&self) -> DietShare {
        self.diet_share(|item| item.vegan)
    }

    pub fn vegetarian_options(&self) -> DietShare {
        self.diet_share(|item| item.vegetarian)
    }

    pub fn gluten_free_options(&self) -> GlutenFree {
        if self.main_dish_count() == 0 {
            return GlutenFree {
                qualifies: false,
                count: 0,
            };
        }

        // An item can be counted twice: once for a marker, once for its name.
        let marked = self.main_dishes().filter(|item| item.gluten_free).count();
        let friendly = self
            .main_dishes()
            .filter(|item| item.looks_gluten_free())
            .count();
        let count = marked + friendly;

        let mentioned = contains_any(&self.text_lower, GLUTEN_FREE_MARKERS);
        GlutenFree {
            qualifies: count >= GLUTEN_FREE_MIN_MAINS || mentioned,
            count,
        }
    }

    /// Typical spend for a starter plus a main.
    ///
    /// Mains here are `section == main` or `price >= 20`, which unlike
    /// [`MenuItem::is_main_dish`] also admits expensive desserts.
    pub fn average_price(&self) -> f64 {
        let starters: Vec<f64> = self
            .items
            .iter()
            .filter(|item| item.section == Section::Starter)
            .map(|item| item.price)
            .collect();
        let mains: Vec<f64> = self
            .items
            .iter()
            .filter(|item| item.is_priced_as_main())
            .map(|item| item.price)
            .collect();

        let average = match (mean(&starters), mean(&mains)) {
            (Some(starter), Some(main)) => starter + main,
            _ => {
                let all: Vec<f64> = self.items.iter().map(|item| item.price).collect();
                mean(&all).unwrap_or(0.0)
            }
        };
        round_to(average, 2)
    }

    pub fn analyze(&self) -> MenuLabelRecord {
        let vegan = self.vegan_options();
        let vegetarian = self.vegetarian_options();
        let gluten_free = self.gluten_free_options();

        MenuLabelRecord {
            restaurant_name: self.restaurant_name.clone(),
            source: String::new(),
            regional_seasonal: Label::from(self.regional_seasonal()),
            multi_course_menu: Label::from(self.multi_course()),
            small_menu: Label::from(self.small_menu()),
            large_menu: Label::from(self.large_menu()),
            vegan_options: Label::from(vegan.qualifies),
            vegetarian_options: Label::from(vegetarian.qualifies),
            gluten_free_options: Label::from(gluten_free.qualifies),
            average_price: self.average_price(),
            main_dish_count: self.main_dish_count(),
            vegan_percentage: round_to(vegan.percentage, 1),
            vegetarian_percentage: round_to(vegetarian.percentage, 1),
            gluten_free_count: gluten_free.count,
        }
    }
}

/// Runs the whole engine over one menu text. An empty hint means the name is
/// inferred from the text.
pub fn analyze(text: &str, restaurant_name: &str) -> MenuLabelRecord {
    MenuAnalyzer::new(text, restaurant_name).analyze()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// Decimal rounding of the exact binary value, ties to even: 6.25 -> 6.2.
fn round_to(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}
