use serde::{Deserialize, Serialize};
use std::fmt;

/// Yes/No flag as it appears in exported files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Yes,
    No,
}

impl Label {
    pub fn is_yes(self) -> bool {
        self == Label::Yes
    }
}

impl From<bool> for Label {
    fn from(value: bool) -> Self {
        if value { Label::Yes } else { Label::No }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Yes => write!(f, "Yes"),
            Label::No => write!(f, "No"),
        }
    }
}

/// Labels for one menu. Field order is the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuLabelRecord {
    pub restaurant_name: String,
    pub source: String,
    pub regional_seasonal: Label,
    pub multi_course_menu: Label,
    pub small_menu: Label,
    pub large_menu: Label,
    pub vegan_options: Label,
    pub vegetarian_options: Label,
    pub gluten_free_options: Label,
    pub average_price: f64,

    pub main_dish_count: usize,
    pub vegan_percentage: f64,
    pub vegetarian_percentage: f64,
    pub gluten_free_count: usize,
}

impl MenuLabelRecord {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}
