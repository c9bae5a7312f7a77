//! Menu and recipe models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::UnknownVariant;

/// A menu item offered by the café
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: MenuCategory,
    /// Free-text ingredients for display and allergen info
    pub ingredients: Vec<String>,
    /// Recipe components tracked against inventory, in recipe order
    pub main_ingredients: Vec<MainIngredient>,
    /// Minutes
    pub preparation_time: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One recipe line: the amount of an inventory item consumed per unit sold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct MainIngredient {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub quantity: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
}

impl MainIngredient {
    pub fn new(name: impl Into<String>, quantity: Decimal, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Quantity consumed by `order_quantity` units of the menu item
    pub fn required_for(&self, order_quantity: u32) -> Decimal {
        self.quantity * Decimal::from(order_quantity)
    }
}

/// Menu categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCategory {
    Appetizer,
    MainCourse,
    Dessert,
    Beverage,
    Special,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "appetizer",
            MenuCategory::MainCourse => "main-course",
            MenuCategory::Dessert => "dessert",
            MenuCategory::Beverage => "beverage",
            MenuCategory::Special => "special",
        }
    }
}

impl std::str::FromStr for MenuCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appetizer" => Ok(MenuCategory::Appetizer),
            "main-course" => Ok(MenuCategory::MainCourse),
            "dessert" => Ok(MenuCategory::Dessert),
            "beverage" => Ok(MenuCategory::Beverage),
            "special" => Ok(MenuCategory::Special),
            _ => Err(UnknownVariant::new("menu category", s)),
        }
    }
}
