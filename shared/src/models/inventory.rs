//! Inventory stock models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UnknownVariant;

/// A stocked ingredient or supply tracked by the café
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: InventoryCategory,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Decimal,
    pub unit: String,
    pub cost_per_unit: Decimal,
    pub supplier: String,
    pub expiry_date: Option<NaiveDate>,
    pub last_restocked: DateTime<Utc>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Stock tier derived from current against minimum stock
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::derive(self.current_stock, self.min_stock)
    }

    /// Value of the stock on hand
    pub fn total_value(&self) -> Decimal {
        self.current_stock * self.cost_per_unit
    }

    /// Whether the item sits at or below its minimum level
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    /// Case-insensitive exact comparison used for recipe resolution
    pub fn name_matches(&self, ingredient_name: &str) -> bool {
        self.name.to_lowercase() == ingredient_name.to_lowercase()
    }
}

/// Inventory categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InventoryCategory {
    Ingredients,
    Beverages,
    Dairy,
    Produce,
    Meat,
    Grains,
    Spices,
    Packaging,
    Cleaning,
    Other,
}

impl InventoryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryCategory::Ingredients => "ingredients",
            InventoryCategory::Beverages => "beverages",
            InventoryCategory::Dairy => "dairy",
            InventoryCategory::Produce => "produce",
            InventoryCategory::Meat => "meat",
            InventoryCategory::Grains => "grains",
            InventoryCategory::Spices => "spices",
            InventoryCategory::Packaging => "packaging",
            InventoryCategory::Cleaning => "cleaning",
            InventoryCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for InventoryCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ingredients" => Ok(InventoryCategory::Ingredients),
            "beverages" => Ok(InventoryCategory::Beverages),
            "dairy" => Ok(InventoryCategory::Dairy),
            "produce" => Ok(InventoryCategory::Produce),
            "meat" => Ok(InventoryCategory::Meat),
            "grains" => Ok(InventoryCategory::Grains),
            "spices" => Ok(InventoryCategory::Spices),
            "packaging" => Ok(InventoryCategory::Packaging),
            "cleaning" => Ok(InventoryCategory::Cleaning),
            "other" => Ok(InventoryCategory::Other),
            _ => Err(UnknownVariant::new("inventory category", s)),
        }
    }
}

/// Stock tier of an inventory item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Good,
}

impl StockStatus {
    /// Derive the tier from `current / min`: at most half is critical, at most
    /// the minimum is low, anything above is good.
    ///
    /// A zero minimum has no meaningful ratio and always reads as good.
    pub fn derive(current_stock: Decimal, min_stock: Decimal) -> Self {
        if min_stock <= Decimal::ZERO {
            return StockStatus::Good;
        }

        let doubled = current_stock * Decimal::from(2);
        if doubled <= min_stock {
            StockStatus::Critical
        } else if current_stock <= min_stock {
            StockStatus::Low
        } else {
            StockStatus::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Good => "good",
        }
    }
}

impl std::str::FromStr for StockStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(StockStatus::Critical),
            "low" => Ok(StockStatus::Low),
            "good" => Ok(StockStatus::Good),
            _ => Err(UnknownVariant::new("stock status", s)),
        }
    }
}

/// Outcome of a conditional stock decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// The row had enough stock and was decremented
    Applied {
        previous_stock: Decimal,
        new_stock: Decimal,
    },
    /// The row did not have enough stock; nothing was written
    Insufficient { available: Decimal },
}

/// Entry in the low-stock alert list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub name: String,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub unit: String,
    pub stock_status: StockStatus,
    pub category: InventoryCategory,
}

impl From<&InventoryItem> for LowStockItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            current_stock: item.current_stock,
            min_stock: item.min_stock,
            unit: item.unit.clone(),
            stock_status: item.stock_status(),
            category: item.category,
        }
    }
}

/// Low-stock alert report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub success: bool,
    pub low_stock_items: Vec<LowStockItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn stock_status_tiers() {
        assert_eq!(StockStatus::derive(dec!(5), dec!(10)), StockStatus::Critical);
        assert_eq!(StockStatus::derive(dec!(2), dec!(10)), StockStatus::Critical);
        assert_eq!(StockStatus::derive(dec!(5.1), dec!(10)), StockStatus::Low);
        assert_eq!(StockStatus::derive(dec!(10), dec!(10)), StockStatus::Low);
        assert_eq!(StockStatus::derive(dec!(10.01), dec!(10)), StockStatus::Good);
    }

    #[test]
    fn zero_minimum_is_good() {
        assert_eq!(StockStatus::derive(Decimal::ZERO, Decimal::ZERO), StockStatus::Good);
        assert_eq!(StockStatus::derive(dec!(3), Decimal::ZERO), StockStatus::Good);
    }

    #[test]
    fn category_parsing_is_case_insensitive() {
        assert_eq!("Dairy".parse::<InventoryCategory>().unwrap(), InventoryCategory::Dairy);
        assert!("frozen".parse::<InventoryCategory>().is_err());
    }

    fn item(name: &str) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: InventoryCategory::Ingredients,
            current_stock: dec!(10),
            min_stock: dec!(2),
            max_stock: dec!(20),
            unit: "pieces".to_string(),
            cost_per_unit: dec!(1),
            supplier: "Local".to_string(),
            expiry_date: None,
            last_restocked: now,
            notes: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn name_matching_is_exact_ignoring_case() {
        let patty = item("Burger Patty");
        assert!(patty.name_matches("burger patty"));
        assert!(patty.name_matches("BURGER PATTY"));
        assert!(!patty.name_matches("Patty"));
        assert!(!patty.name_matches("Burger Patty "));
        assert!(!patty.name_matches("Burger.Patty"));
    }

    #[test]
    fn name_matching_folds_unicode() {
        // Folded with Rust's Unicode rules; Postgres lower() may differ
        assert!(item("Crème Fraîche").name_matches("CRÈME FRAÎCHE"));
    }

    #[test]
    fn stock_status_serializes_lowercase() {
        let json = serde_json::to_string(&StockStatus::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
