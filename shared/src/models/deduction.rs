//! Results produced by the ingredient deduction and availability checks
//!
//! These are built fresh per call and never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::StockStatus;

/// Outcome of deducting an order's main ingredients from inventory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeductionResult {
    /// True only when no ingredient failed; deductions may exist either way
    pub success: bool,
    pub deductions: Vec<Deduction>,
    pub errors: Vec<DeductionError>,
}

impl DeductionResult {
    pub fn new(deductions: Vec<Deduction>, errors: Vec<DeductionError>) -> Self {
        Self {
            success: errors.is_empty(),
            deductions,
            errors,
        }
    }

    /// Result for a run that could not complete at all
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            deductions: Vec::new(),
            errors: vec![DeductionError {
                menu_item: None,
                ingredient: None,
                error: format!("Failed to process inventory deductions: {}", reason),
            }],
        }
    }
}

/// A successful stock decrement for one recipe line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deduction {
    pub menu_item: String,
    pub ingredient: String,
    pub quantity_deducted: Decimal,
    pub unit: String,
    pub previous_stock: Decimal,
    pub new_stock: Decimal,
    pub order_quantity: u32,
}

/// A recipe line that could not be deducted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeductionError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    pub error: String,
}

impl DeductionError {
    pub fn for_ingredient(menu_item: &str, ingredient: &str, error: impl Into<String>) -> Self {
        Self {
            menu_item: Some(menu_item.to_string()),
            ingredient: Some(ingredient.to_string()),
            error: error.into(),
        }
    }
}

/// Outcome of a read-only availability check
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub success: bool,
    pub availability: Vec<IngredientAvailability>,
    pub warnings: Vec<AvailabilityWarning>,
    pub all_available: bool,
}

impl AvailabilityResult {
    pub fn new(availability: Vec<IngredientAvailability>, warnings: Vec<AvailabilityWarning>) -> Self {
        Self {
            success: true,
            all_available: warnings.is_empty(),
            availability,
            warnings,
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            availability: Vec::new(),
            warnings: vec![AvailabilityWarning {
                menu_item: None,
                ingredient: None,
                warning: format!("Failed to check inventory availability: {}", reason),
            }],
            all_available: false,
        }
    }
}

/// Stock on hand against the amount an order needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientAvailability {
    pub menu_item: String,
    pub ingredient: String,
    pub required: Decimal,
    pub available: Decimal,
    pub unit: String,
    pub is_available: bool,
    pub stock_status: StockStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    pub warning: String,
}

impl AvailabilityWarning {
    pub fn for_ingredient(menu_item: &str, ingredient: &str, warning: impl Into<String>) -> Self {
        Self {
            menu_item: Some(menu_item.to_string()),
            ingredient: Some(ingredient.to_string()),
            warning: warning.into(),
        }
    }
}
