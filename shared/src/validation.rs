//! Validation utilities for the café ordering platform

use rust_decimal::Decimal;

use crate::models::MainIngredient;

// ============================================================================
// Inventory Validations
// ============================================================================

/// Maximum length of an inventory item or menu item name
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a unit label
pub const MAX_UNIT_LEN: usize = 20;

/// Maximum length of free-text notes
pub const MAX_NOTES_LEN: usize = 500;

/// Validate an inventory item name
pub fn validate_item_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Item name is required");
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err("Item name cannot exceed 100 characters");
    }
    Ok(())
}

/// Validate a unit label
pub fn validate_unit(unit: &str) -> Result<(), &'static str> {
    let trimmed = unit.trim();
    if trimmed.is_empty() {
        return Err("Unit is required");
    }
    if trimmed.chars().count() > MAX_UNIT_LEN {
        return Err("Unit cannot exceed 20 characters");
    }
    Ok(())
}

/// Validate a supplier name
pub fn validate_supplier(supplier: &str) -> Result<(), &'static str> {
    let trimmed = supplier.trim();
    if trimmed.is_empty() {
        return Err("Supplier is required");
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err("Supplier cannot exceed 100 characters");
    }
    Ok(())
}

/// Validate that a stock figure or cost is not negative
pub fn validate_non_negative(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Value cannot be negative");
    }
    Ok(())
}

/// Validate the min/max stock relationship
pub fn validate_stock_levels(min_stock: Decimal, max_stock: Decimal) -> Result<(), &'static str> {
    if min_stock < Decimal::ZERO || max_stock < Decimal::ZERO {
        return Err("Stock levels cannot be negative");
    }
    if max_stock < min_stock {
        return Err("Maximum stock must be greater than or equal to minimum stock");
    }
    Ok(())
}

/// Validate notes length
pub fn validate_notes(notes: &str) -> Result<(), &'static str> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err("Notes cannot exceed 500 characters");
    }
    Ok(())
}

// ============================================================================
// Recipe Validations
// ============================================================================

/// Validate a single recipe line
pub fn validate_main_ingredient(ingredient: &MainIngredient) -> Result<(), &'static str> {
    if ingredient.name.trim().is_empty() {
        return Err("Ingredient name is required");
    }
    if ingredient.unit.trim().is_empty() {
        return Err("Ingredient unit is required");
    }
    if ingredient.quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Validate a full recipe
///
/// Repeated ingredient names are allowed; each line is consumed on its own.
pub fn validate_recipe(ingredients: &[MainIngredient]) -> Result<(), &'static str> {
    ingredients.iter().try_for_each(validate_main_ingredient)
}

// ============================================================================
// Order Validations
// ============================================================================

/// Validate an order line quantity
pub fn validate_order_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}
