//! Inventory service: ingredient deduction, availability checks, low-stock
//! alerts and stock item management

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::{
    validate_item_name, validate_non_negative, validate_notes, validate_stock_levels,
    validate_supplier, validate_unit,
};

use crate::error::{AppError, AppResult};
use crate::models::{
    AvailabilityResult, AvailabilityWarning, Deduction, DeductionError, DeductionResult,
    IngredientAvailability, InventoryCategory, InventoryItem, LowStockItem, LowStockReport,
    MainIngredient, OrderLineItem, Pagination, PaginationMeta, StockDecrement, StockStatus,
};
use crate::services::recipe::{Recipe, RecipeResolver};
use crate::store::{InventoryChanges, InventoryStore, MenuCatalog, NewInventoryItem};

const NOT_FOUND: &str = "Inventory item not found";

/// Inventory service for stock deduction, availability and item management
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    recipes: RecipeResolver,
}

/// Filter for listing inventory items
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub category: Option<InventoryCategory>,
    pub stock_status: Option<StockStatus>,
    pub pagination: Pagination,
}

/// Inventory item with its derived fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub stock_status: StockStatus,
    pub total_value: Decimal,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(item: InventoryItem) -> Self {
        Self {
            stock_status: item.stock_status(),
            total_value: item.total_value(),
            item,
        }
    }
}

/// A page of inventory items
#[derive(Debug, Clone, Serialize)]
pub struct InventoryPage {
    pub items: Vec<InventoryItemView>,
    pub pagination: PaginationMeta,
}

/// Input for adding an inventory item
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category: InventoryCategory,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Decimal,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    pub cost_per_unit: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub supplier: String,
    pub expiry_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Input for updating an inventory item; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub category: Option<InventoryCategory>,
    pub current_stock: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub max_stock: Option<Decimal>,
    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,
    pub cost_per_unit: Option<Decimal>,
    #[validate(length(min = 1, max = 100))]
    pub supplier: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Trim a text field and run its validator on the trimmed value
fn trimmed(
    field: &str,
    value: &str,
    validate: fn(&str) -> Result<(), &'static str>,
) -> AppResult<String> {
    let value = value.trim();
    validate(value).map_err(|m| AppError::validation(field, m))?;
    Ok(value.to_string())
}

fn check_non_negative(field: &str, value: Option<Decimal>) -> AppResult<()> {
    match value {
        Some(v) => validate_non_negative(v).map_err(|m| AppError::validation(field, m)),
        None => Ok(()),
    }
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(menu: Arc<dyn MenuCatalog>, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            recipes: RecipeResolver::new(menu, store.clone()),
            store,
        }
    }

    // ========================================================================
    // Deduction
    // ========================================================================

    /// Deduct the main ingredients consumed by a delivered order
    ///
    /// Each recipe line is all-or-nothing on its own: a missing or short
    /// ingredient is reported in `errors` while the rest of the order is still
    /// deducted. Nothing is rolled back. This never returns an error; a run
    /// that cannot complete yields a single synthetic error entry.
    pub async fn deduct_main_ingredients(&self, items: &[OrderLineItem]) -> DeductionResult {
        match self.try_deduct(items).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error in deduct_main_ingredients: {}", e);
                DeductionResult::failed(e)
            }
        }
    }

    async fn try_deduct(&self, items: &[OrderLineItem]) -> AppResult<DeductionResult> {
        let mut deductions = Vec::new();
        let mut errors = Vec::new();

        for line in items {
            let Some(recipe) = self.recipes.recipe(line.menu_item).await? else {
                continue;
            };
            if !recipe.is_tracked() {
                continue;
            }

            // Sequential on purpose: two lines may hit the same inventory row.
            for ingredient in &recipe.main_ingredients {
                match self.deduct_ingredient(&recipe, ingredient, line.quantity).await {
                    Ok(deduction) => deductions.push(deduction),
                    Err(error) => errors.push(error),
                }
            }
        }

        Ok(DeductionResult::new(deductions, errors))
    }

    async fn deduct_ingredient(
        &self,
        recipe: &Recipe,
        ingredient: &MainIngredient,
        order_quantity: u32,
    ) -> Result<Deduction, DeductionError> {
        let fail = |message: String| {
            DeductionError::for_ingredient(&recipe.menu_item, &ingredient.name, message)
        };
        let required = ingredient.required_for(order_quantity);

        let item = self
            .recipes
            .resolve(&ingredient.name)
            .await
            .map_err(|e| fail(e.to_string()))?
            .ok_or_else(|| fail(NOT_FOUND.to_string()))?;

        let outcome = self
            .store
            .decrement_if_sufficient(item.id, required)
            .await
            .map_err(|e| fail(e.to_string()))?;

        match outcome {
            StockDecrement::Applied {
                previous_stock,
                new_stock,
            } => Ok(Deduction {
                menu_item: recipe.menu_item.clone(),
                ingredient: ingredient.name.clone(),
                quantity_deducted: required,
                unit: ingredient.unit.clone(),
                previous_stock,
                new_stock,
                order_quantity,
            }),
            StockDecrement::Insufficient { available } => Err(fail(format!(
                "Insufficient stock. Available: {} {}, Required: {} {}",
                available, item.unit, required, ingredient.unit
            ))),
        }
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// Dry run of the deduction: report what an order would need against what
    /// is on hand without writing anything
    pub async fn check_inventory_availability(&self, items: &[OrderLineItem]) -> AvailabilityResult {
        match self.try_check_availability(items).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error in check_inventory_availability: {}", e);
                AvailabilityResult::failed(e)
            }
        }
    }

    async fn try_check_availability(&self, items: &[OrderLineItem]) -> AppResult<AvailabilityResult> {
        let mut availability = Vec::new();
        let mut warnings = Vec::new();

        for line in items {
            let Some(recipe) = self.recipes.recipe(line.menu_item).await? else {
                continue;
            };

            for ingredient in &recipe.main_ingredients {
                let required = ingredient.required_for(line.quantity);

                let Some(item) = self.recipes.resolve(&ingredient.name).await? else {
                    warnings.push(AvailabilityWarning::for_ingredient(
                        &recipe.menu_item,
                        &ingredient.name,
                        NOT_FOUND,
                    ));
                    continue;
                };

                let is_available = item.current_stock >= required;
                availability.push(IngredientAvailability {
                    menu_item: recipe.menu_item.clone(),
                    ingredient: ingredient.name.clone(),
                    required,
                    available: item.current_stock,
                    unit: ingredient.unit.clone(),
                    is_available,
                    stock_status: item.stock_status(),
                });

                if !is_available {
                    warnings.push(AvailabilityWarning::for_ingredient(
                        &recipe.menu_item,
                        &ingredient.name,
                        format!(
                            "Insufficient stock. Available: {}, Required: {}",
                            item.current_stock, required
                        ),
                    ));
                }
            }
        }

        Ok(AvailabilityResult::new(availability, warnings))
    }

    // ========================================================================
    // Low stock
    // ========================================================================

    /// Active items at or below their minimum stock, most depleted first
    pub async fn get_low_stock_alerts(&self) -> LowStockReport {
        match self.store.list_low_stock().await {
            Ok(items) => LowStockReport {
                success: true,
                low_stock_items: items.iter().map(LowStockItem::from).collect(),
                error: None,
            },
            Err(e) => {
                tracing::error!("Error in get_low_stock_alerts: {}", e);
                LowStockReport {
                    success: false,
                    low_stock_items: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    // ========================================================================
    // Item management
    // ========================================================================

    /// List active inventory items
    ///
    /// The stock status filter narrows the fetched page; pagination totals
    /// count every active item in the category.
    pub async fn list_items(&self, filter: InventoryFilter) -> AppResult<InventoryPage> {
        let (items, total) = self
            .store
            .list_active(filter.category, filter.pagination)
            .await?;

        let items = items
            .into_iter()
            .filter(|item| {
                filter
                    .stock_status
                    .map_or(true, |status| item.stock_status() == status)
            })
            .map(InventoryItemView::from)
            .collect();

        Ok(InventoryPage {
            items,
            pagination: PaginationMeta::new(filter.pagination, total),
        })
    }

    /// Add an inventory item
    pub async fn create_item(&self, input: CreateInventoryItemInput) -> AppResult<InventoryItemView> {
        input.validate()?;
        let name = trimmed("name", &input.name, validate_item_name)?;
        let unit = trimmed("unit", &input.unit, validate_unit)?;
        let supplier = trimmed("supplier", &input.supplier, validate_supplier)?;
        check_non_negative("currentStock", Some(input.current_stock))?;
        check_non_negative("costPerUnit", Some(input.cost_per_unit))?;
        validate_stock_levels(input.min_stock, input.max_stock)
            .map_err(|m| AppError::validation("maxStock", m))?;
        if let Some(notes) = &input.notes {
            validate_notes(notes).map_err(|m| AppError::validation("notes", m))?;
        }

        let item = self
            .store
            .insert(NewInventoryItem {
                name,
                category: input.category,
                current_stock: input.current_stock,
                min_stock: input.min_stock,
                max_stock: input.max_stock,
                unit,
                cost_per_unit: input.cost_per_unit,
                supplier,
                expiry_date: input.expiry_date,
                notes: input.notes,
            })
            .await?;

        tracing::info!("Inventory item {} added ({})", item.name, item.id);
        Ok(item.into())
    }

    /// Update an inventory item
    pub async fn update_item(
        &self,
        id: Uuid,
        input: UpdateInventoryItemInput,
    ) -> AppResult<InventoryItemView> {
        input.validate()?;
        let name = input
            .name
            .as_deref()
            .map(|n| trimmed("name", n, validate_item_name))
            .transpose()?;
        let unit = input
            .unit
            .as_deref()
            .map(|u| trimmed("unit", u, validate_unit))
            .transpose()?;
        let supplier = input
            .supplier
            .as_deref()
            .map(|s| trimmed("supplier", s, validate_supplier))
            .transpose()?;
        check_non_negative("currentStock", input.current_stock)?;
        check_non_negative("minStock", input.min_stock)?;
        check_non_negative("maxStock", input.max_stock)?;
        check_non_negative("costPerUnit", input.cost_per_unit)?;

        if input.min_stock.is_some() || input.max_stock.is_some() {
            let existing = self
                .store
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

            let min_stock = input.min_stock.unwrap_or(existing.min_stock);
            let max_stock = input.max_stock.unwrap_or(existing.max_stock);
            validate_stock_levels(min_stock, max_stock)
                .map_err(|m| AppError::validation("maxStock", m))?;
        }

        let last_restocked = input
            .current_stock
            .filter(|stock| *stock > Decimal::ZERO)
            .map(|_| Utc::now());

        let changes = InventoryChanges {
            name,
            category: input.category,
            current_stock: input.current_stock,
            min_stock: input.min_stock,
            max_stock: input.max_stock,
            unit,
            cost_per_unit: input.cost_per_unit,
            supplier,
            expiry_date: input.expiry_date,
            notes: input.notes,
            last_restocked,
        };

        let item = self
            .store
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        Ok(item.into())
    }

    /// Soft-delete an inventory item
    pub async fn delete_item(&self, id: Uuid) -> AppResult<()> {
        if !self.store.deactivate(id).await? {
            return Err(AppError::NotFound("Inventory item".to_string()));
        }
        tracing::info!("Inventory item {} deactivated", id);
        Ok(())
    }
}
