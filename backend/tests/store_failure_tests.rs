//! Inventory store failure tests
//!
//! Infrastructure errors never escape the engine entry points:
//! - A failed lookup or decrement becomes that ingredient's error
//! - A failed availability check yields one synthetic warning
//! - A failed low-stock query reports `success=false` with the error

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use cafe_backend::error::{AppError, AppResult};
use cafe_backend::models::{
    InventoryCategory, InventoryItem, MainIngredient, OrderLineItem, Pagination, StockDecrement,
};
use cafe_backend::services::InventoryService;
use cafe_backend::store::{InventoryChanges, InventoryStore, MemoryStore, NewInventoryItem};

use common::*;

/// Inventory store that fails for one ingredient name and one row id,
/// and on every low-stock query
struct BrokenInventory {
    inner: Arc<MemoryStore>,
    unreachable_name: String,
    locked_id: Option<Uuid>,
}

#[async_trait]
impl InventoryStore for BrokenInventory {
    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<InventoryItem>> {
        if name.eq_ignore_ascii_case(&self.unreachable_name) {
            return Err(AppError::Internal("connection reset".to_string()));
        }
        self.inner.find_active_by_name(name).await
    }

    async fn decrement_if_sufficient(
        &self,
        id: Uuid,
        quantity: Decimal,
    ) -> AppResult<StockDecrement> {
        if Some(id) == self.locked_id {
            return Err(AppError::Internal("lock timeout".to_string()));
        }
        self.inner.decrement_if_sufficient(id, quantity).await
    }

    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        Err(AppError::Internal("connection reset".to_string()))
    }

    async fn list_active(
        &self,
        category: Option<InventoryCategory>,
        pagination: Pagination,
    ) -> AppResult<(Vec<InventoryItem>, u64)> {
        self.inner.list_active(category, pagination).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InventoryItem>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, item: NewInventoryItem) -> AppResult<InventoryItem> {
        self.inner.insert(item).await
    }

    async fn update(&self, id: Uuid, changes: InventoryChanges) -> AppResult<Option<InventoryItem>> {
        self.inner.update(id, changes).await
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<bool> {
        self.inner.deactivate(id).await
    }
}

fn broken_service(store: &Arc<MemoryStore>, locked_id: Option<Uuid>) -> InventoryService {
    let inventory = BrokenInventory {
        inner: store.clone(),
        unreachable_name: "Burger Patty".to_string(),
        locked_id,
    };
    InventoryService::new(store.clone(), Arc::new(inventory))
}

#[tokio::test]
async fn test_ingredient_failures_are_recorded_and_processing_continues() {
    let store = Arc::new(MemoryStore::new());
    stock(&store, inventory_item("Burger Patty", dec!(50), dec!(10), "pieces")).await;
    let bun = stock(&store, inventory_item("Burger Bun", dec!(30), dec!(10), "pieces")).await;
    let cheese = stock(&store, inventory_item("Cheddar", dec!(40), dec!(10), "slices")).await;
    let burger = dish(
        &store,
        menu_item(
            "Cheeseburger",
            vec![
                MainIngredient::new("Burger Patty", dec!(1), "pieces"),
                MainIngredient::new("Cheddar", dec!(1), "slices"),
                MainIngredient::new("Burger Bun", dec!(1), "pieces"),
            ],
        ),
    )
    .await;

    let result = broken_service(&store, Some(cheese))
        .deduct_main_ingredients(&[OrderLineItem::new(burger, 2)])
        .await;

    assert!(!result.success);
    assert_eq!(result.errors.len(), 2);

    assert_eq!(result.errors[0].menu_item.as_deref(), Some("Cheeseburger"));
    assert_eq!(result.errors[0].ingredient.as_deref(), Some("Burger Patty"));
    assert!(result.errors[0].error.contains("connection reset"));

    assert_eq!(result.errors[1].ingredient.as_deref(), Some("Cheddar"));
    assert!(result.errors[1].error.contains("lock timeout"));

    assert_eq!(result.deductions.len(), 1);
    assert_eq!(result.deductions[0].ingredient, "Burger Bun");
    assert_eq!(current_stock(&store, bun).await, dec!(28));
    assert_eq!(current_stock(&store, cheese).await, dec!(40));
}

#[tokio::test]
async fn test_availability_failure_yields_single_warning() {
    let store = Arc::new(MemoryStore::new());
    stock(&store, inventory_item("Burger Patty", dec!(50), dec!(10), "pieces")).await;
    stock(&store, inventory_item("Burger Bun", dec!(30), dec!(10), "pieces")).await;
    let burger = dish(
        &store,
        menu_item(
            "Test Burger",
            vec![
                MainIngredient::new("Burger Bun", dec!(1), "pieces"),
                MainIngredient::new("Burger Patty", dec!(1), "pieces"),
            ],
        ),
    )
    .await;

    let result = broken_service(&store, None)
        .check_inventory_availability(&[OrderLineItem::new(burger, 1)])
        .await;

    assert!(!result.success);
    assert!(!result.all_available);
    assert!(result.availability.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].menu_item.is_none());
    assert!(result.warnings[0]
        .warning
        .starts_with("Failed to check inventory availability: "));
    assert!(result.warnings[0].warning.contains("connection reset"));
}

#[tokio::test]
async fn test_low_stock_failure_reports_error() {
    let store = Arc::new(MemoryStore::new());
    stock(&store, inventory_item("Salt", dec!(1), dec!(10), "kg")).await;

    let report = broken_service(&store, None).get_low_stock_alerts().await;

    assert!(!report.success);
    assert!(report.low_stock_items.is_empty());
    assert!(report.error.unwrap().contains("connection reset"));
}
