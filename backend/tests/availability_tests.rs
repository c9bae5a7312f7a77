//! Availability and low-stock tests
//!
//! The availability check is a dry run of the deduction: it reports what an
//! order needs against stock on hand and never writes.

mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use cafe_backend::models::{MainIngredient, OrderLineItem, StockStatus};
use cafe_backend::store::MemoryStore;

use common::*;

#[tokio::test]
async fn test_reports_each_ingredient_without_writing() {
    let store = Arc::new(MemoryStore::new());
    let patty = stock(&store, inventory_item("Burger Patty", dec!(50), dec!(10), "pieces")).await;
    stock(&store, inventory_item("Burger Bun", dec!(2), dec!(10), "pieces")).await;
    let burger = dish(
        &store,
        menu_item(
            "Test Burger",
            vec![
                MainIngredient::new("Burger Patty", dec!(1), "pieces"),
                MainIngredient::new("Burger Bun", dec!(1), "pieces"),
            ],
        ),
    )
    .await;

    let result = inventory_service(&store)
        .check_inventory_availability(&[OrderLineItem::new(burger, 3)])
        .await;

    assert!(result.success);
    assert!(!result.all_available);
    assert_eq!(result.availability.len(), 2);

    let patty_line = &result.availability[0];
    assert_eq!(patty_line.ingredient, "Burger Patty");
    assert_eq!(patty_line.required, dec!(3));
    assert_eq!(patty_line.available, dec!(50));
    assert!(patty_line.is_available);
    assert_eq!(patty_line.stock_status, StockStatus::Good);

    let bun_line = &result.availability[1];
    assert!(!bun_line.is_available);
    assert_eq!(bun_line.stock_status, StockStatus::Critical);

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].ingredient.as_deref(), Some("Burger Bun"));
    assert_eq!(
        result.warnings[0].warning,
        "Insufficient stock. Available: 2, Required: 3"
    );

    assert_eq!(current_stock(&store, patty).await, dec!(50));
    assert_eq!(store.inventory_writes(), 0);
}

#[tokio::test]
async fn test_check_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    stock(&store, inventory_item("Oat Milk", dec!(900), dec!(500), "ml")).await;
    let latte = dish(
        &store,
        menu_item("Oat Latte", vec![MainIngredient::new("oat milk", dec!(250), "ml")]),
    )
    .await;

    let service = inventory_service(&store);
    let items = [OrderLineItem::new(latte, 2)];
    let first = service.check_inventory_availability(&items).await;
    let second = service.check_inventory_availability(&items).await;

    assert_eq!(first, second);
    assert!(first.all_available);
    assert_eq!(first.availability[0].stock_status, StockStatus::Good);
}

#[tokio::test]
async fn test_unknown_ingredient_warns_and_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let mocha = dish(
        &store,
        menu_item("Mocha", vec![MainIngredient::new("Dark Chocolate", dec!(20), "g")]),
    )
    .await;

    let result = inventory_service(&store)
        .check_inventory_availability(&[OrderLineItem::new(mocha, 1)])
        .await;

    assert!(result.success);
    assert!(!result.all_available);
    assert!(result.availability.is_empty());
    assert_eq!(result.warnings[0].menu_item.as_deref(), Some("Mocha"));
    assert_eq!(result.warnings[0].warning, "Inventory item not found");
}

#[tokio::test]
async fn test_unknown_menu_items_are_ignored() {
    let store = Arc::new(MemoryStore::new());

    let result = inventory_service(&store)
        .check_inventory_availability(&[OrderLineItem::new(Uuid::new_v4(), 1)])
        .await;

    assert!(result.success);
    assert!(result.all_available);
    assert!(result.availability.is_empty());
}

#[tokio::test]
async fn test_low_stock_lists_only_items_at_or_below_minimum() {
    let store = Arc::new(MemoryStore::new());
    stock(&store, inventory_item("A", dec!(2), dec!(10), "kg")).await;
    stock(&store, inventory_item("B", dec!(20), dec!(10), "kg")).await;

    let report = inventory_service(&store).get_low_stock_alerts().await;

    assert!(report.success);
    assert!(report.error.is_none());
    assert_eq!(report.low_stock_items.len(), 1);
    assert_eq!(report.low_stock_items[0].name, "A");
    assert_eq!(report.low_stock_items[0].stock_status, StockStatus::Critical);
}

#[tokio::test]
async fn test_low_stock_is_sorted_and_skips_inactive() {
    let store = Arc::new(MemoryStore::new());
    stock(&store, inventory_item("Sugar", dec!(8), dec!(10), "kg")).await;
    stock(&store, inventory_item("Salt", dec!(1), dec!(10), "kg")).await;
    stock(&store, inventory_item("Butter", dec!(10), dec!(10), "kg")).await;
    let mut retired = inventory_item("Lard", dec!(0), dec!(10), "kg");
    retired.is_active = false;
    stock(&store, retired).await;

    let report = inventory_service(&store).get_low_stock_alerts().await;

    let names: Vec<&str> = report.low_stock_items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Salt", "Sugar", "Butter"]);
    assert_eq!(report.low_stock_items[1].stock_status, StockStatus::Low);
    assert_eq!(report.low_stock_items[2].stock_status, StockStatus::Low);
}
