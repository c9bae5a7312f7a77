//! Order status workflow tests
//!
//! Delivering an order consumes its ingredients; every other transition
//! leaves stock alone. The status change is kept whatever the deduction
//! outcome.

mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use cafe_backend::error::AppError;
use cafe_backend::models::{MainIngredient, OrderLineItem, OrderStatus};
use cafe_backend::services::order::UpdateStatusInput;
use cafe_backend::store::{MemoryStore, OrderStore};

use common::*;

fn to(status: OrderStatus) -> UpdateStatusInput {
    UpdateStatusInput { status, notes: None }
}

#[tokio::test]
async fn test_delivery_deducts_and_records_time() {
    let store = Arc::new(MemoryStore::new());
    let patty = stock(&store, inventory_item("Burger Patty", dec!(50), dec!(10), "pieces")).await;
    let burger = dish(
        &store,
        menu_item("Test Burger", vec![MainIngredient::new("Burger Patty", dec!(1), "pieces")]),
    )
    .await;
    let order = order(vec![OrderLineItem::new(burger, 3)], OrderStatus::OutForDelivery);
    let order_id = order.id;
    store.put_order(order).await;

    let update = order_service(&store)
        .update_status(order_id, to(OrderStatus::Delivered))
        .await
        .unwrap();

    assert_eq!(update.message, "Order status updated successfully");
    assert_eq!(update.order.status, OrderStatus::Delivered);
    assert!(update.order.actual_delivery_time.is_some());

    let deduction = update.inventory_deduction.as_ref().unwrap();
    assert!(deduction.success);
    assert_eq!(deduction.deductions.len(), 1);
    assert_eq!(current_stock(&store, patty).await, dec!(47));

    let json = serde_json::to_value(&update).unwrap();
    assert!(json.get("inventoryDeduction").is_some());
    assert_eq!(json["order"]["status"], "delivered");
}

#[tokio::test]
async fn test_repeated_delivery_deducts_once() {
    let store = Arc::new(MemoryStore::new());
    let patty = stock(&store, inventory_item("Burger Patty", dec!(50), dec!(10), "pieces")).await;
    let burger = dish(
        &store,
        menu_item("Test Burger", vec![MainIngredient::new("Burger Patty", dec!(1), "pieces")]),
    )
    .await;
    let order = order(vec![OrderLineItem::new(burger, 3)], OrderStatus::OutForDelivery);
    let order_id = order.id;
    store.put_order(order).await;

    let service = order_service(&store);
    let first = service
        .update_status(order_id, to(OrderStatus::Delivered))
        .await
        .unwrap();
    let delivered_at = first.order.actual_delivery_time;
    assert!(first.inventory_deduction.is_some());

    let second = service
        .update_status(order_id, to(OrderStatus::Delivered))
        .await
        .unwrap();

    assert_eq!(second.order.status, OrderStatus::Delivered);
    assert!(second.inventory_deduction.is_none());
    assert_eq!(second.order.actual_delivery_time, delivered_at);
    assert_eq!(current_stock(&store, patty).await, dec!(47));
}

#[tokio::test]
async fn test_other_statuses_leave_stock_alone() {
    let store = Arc::new(MemoryStore::new());
    let patty = stock(&store, inventory_item("Burger Patty", dec!(50), dec!(10), "pieces")).await;
    let burger = dish(
        &store,
        menu_item("Test Burger", vec![MainIngredient::new("Burger Patty", dec!(1), "pieces")]),
    )
    .await;
    let order = order(vec![OrderLineItem::new(burger, 3)], OrderStatus::Pending);
    let order_id = order.id;
    store.put_order(order).await;

    let service = order_service(&store);
    for status in [
        OrderStatus::OrderPlaced,
        OrderStatus::CookingInProgress,
        OrderStatus::ReadyForPickup,
        OrderStatus::OutForDelivery,
        OrderStatus::Cancelled,
    ] {
        let update = service.update_status(order_id, to(status)).await.unwrap();
        assert_eq!(update.order.status, status);
        assert!(update.inventory_deduction.is_none());
        assert!(update.order.actual_delivery_time.is_none());

        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("inventoryDeduction").is_none());
    }

    assert_eq!(current_stock(&store, patty).await, dec!(50));
    assert_eq!(store.inventory_writes(), 0);
}

#[tokio::test]
async fn test_status_is_saved_when_deduction_fails() {
    let store = Arc::new(MemoryStore::new());
    let pasta = dish(
        &store,
        menu_item("Carbonara", vec![MainIngredient::new("Guanciale", dec!(80), "g")]),
    )
    .await;
    let order = order(vec![OrderLineItem::new(pasta, 2)], OrderStatus::OutForDelivery);
    let order_id = order.id;
    store.put_order(order).await;

    let update = order_service(&store)
        .update_status(
            order_id,
            UpdateStatusInput {
                status: OrderStatus::Delivered,
                notes: Some("Left at reception".to_string()),
            },
        )
        .await
        .unwrap();

    let deduction = update.inventory_deduction.unwrap();
    assert!(!deduction.success);
    assert_eq!(deduction.errors[0].error, "Inventory item not found");

    let saved = store.find_order(order_id).await.unwrap().unwrap();
    assert_eq!(saved.status, OrderStatus::Delivered);
    assert_eq!(saved.notes.as_deref(), Some("Left at reception"));
    assert!(saved.actual_delivery_time.is_some());
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let store = Arc::new(MemoryStore::new());

    let err = order_service(&store)
        .update_status(Uuid::new_v4(), to(OrderStatus::Delivered))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_overlong_notes_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    let order = order(vec![], OrderStatus::Pending);
    let order_id = order.id;
    store.put_order(order).await;

    let err = order_service(&store)
        .update_status(
            order_id,
            UpdateStatusInput {
                status: OrderStatus::OrderPlaced,
                notes: Some("x".repeat(501)),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ValidationError(_) | AppError::Validation { .. }));
    let saved = store.find_order(order_id).await.unwrap().unwrap();
    assert_eq!(saved.status, OrderStatus::Pending);
}
