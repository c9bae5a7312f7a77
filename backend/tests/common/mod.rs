//! Fixtures shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use cafe_backend::models::{
    InventoryCategory, InventoryItem, MainIngredient, MenuCategory, MenuItem, Order,
    OrderLineItem, OrderStatus,
};
use cafe_backend::services::{InventoryService, OrderService};
use cafe_backend::store::MemoryStore;

pub fn inventory_item(name: &str, current_stock: Decimal, min_stock: Decimal, unit: &str) -> InventoryItem {
    let now = Utc::now();
    InventoryItem {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: InventoryCategory::Ingredients,
        current_stock,
        min_stock,
        max_stock: (min_stock * Decimal::from(10)).max(current_stock),
        unit: unit.to_string(),
        cost_per_unit: Decimal::ONE,
        supplier: "Local Supplier".to_string(),
        expiry_date: None,
        last_restocked: now,
        notes: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn menu_item(name: &str, main_ingredients: Vec<MainIngredient>) -> MenuItem {
    let now = Utc::now();
    MenuItem {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{} from the kitchen", name),
        price: Decimal::from(12),
        category: MenuCategory::MainCourse,
        ingredients: main_ingredients.iter().map(|i| i.name.clone()).collect(),
        main_ingredients,
        preparation_time: 15,
        is_available: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn order(items: Vec<OrderLineItem>, status: OrderStatus) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::new_v4(),
        order_number: format!("ORD-{}", &Uuid::new_v4().simple().to_string()[..8]),
        items,
        status,
        notes: None,
        actual_delivery_time: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn inventory_service(store: &Arc<MemoryStore>) -> InventoryService {
    InventoryService::new(store.clone(), store.clone())
}

pub fn order_service(store: &Arc<MemoryStore>) -> OrderService {
    OrderService::new(store.clone(), inventory_service(store))
}

/// Store an inventory row and return its id
pub async fn stock(store: &MemoryStore, item: InventoryItem) -> Uuid {
    let id = item.id;
    store.put_inventory_item(item).await;
    id
}

/// Store a menu item and return its id
pub async fn dish(store: &MemoryStore, item: MenuItem) -> Uuid {
    let id = item.id;
    store.put_menu_item(item).await;
    id
}

pub async fn current_stock(store: &MemoryStore, id: Uuid) -> Decimal {
    store
        .inventory_item(id)
        .await
        .map(|item| item.current_stock)
        .unwrap_or_else(|| panic!("inventory item {} missing", id))
}
