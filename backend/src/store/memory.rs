//! In-memory store
//!
//! Mirrors the Postgres store's semantics (case-insensitive active-name
//! uniqueness, conditional decrement under a single write guard) so services
//! can be exercised without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{InventoryChanges, InventoryStore, MenuCatalog, NewInventoryItem, OrderStore};
use crate::error::{AppError, AppResult};
use crate::models::{
    InventoryCategory, InventoryItem, MainIngredient, MenuCategory, MenuItem, Order, Pagination,
    StockDecrement,
};

#[derive(Default)]
pub struct MemoryStore {
    menu: RwLock<HashMap<Uuid, MenuItem>>,
    inventory: RwLock<HashMap<Uuid, InventoryItem>>,
    orders: RwLock<HashMap<Uuid, Order>>,
    inventory_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_menu_item(&self, item: MenuItem) {
        self.menu.write().await.insert(item.id, item);
    }

    /// Insert an inventory row as-is, bypassing uniqueness checks
    pub async fn put_inventory_item(&self, item: InventoryItem) {
        self.inventory.write().await.insert(item.id, item);
    }

    pub async fn put_order(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }

    pub async fn inventory_item(&self, id: Uuid) -> Option<InventoryItem> {
        self.inventory.read().await.get(&id).cloned()
    }

    /// Number of inventory mutations performed so far
    pub fn inventory_writes(&self) -> usize {
        self.inventory_writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.inventory_writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn name_taken(items: &HashMap<Uuid, InventoryItem>, name: &str, except: Option<Uuid>) -> bool {
    items
        .values()
        .any(|item| item.is_active && Some(item.id) != except && item.name_matches(name))
}

#[async_trait]
impl MenuCatalog for MemoryStore {
    async fn find_menu_item(&self, id: Uuid) -> AppResult<Option<MenuItem>> {
        Ok(self.menu.read().await.get(&id).cloned())
    }

    async fn list_menu_items(
        &self,
        category: Option<MenuCategory>,
        available_only: bool,
    ) -> AppResult<Vec<MenuItem>> {
        let menu = self.menu.read().await;
        let mut items: Vec<MenuItem> = menu
            .values()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .filter(|item| !available_only || item.is_available)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    async fn set_main_ingredients(
        &self,
        id: Uuid,
        ingredients: Vec<MainIngredient>,
    ) -> AppResult<Option<MenuItem>> {
        let mut menu = self.menu.write().await;
        Ok(menu.get_mut(&id).map(|item| {
            item.main_ingredients = ingredients;
            item.updated_at = Utc::now();
            item.clone()
        }))
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<InventoryItem>> {
        let inventory = self.inventory.read().await;
        Ok(inventory
            .values()
            .find(|item| item.is_active && item.name_matches(name))
            .cloned())
    }

    async fn decrement_if_sufficient(
        &self,
        id: Uuid,
        quantity: Decimal,
    ) -> AppResult<StockDecrement> {
        let mut inventory = self.inventory.write().await;
        let item = inventory
            .get_mut(&id)
            .filter(|item| item.is_active)
            .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        if item.current_stock < quantity {
            return Ok(StockDecrement::Insufficient {
                available: item.current_stock,
            });
        }

        let previous_stock = item.current_stock;
        item.current_stock -= quantity;
        item.updated_at = Utc::now();
        self.record_write();

        Ok(StockDecrement::Applied {
            previous_stock,
            new_stock: item.current_stock,
        })
    }

    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        let inventory = self.inventory.read().await;
        let mut items: Vec<InventoryItem> = inventory
            .values()
            .filter(|item| item.is_active && item.is_low_stock())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.current_stock.cmp(&b.current_stock));
        Ok(items)
    }

    async fn list_active(
        &self,
        category: Option<InventoryCategory>,
        pagination: Pagination,
    ) -> AppResult<(Vec<InventoryItem>, u64)> {
        let inventory = self.inventory.read().await;
        let mut items: Vec<InventoryItem> = inventory
            .values()
            .filter(|item| item.is_active)
            .filter(|item| category.map_or(true, |c| item.category == c))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));

        let total = items.len() as u64;
        let page = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InventoryItem>> {
        Ok(self.inventory.read().await.get(&id).cloned())
    }

    async fn insert(&self, new: NewInventoryItem) -> AppResult<InventoryItem> {
        let mut inventory = self.inventory.write().await;
        if name_taken(&inventory, &new.name, None) {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let now = Utc::now();
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: new.name,
            category: new.category,
            current_stock: new.current_stock,
            min_stock: new.min_stock,
            max_stock: new.max_stock,
            unit: new.unit,
            cost_per_unit: new.cost_per_unit,
            supplier: new.supplier,
            expiry_date: new.expiry_date,
            last_restocked: now,
            notes: new.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inventory.insert(item.id, item.clone());
        self.record_write();
        Ok(item)
    }

    async fn update(&self, id: Uuid, changes: InventoryChanges) -> AppResult<Option<InventoryItem>> {
        let mut inventory = self.inventory.write().await;
        if let Some(name) = &changes.name {
            if name_taken(&inventory, name, Some(id)) {
                return Err(AppError::DuplicateEntry("name".to_string()));
            }
        }

        let Some(item) = inventory.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(item);
        item.updated_at = Utc::now();
        let updated = item.clone();
        self.record_write();
        Ok(Some(updated))
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<bool> {
        let mut inventory = self.inventory.write().await;
        match inventory.get_mut(&id) {
            Some(item) => {
                item.is_active = false;
                item.updated_at = Utc::now();
                self.record_write();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_order(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn save_status(&self, order: &Order) -> AppResult<Order> {
        let mut orders = self.orders.write().await;
        let stored = orders
            .get_mut(&order.id)
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
        stored.status = order.status;
        stored.notes = order.notes.clone();
        stored.actual_delivery_time = order.actual_delivery_time;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}
