//! Storage seams for menu, inventory and orders
//!
//! Services depend on these traits rather than on a concrete database so the
//! deduction engine can run against Postgres in production and an in-memory
//! store in tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    InventoryCategory, InventoryItem, MainIngredient, MenuCategory, MenuItem, Order, Pagination,
    StockDecrement,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Read access to menu items and their recipes
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn find_menu_item(&self, id: Uuid) -> AppResult<Option<MenuItem>>;

    async fn list_menu_items(
        &self,
        category: Option<MenuCategory>,
        available_only: bool,
    ) -> AppResult<Vec<MenuItem>>;

    /// Replace a menu item's recipe; `None` when the item does not exist
    async fn set_main_ingredients(
        &self,
        id: Uuid,
        ingredients: Vec<MainIngredient>,
    ) -> AppResult<Option<MenuItem>>;
}

/// Stock records and their mutations
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Active item whose name equals `name` ignoring case
    ///
    /// Case folding is backend-specific: Postgres applies `lower()` under the
    /// database collation while the in-memory store uses Rust's Unicode
    /// `to_lowercase`. Both agree on ASCII names; non-ASCII names may fold
    /// differently.
    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<InventoryItem>>;

    /// Subtract `quantity` only if the row holds at least that much, as one
    /// atomic step
    async fn decrement_if_sufficient(
        &self,
        id: Uuid,
        quantity: Decimal,
    ) -> AppResult<StockDecrement>;

    /// Active items with `current_stock <= min_stock`, most depleted first
    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>>;

    /// One page of active items sorted by name, plus the total count
    async fn list_active(
        &self,
        category: Option<InventoryCategory>,
        pagination: Pagination,
    ) -> AppResult<(Vec<InventoryItem>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InventoryItem>>;

    async fn insert(&self, item: NewInventoryItem) -> AppResult<InventoryItem>;

    async fn update(&self, id: Uuid, changes: InventoryChanges) -> AppResult<Option<InventoryItem>>;

    /// Soft delete; returns false when the item does not exist
    async fn deactivate(&self, id: Uuid) -> AppResult<bool>;
}

/// Order persistence needed by the status workflow
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_order(&self, id: Uuid) -> AppResult<Option<Order>>;

    async fn save_status(&self, order: &Order) -> AppResult<Order>;
}

/// Fields for a new inventory row
#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: InventoryCategory,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Decimal,
    pub unit: String,
    pub cost_per_unit: Decimal,
    pub supplier: String,
    pub expiry_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update for an inventory row; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct InventoryChanges {
    pub name: Option<String>,
    pub category: Option<InventoryCategory>,
    pub current_stock: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub max_stock: Option<Decimal>,
    pub unit: Option<String>,
    pub cost_per_unit: Option<Decimal>,
    pub supplier: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub last_restocked: Option<DateTime<Utc>>,
}

impl InventoryChanges {
    /// Apply the changes to an in-memory copy of a row
    pub fn apply_to(&self, item: &mut InventoryItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(current_stock) = self.current_stock {
            item.current_stock = current_stock;
        }
        if let Some(min_stock) = self.min_stock {
            item.min_stock = min_stock;
        }
        if let Some(max_stock) = self.max_stock {
            item.max_stock = max_stock;
        }
        if let Some(unit) = &self.unit {
            item.unit = unit.clone();
        }
        if let Some(cost_per_unit) = self.cost_per_unit {
            item.cost_per_unit = cost_per_unit;
        }
        if let Some(supplier) = &self.supplier {
            item.supplier = supplier.clone();
        }
        if self.expiry_date.is_some() {
            item.expiry_date = self.expiry_date;
        }
        if self.notes.is_some() {
            item.notes = self.notes.clone();
        }
        if let Some(last_restocked) = self.last_restocked {
            item.last_restocked = last_restocked;
        }
    }
}
