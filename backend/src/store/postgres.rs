//! PostgreSQL store backed by sqlx

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{InventoryChanges, InventoryStore, MenuCatalog, NewInventoryItem, OrderStore};
use crate::error::{AppError, AppResult};
use crate::models::{
    InventoryCategory, InventoryItem, MainIngredient, MenuCategory, MenuItem, Order,
    OrderLineItem, OrderStatus, Pagination, StockDecrement,
};

const INVENTORY_COLUMNS: &str = "id, name, category, current_stock, min_stock, max_stock, unit, \
     cost_per_unit, supplier, expiry_date, last_restocked, notes, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn load_main_ingredients(&self, menu_item_id: Uuid) -> AppResult<Vec<MainIngredient>> {
        let rows = sqlx::query_as::<_, (String, Decimal, String)>(
            r#"
            SELECT name, quantity, unit
            FROM menu_item_main_ingredients
            WHERE menu_item_id = $1
            ORDER BY position
            "#,
        )
        .bind(menu_item_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, quantity, unit)| MainIngredient { name, quantity, unit })
            .collect())
    }

    async fn load_line_items(&self, order_id: Uuid) -> AppResult<Vec<OrderLineItem>> {
        let rows = sqlx::query_as::<_, (Uuid, i32, Decimal)>(
            r#"
            SELECT menu_item_id, quantity, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(menu_item, quantity, price)| OrderLineItem {
                menu_item,
                quantity: u32::try_from(quantity).unwrap_or(0),
                price,
            })
            .collect())
    }
}

/// Row for inventory queries
#[derive(Debug, FromRow)]
struct InventoryRow {
    id: Uuid,
    name: String,
    category: String,
    current_stock: Decimal,
    min_stock: Decimal,
    max_stock: Decimal,
    unit: String,
    cost_per_unit: Decimal,
    supplier: String,
    expiry_date: Option<NaiveDate>,
    last_restocked: DateTime<Utc>,
    notes: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InventoryRow> for InventoryItem {
    type Error = AppError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<InventoryCategory>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(InventoryItem {
            id: row.id,
            name: row.name,
            category,
            current_stock: row.current_stock,
            min_stock: row.min_stock,
            max_stock: row.max_stock,
            unit: row.unit,
            cost_per_unit: row.cost_per_unit,
            supplier: row.supplier,
            expiry_date: row.expiry_date,
            last_restocked: row.last_restocked,
            notes: row.notes,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_items(rows: Vec<InventoryRow>) -> AppResult<Vec<InventoryItem>> {
    rows.into_iter().map(InventoryItem::try_from).collect()
}

/// Row for menu item queries
#[derive(Debug, FromRow)]
struct MenuItemRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    ingredients: Vec<String>,
    preparation_time: i32,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MenuItemRow {
    fn into_menu_item(self, main_ingredients: Vec<MainIngredient>) -> AppResult<MenuItem> {
        let category = self
            .category
            .parse::<MenuCategory>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            category,
            ingredients: self.ingredients,
            main_ingredients,
            preparation_time: self.preparation_time,
            is_available: self.is_available,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row for order queries
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    status: String,
    notes: Option<String>,
    actual_delivery_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderLineItem>) -> AppResult<Order> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Order {
            id: self.id,
            order_number: self.order_number,
            items,
            status,
            notes: self.notes,
            actual_delivery_time: self.actual_delivery_time,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl MenuCatalog for PgStore {
    async fn find_menu_item(&self, id: Uuid) -> AppResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuItemRow>(
            r#"
            SELECT id, name, description, price, category, ingredients, preparation_time,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => {
                let main_ingredients = self.load_main_ingredients(row.id).await?;
                Ok(Some(row.into_menu_item(main_ingredients)?))
            }
            None => Ok(None),
        }
    }

    async fn list_menu_items(
        &self,
        category: Option<MenuCategory>,
        available_only: bool,
    ) -> AppResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(
            r#"
            SELECT id, name, description, price, category, ingredients, preparation_time,
                   is_available, created_at, updated_at
            FROM menu_items
            WHERE ($1::text IS NULL OR category = $1)
              AND (NOT $2 OR is_available)
            ORDER BY category, name
            "#,
        )
        .bind(category.map(|c| c.as_str()))
        .bind(available_only)
        .fetch_all(&self.db)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let main_ingredients = self.load_main_ingredients(row.id).await?;
            items.push(row.into_menu_item(main_ingredients)?);
        }
        Ok(items)
    }

    async fn set_main_ingredients(
        &self,
        id: Uuid,
        ingredients: Vec<MainIngredient>,
    ) -> AppResult<Option<MenuItem>> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query("UPDATE menu_items SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM menu_item_main_ingredients WHERE menu_item_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (position, ingredient) in ingredients.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO menu_item_main_ingredients (menu_item_id, position, name, quantity, unit)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id)
            .bind(position as i32)
            .bind(ingredient.name.trim())
            .bind(ingredient.quantity)
            .bind(ingredient.unit.trim())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.find_menu_item(id).await
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn find_active_by_name(&self, name: &str) -> AppResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory_items \
             WHERE is_active AND lower(name) = lower($1) LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        row.map(InventoryItem::try_from).transpose()
    }

    async fn decrement_if_sufficient(
        &self,
        id: Uuid,
        quantity: Decimal,
    ) -> AppResult<StockDecrement> {
        let applied = sqlx::query_as::<_, (Decimal,)>(
            r#"
            UPDATE inventory_items
            SET current_stock = current_stock - $2, updated_at = NOW()
            WHERE id = $1 AND is_active AND current_stock >= $2
            RETURNING current_stock
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.db)
        .await?;

        if let Some((new_stock,)) = applied {
            return Ok(StockDecrement::Applied {
                previous_stock: new_stock + quantity,
                new_stock,
            });
        }

        let available = sqlx::query_scalar::<_, Decimal>(
            "SELECT current_stock FROM inventory_items WHERE id = $1 AND is_active",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

        Ok(StockDecrement::Insufficient { available })
    }

    async fn list_low_stock(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory_items \
             WHERE is_active AND current_stock <= min_stock \
             ORDER BY current_stock ASC"
        ))
        .fetch_all(&self.db)
        .await?;

        into_items(rows)
    }

    async fn list_active(
        &self,
        category: Option<InventoryCategory>,
        pagination: Pagination,
    ) -> AppResult<(Vec<InventoryItem>, u64)> {
        let category = category.map(|c| c.as_str());

        let rows = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory_items \
             WHERE is_active AND ($1::text IS NULL OR category = $1) \
             ORDER BY name ASC \
             OFFSET $2 LIMIT $3"
        ))
        .bind(category)
        .bind(pagination.offset() as i64)
        .bind(i64::from(pagination.limit))
        .fetch_all(&self.db)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory_items WHERE is_active AND ($1::text IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.db)
        .await?;

        Ok((into_items(rows)?, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(InventoryItem::try_from).transpose()
    }

    async fn insert(&self, item: NewInventoryItem) -> AppResult<InventoryItem> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "INSERT INTO inventory_items \
                 (name, category, current_stock, min_stock, max_stock, unit, cost_per_unit, \
                  supplier, expiry_date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {INVENTORY_COLUMNS}"
        ))
        .bind(&item.name)
        .bind(item.category.as_str())
        .bind(item.current_stock)
        .bind(item.min_stock)
        .bind(item.max_stock)
        .bind(&item.unit)
        .bind(item.cost_per_unit)
        .bind(&item.supplier)
        .bind(item.expiry_date)
        .bind(&item.notes)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "name"))?;

        row.try_into()
    }

    async fn update(&self, id: Uuid, changes: InventoryChanges) -> AppResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, InventoryRow>(&format!(
            "UPDATE inventory_items SET \
                 name = COALESCE($2, name), \
                 category = COALESCE($3, category), \
                 current_stock = COALESCE($4, current_stock), \
                 min_stock = COALESCE($5, min_stock), \
                 max_stock = COALESCE($6, max_stock), \
                 unit = COALESCE($7, unit), \
                 cost_per_unit = COALESCE($8, cost_per_unit), \
                 supplier = COALESCE($9, supplier), \
                 expiry_date = COALESCE($10, expiry_date), \
                 notes = COALESCE($11, notes), \
                 last_restocked = COALESCE($12, last_restocked), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {INVENTORY_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(changes.category.map(|c| c.as_str()))
        .bind(changes.current_stock)
        .bind(changes.min_stock)
        .bind(changes.max_stock)
        .bind(&changes.unit)
        .bind(changes.cost_per_unit)
        .bind(&changes.supplier)
        .bind(changes.expiry_date)
        .bind(&changes.notes)
        .bind(changes.last_restocked)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "name"))?;

        row.map(InventoryItem::try_from).transpose()
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE inventory_items SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn find_order(&self, id: Uuid) -> AppResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, order_number, status, notes, actual_delivery_time, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => {
                let items = self.load_line_items(row.id).await?;
                Ok(Some(row.into_order(items)?))
            }
            None => Ok(None),
        }
    }

    async fn save_status(&self, order: &Order) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET status = $2, notes = $3, actual_delivery_time = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, order_number, status, notes, actual_delivery_time, created_at, updated_at
            "#,
        )
        .bind(order.id)
        .bind(order.status.as_str())
        .bind(&order.notes)
        .bind(order.actual_delivery_time)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        row.into_order(order.items.clone())
    }
}
