//! HTTP handlers for inventory management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{InventoryCategory, LowStockReport, Pagination, StockStatus};
use crate::services::inventory::{
    CreateInventoryItemInput, InventoryFilter, InventoryItemView, InventoryPage,
    UpdateInventoryItemInput,
};
use crate::AppState;

/// Query parameters for listing inventory
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    pub category: Option<String>,
    pub stock_status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl InventoryQuery {
    /// "all" and empty values mean no filter
    pub fn into_filter(self) -> AppResult<InventoryFilter> {
        Ok(InventoryFilter {
            category: parse_filter::<InventoryCategory>("category", self.category.as_deref())?,
            stock_status: parse_filter::<StockStatus>("stockStatus", self.stock_status.as_deref())?,
            pagination: Pagination::new(self.page, self.limit),
        })
    }
}

fn parse_filter<T>(field: &str, raw: Option<&str>) -> AppResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::validation(field, e.to_string())),
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List inventory items (admin)
pub async fn list_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<InventoryPage>> {
    current_user.0.require_admin()?;

    let page = state.inventory_service().list_items(query.into_filter()?).await?;
    Ok(Json(page))
}

/// Add an inventory item (admin)
pub async fn create_inventory_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateInventoryItemInput>,
) -> AppResult<(StatusCode, Json<InventoryItemView>)> {
    current_user.0.require_admin()?;

    let item = state.inventory_service().create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item (admin)
pub async fn update_inventory_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateInventoryItemInput>,
) -> AppResult<Json<InventoryItemView>> {
    current_user.0.require_admin()?;

    let item = state.inventory_service().update_item(id, input).await?;
    Ok(Json(item))
}

/// Deactivate an inventory item (admin)
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    current_user.0.require_admin()?;

    state.inventory_service().delete_item(id).await?;
    Ok(Json(MessageResponse {
        message: "Inventory item deleted successfully".to_string(),
    }))
}

/// Items at or below their minimum stock (staff)
pub async fn get_low_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<LowStockReport>> {
    current_user.0.require_staff()?;

    Ok(Json(state.inventory_service().get_low_stock_alerts().await))
}
