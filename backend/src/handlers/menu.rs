//! HTTP handlers for menu endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{MenuCategory, MenuItem};
use crate::services::menu::SetMainIngredientsInput;
use crate::AppState;

/// Query parameters for listing the menu
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    pub category: Option<String>,
    pub available_only: Option<bool>,
}

/// List menu items
pub async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let category = match query.category.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<MenuCategory>()
                .map_err(|e| AppError::validation("category", e.to_string()))?,
        ),
    };

    let items = state
        .menu_service()
        .list(category, query.available_only.unwrap_or(false))
        .await?;
    Ok(Json(items))
}

/// Get a single menu item
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MenuItem>> {
    let item = state.menu_service().get(id).await?;
    Ok(Json(item))
}

/// Replace the main ingredients of a menu item (admin)
pub async fn set_main_ingredients(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<SetMainIngredientsInput>,
) -> AppResult<Json<MenuItem>> {
    current_user.0.require_admin()?;

    let item = state.menu_service().set_main_ingredients(id, input).await?;
    tracing::info!(
        "Main ingredients for menu item {} updated by {}",
        item.name,
        current_user.0.user_id
    );
    Ok(Json(item))
}
