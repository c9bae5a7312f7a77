//! HTTP handlers for order endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_order_quantity;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{AvailabilityResult, OrderLineItem};
use crate::services::order::{StatusUpdate, UpdateStatusInput};
use crate::AppState;

/// Items to check against inventory before an order is placed
#[derive(Debug, Deserialize, Validate)]
pub struct CheckInventoryInput {
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<OrderLineItem>,
}

impl CheckInventoryInput {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        for item in &self.items {
            validate_order_quantity(item.quantity).map_err(|m| AppError::validation("quantity", m))?;
        }
        Ok(())
    }
}

/// Change an order's status (staff)
pub async fn update_order_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<StatusUpdate>> {
    current_user.0.require_staff()?;

    tracing::debug!(
        "User {} setting order {} to {}",
        current_user.0.user_id,
        id,
        input.status.as_str()
    );
    let update = state.order_service().update_status(id, input).await?;
    Ok(Json(update))
}

/// Check whether inventory covers the given items without touching stock (staff)
pub async fn check_inventory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CheckInventoryInput>,
) -> AppResult<Json<AvailabilityResult>> {
    current_user.0.require_staff()?;
    input.check()?;

    let result = state
        .inventory_service()
        .check_inventory_availability(&input.items)
        .await;
    Ok(Json(result))
}
