//! Order status workflow
//!
//! Only the part of the lifecycle that touches inventory lives here: marking
//! an order delivered consumes its ingredients.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{DeductionResult, Order, OrderStatus};
use crate::services::inventory::InventoryService;
use crate::store::OrderStore;

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    inventory: InventoryService,
}

/// Input for changing an order's status
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Result of a status change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub message: String,
    pub order: Order,
    /// Present only when the update delivered the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_deduction: Option<DeductionResult>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>, inventory: InventoryService) -> Self {
        Self { orders, inventory }
    }

    /// Set an order's status
    ///
    /// Moving an order into the delivered state deducts its main ingredients,
    /// once. The status change is saved whatever the deduction outcome; the
    /// outcome only rides along in the response.
    pub async fn update_status(&self, id: Uuid, input: UpdateStatusInput) -> AppResult<StatusUpdate> {
        input.validate()?;

        let mut order = self
            .orders
            .find_order(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let previous_status = order.status;
        order.status = input.status;
        if let Some(notes) = input.notes.filter(|n| !n.is_empty()) {
            order.notes = Some(notes);
        }

        let mut inventory_deduction = None;
        // A repeated delivery must not consume ingredients twice
        if input.status.triggers_deduction() && !previous_status.triggers_deduction() {
            order.actual_delivery_time = Some(Utc::now());
            tracing::info!(
                "Order {} marked as delivered. Starting inventory deduction...",
                order.order_number
            );

            let result = self.inventory.deduct_main_ingredients(&order.items).await;
            log_deduction(&order, &result);
            inventory_deduction = Some(result);
        }

        let order = self.orders.save_status(&order).await?;

        Ok(StatusUpdate {
            message: "Order status updated successfully".to_string(),
            order,
            inventory_deduction,
        })
    }
}

fn log_deduction(order: &Order, result: &DeductionResult) {
    tracing::info!(
        "Inventory deduction for order {}: success={}, deductions={}, errors={}",
        order.order_number,
        result.success,
        result.deductions.len(),
        result.errors.len()
    );

    for error in &result.errors {
        tracing::warn!(
            "Inventory deduction issue for order {}: {} / {}: {}",
            order.order_number,
            error.menu_item.as_deref().unwrap_or("-"),
            error.ingredient.as_deref().unwrap_or("-"),
            error.error
        );
    }
}
