//! Order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UnknownVariant;

/// A customer or walk-in order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub items: Vec<OrderLineItem>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub actual_delivery_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A menu item reference and the number of units ordered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub menu_item: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
}

impl OrderLineItem {
    pub fn new(menu_item: Uuid, quantity: u32) -> Self {
        Self {
            menu_item,
            quantity,
            price: Decimal::ZERO,
        }
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "order placed")]
    OrderPlaced,
    #[serde(rename = "cooking in progress")]
    CookingInProgress,
    #[serde(rename = "ready for pickup")]
    ReadyForPickup,
    #[serde(rename = "out for delivery")]
    OutForDelivery,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OrderPlaced => "order placed",
            OrderStatus::CookingInProgress => "cooking in progress",
            OrderStatus::ReadyForPickup => "ready for pickup",
            OrderStatus::OutForDelivery => "out for delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Entering this status consumes the order's ingredients
    pub fn triggers_deduction(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "order placed" => Ok(OrderStatus::OrderPlaced),
            "cooking in progress" => Ok(OrderStatus::CookingInProgress),
            "ready for pickup" => Ok(OrderStatus::ReadyForPickup),
            "out for delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(UnknownVariant::new("order status", s)),
        }
    }
}
