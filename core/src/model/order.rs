// forkful/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OrderStatus {
  Pending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  #[default]
  Card,
  Cash,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
  pub address: String,
  pub city: String,
  pub zip_code: String,
  pub phone: String,
}

/// A cart line frozen into an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
  pub restaurant_id: String,
  pub restaurant_name: String,
  pub name: String,
  pub price: f64,
  pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
  pub items: Vec<OrderLine>,
  pub total_amount: f64,
  pub delivery_address: DeliveryAddress,
  pub payment_method: PaymentMethod,
}

/// A placed order, stored under `order:<userId>:<epochMillis>`; `id` is that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: String,
  pub user_id: String,
  pub items: Vec<OrderLine>,
  pub total_amount: f64,
  pub delivery_address: DeliveryAddress,
  pub payment_method: PaymentMethod,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

impl Order {
  /// Builds the pending order for `user_id` from a submitted body.
  pub fn pending(id: String, user_id: String, new_order: NewOrder, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      user_id,
      items: new_order.items,
      total_amount: new_order.total_amount,
      delivery_address: new_order.delivery_address,
      payment_method: new_order.payment_method,
      status: OrderStatus::Pending,
      created_at,
    }
  }
}
