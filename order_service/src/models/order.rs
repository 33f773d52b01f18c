// order_service/src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::order_item::OrderItem;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: i32,
  #[sqlx(rename = "userid")]
  pub user_id: i32,
  // Sum of catalog prices at creation time. Never recomputed from the items.
  #[sqlx(rename = "totalamount")]
  #[serde(with = "rust_decimal::serde::arbitrary_precision")]
  pub total_amount: Decimal,
  #[sqlx(rename = "orderdate")]
  pub order_date: DateTime<Utc>,
  // Filled from `orderitems` after the order rows are loaded
  #[sqlx(skip)]
  pub order_items: Vec<OrderItem>,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
  pub user_id: i32,
  pub product_ids: Vec<i32>,
}
