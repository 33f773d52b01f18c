// order_service/src/models/order_item.rs

use serde::Serialize;
use sqlx::FromRow;

/// One line item. There is no quantity column: a product bought twice is two rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: i32,
  #[sqlx(rename = "orderid")]
  pub order_id: i32,
  #[sqlx(rename = "productid")]
  pub product_id: i32,
}
