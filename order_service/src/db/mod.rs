// order_service/src/db/mod.rs

//! Persistence for orders and their line items.

pub mod orders_repository;

use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::models::{Order, OrderItem};

pub use orders_repository::PgOrderStore;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Inserts the order and one item per product id in a single transaction and
  /// returns the order as re-read after commit.
  async fn create_with_items(&self, user_id: i32, total_amount: Decimal, product_ids: &[i32]) -> Result<Order>;

  async fn get_order(&self, order_id: i32) -> Result<Option<Order>>;

  /// All orders, newest first. A failure loading items fails the call.
  async fn list_all(&self) -> Result<Vec<Order>>;

  /// Orders of one user, newest first. A failure loading items is logged and the
  /// orders are returned without items.
  async fn list_by_user(&self, user_id: i32) -> Result<Vec<Order>>;
}

/// Attaches each item to the order it belongs to. Items whose order is not in
/// `orders` are dropped. Item order within an order follows `items`.
pub fn attach_items(orders: &mut [Order], items: Vec<OrderItem>) {
  let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
  for item in items {
    by_order.entry(item.order_id).or_default().push(item);
  }
  for order in orders.iter_mut() {
    if let Some(order_items) = by_order.remove(&order.id) {
      order.order_items = order_items;
    }
  }
}
