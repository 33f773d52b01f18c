// order_service/src/db/orders_repository.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument, warn};

use super::{attach_items, OrderStore};
use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem};

const INSERT_ORDER_SQL: &str = "INSERT INTO orders (userid, totalamount) VALUES ($1, $2) RETURNING id";
const INSERT_ORDER_ITEM_SQL: &str = "INSERT INTO orderitems (orderid, productid) VALUES ($1, $2)";

const SELECT_ORDER_SQL: &str = "SELECT id, userid, totalamount, orderdate FROM orders WHERE id = $1";
const SELECT_ALL_ORDERS_SQL: &str =
  "SELECT id, userid, totalamount, orderdate FROM orders ORDER BY orderdate DESC, id DESC";
const SELECT_USER_ORDERS_SQL: &str =
  "SELECT id, userid, totalamount, orderdate FROM orders WHERE userid = $1 ORDER BY orderdate DESC, id DESC";
const SELECT_ITEMS_FOR_ORDERS_SQL: &str =
  "SELECT id, orderid, productid FROM orderitems WHERE orderid = ANY($1) ORDER BY id ASC";

#[derive(Debug, Clone)]
pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    total_amount: Decimal,
    product_ids: &[i32],
  ) -> Result<i32> {
    let order_id: i32 = sqlx::query_scalar(INSERT_ORDER_SQL)
      .bind(user_id)
      .bind(total_amount)
      .fetch_one(&mut **tx)
      .await
      .map_err(AppError::persistence("Failed to create order"))?;
    debug!(order_id, "Inserted order row.");

    for product_id in product_ids {
      sqlx::query(INSERT_ORDER_ITEM_SQL)
        .bind(order_id)
        .bind(product_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::persistence("Failed to create order item"))?;
    }
    debug!(order_id, items = product_ids.len(), "Inserted order item rows.");

    Ok(order_id)
  }

  async fn fetch_items(&self, order_ids: &[i32]) -> std::result::Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(SELECT_ITEMS_FOR_ORDERS_SQL)
      .bind(order_ids)
      .fetch_all(&self.pool)
      .await
  }
}

#[async_trait]
impl OrderStore for PgOrderStore {
  #[instrument(name = "repository::create_with_items", skip(self, product_ids), fields(items = product_ids.len()), err(Display))]
  async fn create_with_items(&self, user_id: i32, total_amount: Decimal, product_ids: &[i32]) -> Result<Order> {
    // Dropping an uncommitted `Transaction` rolls it back, so every early
    // return below leaves neither the order nor any of its items behind.
    let mut tx = self
      .pool
      .begin()
      .await
      .map_err(AppError::persistence("Failed to begin transaction"))?;

    let order_id = Self::insert_order(&mut tx, user_id, total_amount, product_ids).await?;

    tx.commit()
      .await
      .map_err(AppError::persistence("Failed to commit transaction"))?;
    info!(order_id, "Order transaction committed.");

    match self.get_order(order_id).await {
      Ok(Some(order)) => Ok(order),
      Ok(None) => {
        warn!(order_id, "Committed order could not be found on read-back.");
        Err(AppError::NotFoundAfterCommit { order_id })
      }
      Err(e) => {
        warn!(order_id, error = %e, "Read-back of committed order failed.");
        Err(AppError::NotFoundAfterCommit { order_id })
      }
    }
  }

  #[instrument(name = "repository::get_order", skip(self), err(Display))]
  async fn get_order(&self, order_id: i32) -> Result<Option<Order>> {
    let order: Option<Order> = sqlx::query_as(SELECT_ORDER_SQL)
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await
      .map_err(AppError::persistence("Failed to query order"))?;

    let Some(order) = order else {
      return Ok(None);
    };

    let items = self
      .fetch_items(&[order.id])
      .await
      .map_err(AppError::persistence("Failed to query order items"))?;
    let mut orders = [order];
    attach_items(&mut orders, items);
    let [order] = orders;
    Ok(Some(order))
  }

  #[instrument(name = "repository::list_all", skip(self), err(Display))]
  async fn list_all(&self) -> Result<Vec<Order>> {
    let mut orders: Vec<Order> = sqlx::query_as(SELECT_ALL_ORDERS_SQL)
      .fetch_all(&self.pool)
      .await
      .map_err(AppError::persistence("Failed to query all orders"))?;
    debug!(count = orders.len(), "Loaded order rows.");

    if orders.is_empty() {
      return Ok(orders);
    }

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let items = self
      .fetch_items(&order_ids)
      .await
      .map_err(AppError::persistence("Failed to query order items"))?;
    attach_items(&mut orders, items);

    Ok(orders)
  }

  #[instrument(name = "repository::list_by_user", skip(self), err(Display))]
  async fn list_by_user(&self, user_id: i32) -> Result<Vec<Order>> {
    let mut orders: Vec<Order> = sqlx::query_as(SELECT_USER_ORDERS_SQL)
      .bind(user_id)
      .fetch_all(&self.pool)
      .await
      .map_err(AppError::persistence("Failed to process user orders"))?;
    debug!(count = orders.len(), "Loaded order rows for user.");

    if orders.is_empty() {
      return Ok(orders);
    }

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    match self.fetch_items(&order_ids).await {
      Ok(items) => attach_items(&mut orders, items),
      Err(e) => {
        warn!(
          user_id,
          ?order_ids,
          error = %e,
          "Failed to query order items. Returning orders without item details."
        );
      }
    }

    Ok(orders)
  }
}
