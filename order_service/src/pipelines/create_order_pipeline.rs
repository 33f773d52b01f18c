// order_service/src/pipelines/create_order_pipeline.rs

//! Order creation: check request → validate user → price items → persist.
//!
//! Steps run strictly one after another and the first error ends the run. Nothing
//! is written before `persist_order`, and that step is a single transaction, so a
//! failed run never leaves a partial order behind.

use std::sync::Arc;

use orka::{ContextData, Orka, OrkaResult, Pipeline, PipelineControl, PipelineResult, RunOutcome};
use tracing::{debug, info, warn};

use crate::errors::{AppError, Result};
use crate::models::{NewOrderRequest, Order};
use crate::pipelines::contexts::{CreateOrderCtxData, FailureReason, OrderStage};
use crate::services::price_products;

pub const CHECK_REQUEST: &str = "check_request";
pub const VALIDATE_USER: &str = "validate_user";
pub const PRICE_ITEMS: &str = "price_items";
pub const PERSIST_ORDER: &str = "persist_order";

/// Step names in execution order.
pub const STEPS: [&str; 4] = [CHECK_REQUEST, VALIDATE_USER, PRICE_ITEMS, PERSIST_ORDER];

/// Registers the create-order pipeline with the Orka registry.
pub fn register_create_order_pipeline(orka_instance: &Arc<Orka<AppError>>) -> OrkaResult<()> {
  let mut p = Pipeline::<CreateOrderCtxData, AppError>::new(STEPS);

  p.on_root(CHECK_REQUEST, check_request_step)
    .on_root(VALIDATE_USER, validate_user_step)
    .on_root(PRICE_ITEMS, price_items_step)
    .on_root(PERSIST_ORDER, persist_order_step)
    .on_finish(log_run_outcome);

  orka_instance.register_pipeline(p)
}

/// Runs the registered pipeline over `ctx` and hands back the persisted order.
/// On failure the context is left in `OrderStage::Failed`.
pub async fn run_create_order(ctx: &ContextData<CreateOrderCtxData>) -> Result<Order> {
  let orka_instance = ctx.read().app_state.orka_instance.clone();

  let result = match orka_instance.run(ctx.clone()).await {
    Ok(PipelineResult::Completed) => {
      let order = ctx.write().order.take();
      order.ok_or_else(|| AppError::Internal("Order pipeline completed without a persisted order.".to_string()))
    }
    Ok(other) => Err(AppError::Internal(format!(
      "Order pipeline did not complete: {:?}",
      other
    ))),
    Err(e) => Err(e),
  };

  if let Err(e) = &result {
    let mut guard = ctx.write();
    if !guard.stage.is_terminal() {
      guard.advance(OrderStage::Failed(FailureReason::from(e)));
    }
  }
  result
}

async fn check_request_step(ctx: ContextData<CreateOrderCtxData>) -> Result<PipelineControl> {
  let request = ctx.read().request.clone();
  check_request(&request)?;

  ctx.write().advance(OrderStage::Validating);
  Ok(PipelineControl::Continue)
}

async fn validate_user_step(ctx: ContextData<CreateOrderCtxData>) -> Result<PipelineControl> {
  let (users, user_id) = {
    let guard = ctx.read();
    (guard.app_state.users.clone(), guard.request.user_id)
  };

  users.ensure_user_exists(user_id).await?;

  ctx.write().advance(OrderStage::Pricing);
  Ok(PipelineControl::Continue)
}

async fn price_items_step(ctx: ContextData<CreateOrderCtxData>) -> Result<PipelineControl> {
  let (catalog, product_ids) = {
    let guard = ctx.read();
    (guard.app_state.catalog.clone(), guard.request.product_ids.clone())
  };

  let total_amount = price_products(catalog.as_ref(), &product_ids).await?;

  let mut guard = ctx.write();
  guard.total_amount = Some(total_amount);
  guard.advance(OrderStage::Persisting);
  Ok(PipelineControl::Continue)
}

async fn persist_order_step(ctx: ContextData<CreateOrderCtxData>) -> Result<PipelineControl> {
  let (store, user_id, product_ids, total_amount) = {
    let guard = ctx.read();
    (
      guard.app_state.store.clone(),
      guard.request.user_id,
      guard.request.product_ids.clone(),
      guard.total_amount,
    )
  };
  let total_amount =
    total_amount.ok_or_else(|| AppError::Internal("Order total was not computed before persisting.".to_string()))?;

  let order = store.create_with_items(user_id, total_amount, &product_ids).await?;
  debug!(order_id = order.id, "Order persisted.");

  let mut guard = ctx.write();
  guard.order = Some(order);
  guard.advance(OrderStage::Completed);
  Ok(PipelineControl::Continue)
}

async fn log_run_outcome(ctx: ContextData<CreateOrderCtxData>, outcome: RunOutcome) -> Result<()> {
  let guard = ctx.read();
  match &guard.order {
    Some(order) => info!(order_id = order.id, total = %order.total_amount, %outcome, "Order pipeline finished."),
    None => warn!(user_id = guard.request.user_id, history = ?guard.history, %outcome, "Order pipeline finished without an order."),
  }
  Ok(())
}

fn check_request(request: &NewOrderRequest) -> Result<()> {
  if request.product_ids.is_empty() {
    return Err(AppError::BadRequest("Order request is invalid or has no products.".to_string()));
  }
  if request.user_id <= 0 {
    return Err(AppError::BadRequest(format!(
      "Invalid user ID {}: must be a positive integer",
      request.user_id
    )));
  }
  Ok(())
}
