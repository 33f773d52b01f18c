// order_service/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use orka::ContextData;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::NewOrderRequest;
use crate::pipelines::{run_create_order, CreateOrderCtxData};
use crate::state::AppState;

#[instrument(
    name = "handler::create_order",
    skip(app_state, payload),
    fields(user_id = payload.user_id, products = payload.product_ids.len())
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewOrderRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx = ContextData::new(CreateOrderCtxData::new(
    app_state.get_ref().clone(),
    payload.into_inner(),
  ));
  let order = run_create_order(&ctx).await?;

  info!(order_id = order.id, "Order created.");
  Ok(HttpResponse::Created().json(order))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.store.list_all().await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::list_user_orders", skip(app_state))]
pub async fn list_user_orders_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();
  let orders = app_state.store.list_by_user(user_id).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state))]
pub async fn get_order_handler(app_state: web::Data<AppState>, path: web::Path<i32>) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  match app_state.store.get_order(order_id).await? {
    Some(order) => Ok(HttpResponse::Ok().json(order)),
    None => Err(AppError::NotFound(format!("Order with ID {} not found", order_id))),
  }
}
