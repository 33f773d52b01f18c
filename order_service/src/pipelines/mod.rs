// order_service/src/pipelines/mod.rs

//! The order creation workflow and the state it carries between steps.

pub mod contexts;
pub mod create_order_pipeline;

use std::sync::Arc;

use orka::{Orka, OrkaResult};

use crate::errors::AppError;

pub use contexts::{CreateOrderCtxData, FailureReason, OrderStage};
pub use create_order_pipeline::run_create_order;

pub fn register_all_pipelines(orka_instance: &Arc<Orka<AppError>>) -> OrkaResult<()> {
  create_order_pipeline::register_create_order_pipeline(orka_instance)?;
  tracing::info!("All order pipelines registered.");
  Ok(())
}
