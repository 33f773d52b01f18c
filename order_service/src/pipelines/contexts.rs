// order_service/src/pipelines/contexts.rs

//! Per-request state carried through the order pipeline.

use rust_decimal::Decimal;

use crate::errors::AppError;
use crate::models::{NewOrderRequest, Order};
use crate::state::AppState;

/// Why a pipeline run ended in `OrderStage::Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
  BadRequest,
  /// The collaborator answered with a non-success status.
  UpstreamRejected { status: u16 },
  UpstreamUnavailable,
  UpstreamDecode,
  Internal,
}

impl From<&AppError> for FailureReason {
  fn from(err: &AppError) -> Self {
    match err {
      AppError::BadRequest(_) => FailureReason::BadRequest,
      AppError::UpstreamNotFound { status, .. } => FailureReason::UpstreamRejected { status: *status },
      AppError::UpstreamUnavailable(_) => FailureReason::UpstreamUnavailable,
      AppError::UpstreamDecode(_) => FailureReason::UpstreamDecode,
      AppError::NotFound(_)
      | AppError::Persistence { .. }
      | AppError::NotFoundAfterCommit { .. }
      | AppError::Config(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => FailureReason::Internal,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStage {
  Received,
  Validating,
  Pricing,
  Persisting,
  Completed,
  Failed(FailureReason),
}

impl OrderStage {
  pub fn is_terminal(&self) -> bool {
    matches!(self, OrderStage::Completed | OrderStage::Failed(_))
  }
}

/// Context data for the create-order pipeline.
pub struct CreateOrderCtxData {
  pub app_state: AppState,
  pub request: NewOrderRequest,
  pub stage: OrderStage,
  /// Every stage entered, starting with `Received`.
  pub history: Vec<OrderStage>,
  pub total_amount: Option<Decimal>,
  /// Set by `persist_order`; taken by the caller once the run completes.
  pub order: Option<Order>,
}

impl CreateOrderCtxData {
  pub fn new(app_state: AppState, request: NewOrderRequest) -> Self {
    Self {
      app_state,
      request,
      stage: OrderStage::Received,
      history: vec![OrderStage::Received],
      total_amount: None,
      order: None,
    }
  }

  pub(crate) fn advance(&mut self, next: OrderStage) {
    debug_assert!(!self.stage.is_terminal(), "stage {:?} is terminal", self.stage);
    tracing::debug!(from = ?self.stage, to = ?next, "Order stage transition.");
    self.stage = next;
    self.history.push(next);
  }
}
