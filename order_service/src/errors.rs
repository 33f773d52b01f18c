// order_service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use orka::OrkaError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  /// A collaborator answered, but not with the resource we asked for.
  /// `status` is the collaborator's own status code.
  #[error("{message}")]
  UpstreamNotFound { message: String, status: u16 },

  #[error("{0}")]
  UpstreamUnavailable(String),

  #[error("{0}")]
  UpstreamDecode(String),

  #[error("{context}: {source}")]
  Persistence {
    context: &'static str,
    #[source]
    source: sqlx::Error,
  },

  /// The write committed but reading it back failed.
  #[error("Failed to fetch created order details for order {order_id}")]
  NotFoundAfterCommit { order_id: i32 },

  #[error("Configuration Error: {0}")]
  Config(String),

  /// Raised by the workflow engine itself, never by a step.
  #[error("Order workflow error: {source}")]
  Workflow {
    #[from]
    source: OrkaError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Wraps a sqlx error with the operation that failed.
  pub fn persistence(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |source| AppError::Persistence { context, source }
  }

  /// Message exposed to HTTP callers. Database internals stay in the logs.
  pub fn public_message(&self) -> String {
    match self {
      AppError::Persistence { context, .. } => (*context).to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Workflow { .. } => "Order workflow processing error".to_string(),
      AppError::Internal(_) => "Internal Server Error".to_string(),
      other => other.to_string(),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::UpstreamNotFound { status, .. } => match StatusCode::from_u16(*status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
      },
      AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::UpstreamDecode(_)
      | AppError::Persistence { .. }
      | AppError::NotFoundAfterCommit { .. }
      | AppError::Config(_)
      | AppError::Workflow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, status = status.as_u16(), "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({ "error": self.public_message() }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
