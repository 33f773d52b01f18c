// order_service/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::order_handlers;

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| {
    tracing::debug!(error = %err, "Rejected order request body.");
    AppError::BadRequest("Order request is invalid or has no products.".to_string()).into()
  })
}

fn id_path_config(message: &'static str) -> web::PathConfig {
  web::PathConfig::default().error_handler(move |err, _req| {
    tracing::debug!(error = %err, "Rejected path parameter.");
    AppError::BadRequest(message.to_string()).into()
  })
}

/// Mounts `/health` and the `/api/orders` resources. Body and path extraction
/// failures are rendered as `AppError::BadRequest`.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/api/orders")
        .route("", web::post().to(order_handlers::create_order_handler))
        .route("", web::get().to(order_handlers::list_orders_handler))
        .service(
          web::resource("/user/{id}")
            .app_data(id_path_config("Invalid User ID format"))
            .route(web::get().to(order_handlers::list_user_orders_handler)),
        )
        .service(
          web::resource("/{id}")
            .app_data(id_path_config("Invalid Order ID format"))
            .route(web::get().to(order_handlers::get_order_handler)),
        ),
    );
}
