// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset

use std::net::SocketAddr;

use actix_web::{web, App, HttpResponse, HttpServer};
use once_cell::sync::Lazy;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Known user in the fake user service.
pub const KNOWN_USER: i32 = 7;
/// Product answered with a body that is not JSON.
pub const GARBLED_PRODUCT: i32 = 500;
/// Product whose lookup answers `503 Service Unavailable`.
pub const FLAKY_PRODUCT: i32 = 503;

async fn fake_user(path: web::Path<i32>) -> HttpResponse {
  match path.into_inner() {
    KNOWN_USER => HttpResponse::Ok().json(serde_json::json!({ "id": KNOWN_USER, "name": "Ada" })),
    _ => HttpResponse::NotFound().json(serde_json::json!({ "message": "User not found" })),
  }
}

async fn fake_product(path: web::Path<i32>) -> HttpResponse {
  let id = path.into_inner();
  // Raw bodies so prices reach the client exactly as written
  let product = |price: &str| {
    HttpResponse::Ok()
      .content_type("application/json")
      .body(format!(r#"{{"_id":"{id}","name":"Product {id}","price":{price}}}"#))
  };
  match id {
    101 => product("9.99"),
    102 => product("5.00"),
    103 => product("0.1"),
    GARBLED_PRODUCT => HttpResponse::Ok().content_type("application/json").body("not json"),
    FLAKY_PRODUCT => HttpResponse::ServiceUnavailable().finish(),
    _ => HttpResponse::NotFound().finish(),
  }
}

/// Starts an in-process stand-in for both collaborators on an ephemeral port and
/// returns its base URL. Must be called from within an actix runtime.
pub fn spawn_fake_collaborators() -> std::io::Result<String> {
  let server = HttpServer::new(|| {
    App::new()
      .route("/api/users/{id}", web::get().to(fake_user))
      .route("/api/products/{id}", web::get().to(fake_product))
  })
  .workers(1)
  .bind(("127.0.0.1", 0))?;

  let addr: SocketAddr = server.addrs()[0];
  actix_rt::spawn(server.run());
  Ok(format!("http://{}", addr))
}
