// order_service/src/main.rs

use std::sync::Arc;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use order_service::config::AppConfig;
use order_service::db::PgOrderStore;
use order_service::errors::AppError;
use order_service::pipelines::register_all_pipelines;
use order_service::services::{HttpProductCatalog, HttpUserDirectory};
use order_service::state::AppState;
use order_service::web::configure_app_routes;

fn init_tracing(json: bool) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE);

  if json {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;
  init_tracing(app_config.log_json);

  tracing::info!("Starting order service...");

  let db_pool = PgPoolOptions::new()
    .max_connections(app_config.database_max_connections)
    .connect(&app_config.database_url)
    .await
    .context("Failed to connect to the database")?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    sqlx::migrate!("./migrations")
      .run(&db_pool)
      .await
      .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied.");
  }

  let http_client = reqwest::Client::builder()
    .timeout(app_config.upstream_timeout)
    .build()
    .context("Failed to build HTTP client")?;

  let orka_instance = Arc::new(orka::Orka::<AppError>::new());

  let app_state = AppState {
    store: Arc::new(PgOrderStore::new(db_pool)),
    users: Arc::new(HttpUserDirectory::new(http_client.clone(), app_config.user_service_url.clone())),
    catalog: Arc::new(HttpProductCatalog::new(http_client, app_config.product_service_url.clone())),
    orka_instance: orka_instance.clone(),
  };

  register_all_pipelines(&orka_instance).context("Failed to register order pipelines")?;

  let server_address = app_config.server_address();
  tracing::info!(
    %server_address,
    user_service = %app_config.user_service_url,
    product_service = %app_config.product_service_url,
    "Binding HTTP server."
  );

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}
