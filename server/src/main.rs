// forkful_server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use forkful_server::store::{KvStore, MemoryStore, PgStore};
use forkful_server::{seed, web, AppConfig, AppState};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting Forkful gateway...");

  let app_config = AppConfig::from_env().map_err(|e| {
    tracing::error!(error = %e, "Failed to load application configuration.");
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;

  let store: Arc<dyn KvStore> = match &app_config.database_url {
    Some(database_url) => {
      let pg_store = PgStore::connect(database_url).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to the database.");
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
      })?;
      Arc::new(pg_store)
    }
    None => {
      tracing::warn!("DATABASE_URL not set, using the in-memory store. Data is lost on exit.");
      Arc::new(MemoryStore::new())
    }
  };

  if app_config.seed_on_start {
    if let Err(e) = seed::init_restaurants(store.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed restaurants.");
    }
  }

  let bind_address = app_config.bind_address();
  let app_state = AppState::new(store, app_config).map_err(|e| {
    tracing::error!(error = %e, "Failed to build request flows.");
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
  })?;

  tracing::info!("Attempting to bind server to {}...", bind_address);

  HttpServer::new(move || {
    let base_path = app_state.config.api_base_path.clone();
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(|cfg| web::configure_app_routes(cfg, &base_path))
  })
  .bind(&bind_address)?
  .run()
  .await
}
