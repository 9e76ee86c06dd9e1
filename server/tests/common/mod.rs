// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use forkful_server::store::MemoryStore;
use forkful_server::{AppConfig, AppState};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;
use tracing::Level;

pub const PUBLIC_KEY: &str = "public-anon-key";

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

pub fn memory_state(config: AppConfig) -> (AppState, Arc<MemoryStore>) {
  let store = Arc::new(MemoryStore::new());
  let state = AppState::new(store.clone(), config).expect("flows build");
  (state, store)
}

/// Builds the full app around `$state` and returns the initialized test service.
#[macro_export]
macro_rules! test_app {
  ($state:expr) => {{
    let state: forkful_server::AppState = $state;
    let base_path = state.config.api_base_path.clone();
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new(state))
        .configure(|cfg| forkful_server::web::configure_app_routes(cfg, &base_path)),
    )
    .await
  }};
}

/// Sends `req` and returns the status with the JSON body.
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
  S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
  B: MessageBody,
{
  let res = test::call_service(app, req).await;
  let status = res.status();
  let body = test::read_body(res).await;
  let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
  (status, json)
}

pub fn bearer(token: &str) -> (&'static str, String) {
  ("Authorization", format!("Bearer {}", token))
}
