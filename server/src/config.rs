// forkful_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// PostgreSQL URL for the key-value table. Unset means an in-memory store.
  pub database_url: Option<String>,

  /// Prefix every route is mounted under, e.g. `/make-server`. Empty for the root.
  pub api_base_path: String,

  /// When set, public routes require `Authorization: Bearer <key>`.
  pub public_api_key: Option<String>,

  /// Upsert the seed restaurants at startup.
  pub seed_on_start: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      api_base_path: String::new(),
      public_api_key: None,
      seed_on_start: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL");
    let api_base_path = normalize_base_path(&get_env("API_BASE_PATH").unwrap_or_default());
    let public_api_key = get_env("PUBLIC_API_KEY");
    let seed_on_start = get_env("SEED_ON_START")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_ON_START value: {}", e)))?;

    tracing::info!(
      server_host = %server_host,
      server_port,
      durable_store = database_url.is_some(),
      api_base_path = %api_base_path,
      public_key_required = public_api_key.is_some(),
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      api_base_path,
      public_api_key,
      seed_on_start,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

/// `"api/"` → `"/api"`, `"/"` → `""`.
pub fn normalize_base_path(raw: &str) -> String {
  let trimmed = raw.trim().trim_matches('/');
  if trimmed.is_empty() {
    String::new()
  } else {
    format!("/{}", trimmed)
  }
}
