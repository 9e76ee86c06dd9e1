// forkful_server/src/store/postgres.rs

use super::{KvStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, instrument};

/// `kv_store(key TEXT PRIMARY KEY, value JSONB)` in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
    let pool = PgPoolOptions::new().max_connections(10).connect(database_url).await?;
    info!("Successfully connected to the database.");
    let store = Self { pool };
    store.ensure_table().await?;
    Ok(store)
  }

  pub fn from_pool(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn ensure_table(&self) -> Result<(), StoreError> {
    sqlx::query("CREATE TABLE IF NOT EXISTS kv_store (key TEXT NOT NULL PRIMARY KEY, value JSONB NOT NULL)")
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

/// Escapes `LIKE` wildcards so the prefix matches literally.
fn like_prefix_pattern(prefix: &str) -> String {
  let mut pattern = String::with_capacity(prefix.len() + 1);
  for c in prefix.chars() {
    if matches!(c, '\\' | '%' | '_') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

#[async_trait]
impl KvStore for PgStore {
  #[instrument(name = "pg_store::set", skip(self, value))]
  async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO kv_store (key, value) VALUES ($1, $2) ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value")
      .bind(key)
      .bind(Json(value))
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  #[instrument(name = "pg_store::set_if_absent", skip(self, value))]
  async fn set_if_absent(&self, key: &str, value: Value) -> Result<bool, StoreError> {
    let result = sqlx::query("INSERT INTO kv_store (key, value) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING")
      .bind(key)
      .bind(Json(value))
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() == 1)
  }

  #[instrument(name = "pg_store::get", skip(self))]
  async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
    let row: Option<Json<Value>> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = $1")
      .bind(key)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(|Json(value)| value))
  }

  #[instrument(name = "pg_store::get_by_prefix", skip(self))]
  async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
    let rows: Vec<Json<Value>> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key LIKE $1 ESCAPE '\\' ORDER BY key")
      .bind(like_prefix_pattern(prefix))
      .fetch_all(&self.pool)
      .await?;
    Ok(rows.into_iter().map(|Json(value)| value).collect())
  }

  #[instrument(name = "pg_store::delete", skip(self))]
  async fn delete(&self, key: &str) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM kv_store WHERE key = $1")
      .bind(key)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::like_prefix_pattern;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_prefix_pattern("order:u1:"), "order:u1:%");
    assert_eq!(like_prefix_pattern("a_b%c\\"), "a\\_b\\%c\\\\%");
  }
}
