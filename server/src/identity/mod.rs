// forkful_server/src/identity/mod.rs

//! Identity provider seam: account creation, sessions and token resolution.

pub mod local;
pub mod password;

use crate::store::StoreError;
use async_trait::async_trait;
use forkful::model::{IdentityUser, Session};
use thiserror::Error;

pub use local::LocalIdentityProvider;

#[derive(Debug, Error)]
pub enum IdentityError {
  /// The provider refused the request (duplicate email, weak password, ...).
  #[error("{0}")]
  Rejected(String),

  #[error("Invalid login credentials")]
  InvalidCredentials,

  #[error("Invalid or expired access token")]
  InvalidToken,

  #[error("Password hashing failed: {0}")]
  Hashing(String),

  #[error(transparent)]
  Store(#[from] StoreError),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
  /// Creates an already-confirmed account.
  async fn create_user(&self, email: &str, password: &str, name: &str) -> Result<IdentityUser, IdentityError>;

  async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

  /// Revokes `access_token`. Unknown tokens are ignored.
  async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

  async fn resolve_token(&self, access_token: &str) -> Result<IdentityUser, IdentityError>;
}
