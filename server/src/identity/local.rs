// forkful_server/src/identity/local.rs

use super::password::{hash_password, verify_password};
use super::{IdentityError, IdentityProvider};
use crate::store::keys::{identity_key, session_key};
use crate::store::{get_json, put_json, put_json_if_absent, KvStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use forkful::model::{IdentityUser, Session, SessionUser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredIdentity {
  id: String,
  email: String,
  name: Option<String>,
  password_hash: String,
  created_at: DateTime<Utc>,
}

impl StoredIdentity {
  fn to_user(&self) -> IdentityUser {
    IdentityUser {
      id: self.id.clone(),
      email: self.email.clone(),
      name: self.name.clone(),
      created_at: self.created_at,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
  user_id: String,
  email: String,
  created_at: DateTime<Utc>,
}

/// Identity provider kept in the gateway's own key-value store.
///
/// Accounts live at `identity:<email>` with an argon2 hash; sessions are
/// opaque v4 tokens at `session:<token>`.
pub struct LocalIdentityProvider {
  store: Arc<dyn KvStore>,
}

impl LocalIdentityProvider {
  pub fn new(store: Arc<dyn KvStore>) -> Self {
    Self { store }
  }

  async fn load(&self, email: &str) -> Result<Option<StoredIdentity>, IdentityError> {
    Ok(get_json(self.store.as_ref(), &identity_key(email)).await?)
  }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
  #[instrument(name = "identity::create_user", skip(self, password, name))]
  async fn create_user(&self, email: &str, password: &str, name: &str) -> Result<IdentityUser, IdentityError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
      return Err(IdentityError::Rejected("Unable to validate email address: invalid format".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
      return Err(IdentityError::Rejected(format!(
        "Password should be at least {} characters",
        MIN_PASSWORD_LEN
      )));
    }

    let stored = StoredIdentity {
      id: Uuid::new_v4().to_string(),
      email: email.clone(),
      name: Some(name.to_string()).filter(|n| !n.trim().is_empty()),
      password_hash: hash_password(password)?,
      created_at: Utc::now(),
    };
    // Only one of two racing sign-ups for an email can claim the key.
    if !put_json_if_absent(self.store.as_ref(), &identity_key(&email), &stored).await? {
      warn!("Attempt to sign up with an existing email.");
      return Err(IdentityError::Rejected("User already registered".to_string()));
    }
    info!(user_id = %stored.id, "Identity created.");
    Ok(stored.to_user())
  }

  #[instrument(name = "identity::sign_in", skip(self, password))]
  async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
    let stored = self.load(email).await?.ok_or(IdentityError::InvalidCredentials)?;
    if !verify_password(&stored.password_hash, password)? {
      return Err(IdentityError::InvalidCredentials);
    }

    let access_token = Uuid::new_v4().simple().to_string();
    let session = StoredSession {
      user_id: stored.id.clone(),
      email: stored.email.clone(),
      created_at: Utc::now(),
    };
    put_json(self.store.as_ref(), &session_key(&access_token), &session).await?;
    info!(user_id = %stored.id, "Session issued.");

    Ok(Session {
      user: SessionUser::from(&stored.to_user()),
      access_token,
    })
  }

  #[instrument(name = "identity::sign_out", skip_all)]
  async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
    self.store.delete(&session_key(access_token)).await?;
    Ok(())
  }

  #[instrument(name = "identity::resolve_token", skip_all)]
  async fn resolve_token(&self, access_token: &str) -> Result<IdentityUser, IdentityError> {
    if access_token.is_empty() {
      return Err(IdentityError::InvalidToken);
    }
    let session: StoredSession = get_json(self.store.as_ref(), &session_key(access_token))
      .await?
      .ok_or(IdentityError::InvalidToken)?;
    let stored = self.load(&session.email).await?.ok_or(IdentityError::InvalidToken)?;
    if stored.id != session.user_id {
      // Session belongs to a different account.
      return Err(IdentityError::InvalidToken);
    }
    Ok(stored.to_user())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;

  fn provider() -> LocalIdentityProvider {
    LocalIdentityProvider::new(Arc::new(MemoryStore::new()))
  }

  #[tokio::test]
  async fn sign_in_issues_resolvable_token_until_sign_out() {
    let provider = provider();
    let user = provider.create_user("Ada@Example.com", "analytical", "Ada").await.unwrap();
    assert_eq!(user.email, "ada@example.com");

    let session = provider.sign_in("ada@example.com", "analytical").await.unwrap();
    assert_eq!(session.user.id, user.id);
    assert_eq!(provider.resolve_token(&session.access_token).await.unwrap().id, user.id);

    provider.sign_out(&session.access_token).await.unwrap();
    assert!(matches!(
      provider.resolve_token(&session.access_token).await,
      Err(IdentityError::InvalidToken)
    ));
  }

  #[tokio::test]
  async fn duplicate_email_and_bad_password_are_rejected() {
    let provider = provider();
    provider.create_user("ada@example.com", "analytical", "Ada").await.unwrap();
    assert!(matches!(
      provider.create_user("ADA@example.com", "other-pass", "Ada").await,
      Err(IdentityError::Rejected(_))
    ));
    assert!(matches!(
      provider.create_user("bob@example.com", "short", "Bob").await,
      Err(IdentityError::Rejected(_))
    ));
    assert!(matches!(
      provider.sign_in("ada@example.com", "wrong-pass").await,
      Err(IdentityError::InvalidCredentials)
    ));
    assert!(matches!(
      provider.sign_in("nobody@example.com", "analytical").await,
      Err(IdentityError::InvalidCredentials)
    ));
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn racing_sign_ups_for_one_email_create_one_account() {
    for _ in 0..5 {
      let provider = Arc::new(provider());
      let attempts: Vec<_> = ["first-pass", "second-pass"]
        .into_iter()
        .map(|password| {
          let provider = provider.clone();
          tokio::spawn(async move { provider.create_user("ada@example.com", password, "Ada").await })
        })
        .collect();

      let mut created = Vec::new();
      for attempt in attempts {
        match attempt.await.unwrap() {
          Ok(user) => created.push(user),
          Err(IdentityError::Rejected(message)) => assert_eq!(message, "User already registered"),
          Err(other) => panic!("unexpected error: {other}"),
        }
      }
      assert_eq!(created.len(), 1);

      let sessions: Vec<Session> = [
        provider.sign_in("ada@example.com", "first-pass").await,
        provider.sign_in("ada@example.com", "second-pass").await,
      ]
      .into_iter()
      .filter_map(Result::ok)
      .collect();
      assert_eq!(sessions.len(), 1);
      assert_eq!(sessions[0].user.id, created[0].id);
    }
  }
}
