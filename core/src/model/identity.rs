// forkful/src/model/identity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The identity-provider view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
  pub id: String,
  pub email: String,
  pub name: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Profile mirrored under `user:<id>` at sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id: String,
  pub email: String,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
  pub id: String,
  pub email: String,
  pub name: Option<String>,
}

impl From<&IdentityUser> for SessionUser {
  fn from(user: &IdentityUser) -> Self {
    Self {
      id: user.id.clone(),
      email: user.email.clone(),
      name: user.name.clone(),
    }
  }
}

/// An authenticated session. Passed explicitly to whatever needs authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub user: SessionUser,
  pub access_token: String,
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
  pub email: String,
  pub password: String,
  pub name: String,
}

/// Body of `POST /signin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
  pub email: String,
  pub password: String,
}
