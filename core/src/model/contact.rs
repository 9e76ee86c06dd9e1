// forkful/src/model/contact.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
  pub name: String,
  pub email: String,
  pub message: String,
}

/// Stored form of a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
  pub name: String,
  pub email: String,
  pub message: String,
  pub created_at: DateTime<Utc>,
}

impl ContactMessage {
  pub fn received(request: ContactRequest, created_at: DateTime<Utc>) -> Self {
    Self {
      name: request.name,
      email: request.email,
      message: request.message,
      created_at,
    }
  }
}
