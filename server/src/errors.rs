// forkful_server/src/errors.rs

use crate::identity::IdentityError;
use crate::store::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use forkful::FlowError;
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Unauthorized(String),

  #[error("{0}")]
  NotFound(String),

  /// Unexpected failure. The message is what the caller sees; details are logged where it is built.
  #[error("{0}")]
  Internal(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },
}

impl AppError {
  pub fn unauthorized() -> Self {
    AppError::Unauthorized("Unauthorized".to_string())
  }

  /// Logs `detail` and hides it behind `message` for the caller.
  pub fn internal(message: &str, detail: impl Display) -> Self {
    tracing::error!(error = %detail, "{}", message);
    AppError::Internal(message.to_string())
  }

  /// Keeps caller-facing errors; anything else becomes a 500 carrying `message`.
  pub fn or_internal(self, message: &str) -> Self {
    match self {
      AppError::BadRequest(_) | AppError::Unauthorized(_) | AppError::NotFound(_) => self,
      other => AppError::internal(message, other),
    }
  }
}

impl From<IdentityError> for AppError {
  fn from(err: IdentityError) -> Self {
    match err {
      IdentityError::Rejected(m) => AppError::BadRequest(m),
      IdentityError::InvalidCredentials => AppError::Unauthorized("Invalid login credentials".to_string()),
      IdentityError::InvalidToken => AppError::unauthorized(),
      IdentityError::Store(e) => AppError::Store(e),
      IdentityError::Hashing(m) => AppError::internal("Password processing failed", m),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Internal(_) | AppError::Config(_) | AppError::Store(_) | AppError::Workflow { .. } => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, "Responding with error");
    }
    let message = match self {
      AppError::Store(_) => "Store operation failed".to_string(),
      AppError::Config(_) => "Configuration issue".to_string(),
      AppError::Workflow { source } => {
        tracing::error!(flow_error_source = ?source, "Workflow error details");
        "Internal server error".to_string()
      }
      other => other.to_string(),
    };
    HttpResponse::build(status).json(json!({ "error": message }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
