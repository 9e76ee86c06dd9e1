// forkful/src/error.rs
use crate::navigation::InvalidTransition;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Structural failures raised by the flow runner itself.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step '{step_name}' not found in flow '{flow}'")]
  StepNotFound { flow: String, step_name: String },

  #[error("Step '{step_name}' already exists in flow '{flow}'")]
  DuplicateStep { flow: String, step_name: String },

  #[error("Required step '{step_name}' of flow '{flow}' has no handlers")]
  HandlerMissing { flow: String, step_name: String },

  #[error("Flow '{flow}' completed without producing {missing}")]
  Incomplete { flow: String, missing: &'static str },

  #[error("Step handler failed. Source: {source}")]
  Handler {
    #[from]
    source: AnyhowError,
  },
}

/// Everything that can go wrong on the storefront side.
#[derive(Debug, Error)]
pub enum ClientError {
  #[error("Please sign in to continue")]
  Unauthenticated,

  #[error("Your cart is empty")]
  EmptyCart,

  #[error("Quantity must be at least 1 (got {0})")]
  InvalidQuantity(i64),

  #[error("No restaurant is open")]
  NoRestaurantSelected,

  #[error("Menu item '{menu_item_id}' not found at restaurant '{restaurant_id}'")]
  UnknownMenuItem { restaurant_id: String, menu_item_id: String },

  #[error(transparent)]
  Navigation(#[from] InvalidTransition),

  /// The gateway answered with a non-success status and an `{error}` body.
  #[error("{message}")]
  Api { status: u16, message: String },

  #[error("Request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Invalid gateway URL: {0}")]
  InvalidUrl(String),

  #[error("Unexpected response: {0}")]
  Decode(String),

  #[error(transparent)]
  Flow(#[from] FlowError),
}

impl ClientError {
  /// True when the failure means the caller's credentials were missing or rejected.
  pub fn is_unauthorized(&self) -> bool {
    matches!(self, ClientError::Unauthenticated | ClientError::Api { status: 401, .. })
  }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
