// forkful_server/src/state.rs

use crate::config::AppConfig;
use crate::flows::Flows;
use crate::identity::{IdentityProvider, LocalIdentityProvider};
use crate::store::{KeyClock, KvStore};
use forkful::FlowError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn KvStore>,
  pub identity: Arc<dyn IdentityProvider>,
  pub config: Arc<AppConfig>,
  pub clock: Arc<KeyClock>,
  pub flows: Arc<Flows>,
}

impl AppState {
  /// State with the local identity provider over `store`.
  pub fn new(store: Arc<dyn KvStore>, config: AppConfig) -> Result<Self, FlowError> {
    let identity: Arc<dyn IdentityProvider> = Arc::new(LocalIdentityProvider::new(store.clone()));
    Self::with_identity(store, identity, config)
  }

  pub fn with_identity(
    store: Arc<dyn KvStore>,
    identity: Arc<dyn IdentityProvider>,
    config: AppConfig,
  ) -> Result<Self, FlowError> {
    Ok(Self {
      store,
      identity,
      config: Arc::new(config),
      clock: Arc::new(KeyClock::new()),
      flows: Arc::new(Flows::build()?),
    })
  }
}
