// forkful/src/identity.rs

//! Client-side identity: sign-up, sign-in, sign-out, session and profile.
//!
//! The session is an explicit value held here, never ambient state. Anything
//! that needs authorization receives it from [`IdentityAdapter::get_session`].

use crate::api::{AuthApi, GatewayApi};
use crate::error::{ClientError, ClientResult};
use crate::model::{IdentityUser, Session, SignInRequest, SignUpRequest, UserProfile};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct IdentityAdapter {
  gateway: Arc<dyn GatewayApi>,
  auth: Arc<dyn AuthApi>,
  session: Option<Session>,
}

impl IdentityAdapter {
  pub fn new(gateway: Arc<dyn GatewayApi>, auth: Arc<dyn AuthApi>) -> Self {
    Self {
      gateway,
      auth,
      session: None,
    }
  }

  /// Starts from a session restored by the caller (e.g. from the provider's storage).
  pub fn with_session(mut self, session: Session) -> Self {
    self.session = Some(session);
    self
  }

  /// Creates an account through the gateway. Does not sign in.
  #[instrument(name = "identity::sign_up", skip(self, password, name))]
  pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> ClientResult<IdentityUser> {
    let request = SignUpRequest {
      email: email.to_string(),
      password: password.to_string(),
      name: name.to_string(),
    };
    let user = self.gateway.sign_up(&request).await?;
    info!(user_id = %user.id, "Account created.");
    Ok(user)
  }

  #[instrument(name = "identity::sign_in", skip(self, password))]
  pub async fn sign_in(&mut self, email: &str, password: &str) -> ClientResult<&Session> {
    let request = SignInRequest {
      email: email.to_string(),
      password: password.to_string(),
    };
    let session = self.auth.sign_in(&request).await?;
    info!(user_id = %session.user.id, "Signed in.");
    Ok(self.session.insert(session))
  }

  /// Ends the current session. Without a session this is a no-op. A token the
  /// provider no longer accepts still ends the local session.
  #[instrument(name = "identity::sign_out", skip(self))]
  pub async fn sign_out(&mut self) -> ClientResult<()> {
    let Some(session) = &self.session else {
      return Ok(());
    };
    match self.auth.sign_out(&session.access_token).await {
      Ok(()) => info!(user_id = %session.user.id, "Signed out."),
      Err(e) if e.is_unauthorized() => {
        warn!(user_id = %session.user.id, "Token already rejected, dropping the local session.");
      }
      Err(e) => return Err(e),
    }
    self.session = None;
    Ok(())
  }

  pub fn get_session(&self) -> Option<&Session> {
    self.session.as_ref()
  }

  #[instrument(name = "identity::get_profile", skip(self))]
  pub async fn get_profile(&self) -> ClientResult<Option<UserProfile>> {
    let session = self.session.as_ref().ok_or(ClientError::Unauthenticated)?;
    self.gateway.get_profile(&session.access_token).await
  }

  /// Checks the held session against the gateway and drops it if its token was rejected.
  #[instrument(name = "identity::revalidate", skip(self))]
  pub async fn revalidate(&mut self) -> ClientResult<Option<&Session>> {
    let Some(session) = &self.session else {
      return Ok(None);
    };
    match self.gateway.get_profile(&session.access_token).await {
      Ok(_) => Ok(self.session.as_ref()),
      Err(e) if e.is_unauthorized() => {
        warn!(user_id = %session.user.id, "Stored session was rejected, discarding it.");
        self.session = None;
        Ok(None)
      }
      Err(e) => Err(e),
    }
  }
}
