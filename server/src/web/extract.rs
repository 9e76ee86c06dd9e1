// forkful_server/src/web/extract.rs

//! Request extractors for the two kinds of bearer credential.

use crate::errors::AppError;
use crate::state::AppState;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use forkful::model::IdentityUser;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

/// The token of an `Authorization: Bearer <token>` header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
  let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = header.trim().split_once(' ')?;
  if !scheme.eq_ignore_ascii_case("bearer") {
    return None;
  }
  let token = token.trim();
  (!token.is_empty()).then(|| token.to_string())
}

fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
  req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Config("Application state is not registered".to_string()))
}

/// Gate for public routes: passes unless a public key is configured and the
/// request does not carry it.
#[derive(Debug)]
pub struct PublicAccess;

impl FromRequest for PublicAccess {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let result = app_state(req).and_then(|state| match &state.config.public_api_key {
      None => Ok(PublicAccess),
      Some(expected) if bearer_token(req).as_deref() == Some(expected.as_str()) => Ok(PublicAccess),
      Some(_) => {
        warn!(path = %req.path(), "Public route called without the public key.");
        Err(AppError::unauthorized())
      }
    });
    ready(result)
  }
}

/// The caller resolved from a user access token.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user: IdentityUser,
  pub access_token: String,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let identity = app_state(req).map(|state| state.identity.clone());
    let token = bearer_token(req);
    Box::pin(async move {
      let identity = identity?;
      let Some(access_token) = token else {
        warn!("AuthenticatedUser extractor: missing bearer token.");
        return Err(AppError::unauthorized());
      };
      let user = identity.resolve_token(&access_token).await?;
      Ok(AuthenticatedUser { user, access_token })
    })
  }
}
