// forkful_server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use forkful::model::{SignInRequest, SignUpRequest, UserProfile};
use forkful::{FlowError, FlowOutcome, SharedContext};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::flows::{SigninCtx, SignupCtx};
use crate::state::AppState;
use crate::store::get_json;
use crate::store::keys::user_key;
use crate::web::extract::{AuthenticatedUser, PublicAccess};

#[instrument(name = "handler::signup", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  _public: PublicAccess,
  req_payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx = SharedContext::new(SignupCtx::new(app_state.get_ref().clone(), req_payload.into_inner()));

  let outcome = app_state
    .flows
    .signup
    .run(ctx.clone())
    .await
    .map_err(|e| e.or_internal("Failed to create user"))?;
  if outcome == FlowOutcome::Halted {
    warn!("Signup flow was halted by a step.");
    return Err(AppError::internal("Failed to create user", "signup flow halted"));
  }

  let user = ctx.write().created_user.take().ok_or_else(|| {
    AppError::internal(
      "Failed to create user",
      FlowError::Incomplete {
        flow: "signup".to_string(),
        missing: "a user",
      },
    )
  })?;
  info!(user_id = %user.id, "Signup successful.");
  Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}

#[instrument(name = "handler::signin", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  _public: PublicAccess,
  req_payload: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx = SharedContext::new(SigninCtx::new(app_state.get_ref().clone(), req_payload.into_inner()));

  app_state
    .flows
    .signin
    .run(ctx.clone())
    .await
    .map_err(|e| e.or_internal("Failed to sign in"))?;

  let session = ctx.write().session.take().ok_or_else(|| {
    AppError::internal(
      "Failed to sign in",
      FlowError::Incomplete {
        flow: "signin".to_string(),
        missing: "a session",
      },
    )
  })?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "session": session })))
}

#[instrument(name = "handler::signout", skip(app_state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn signout_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  app_state
    .identity
    .sign_out(&auth_user.access_token)
    .await
    .map_err(|e| AppError::from(e).or_internal("Failed to sign out"))?;
  info!("Session revoked.");
  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[instrument(name = "handler::profile", skip(app_state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn profile_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let profile: Option<UserProfile> = get_json(app_state.store.as_ref(), &user_key(&auth_user.user.id))
    .await
    .map_err(|e| AppError::internal("Failed to fetch profile", e))?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "profile": profile })))
}
