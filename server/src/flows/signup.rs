// forkful_server/src/flows/signup.rs

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::keys::user_key;
use crate::store::put_json;
use chrono::Utc;
use forkful::model::{IdentityUser, SignUpRequest, UserProfile};
use forkful::{Flow, FlowError, SharedContext, StepControl};
use tracing::{event, info, warn, Level};

pub struct SignupCtx {
  pub app_state: AppState,
  pub request: SignUpRequest,
  pub created_user: Option<IdentityUser>,
}

impl SignupCtx {
  pub fn new(app_state: AppState, request: SignUpRequest) -> Self {
    Self {
      app_state,
      request,
      created_user: None,
    }
  }
}

/// `validate_input` → `create_identity` → `store_profile`.
pub fn build_signup_flow() -> Result<Flow<SignupCtx, AppError>, FlowError> {
  let mut flow = Flow::<SignupCtx, AppError>::new(
    "signup",
    &[
      ("validate_input", false, None),
      ("create_identity", false, None),
      ("store_profile", false, None),
    ],
  );

  flow.on("validate_input", |ctx: SharedContext<SignupCtx>| async move {
    let (email, password_empty) = {
      let guard = ctx.read();
      (guard.request.email.trim().to_string(), guard.request.password.is_empty())
    };
    event!(Level::DEBUG, email = %email, "Validating signup input.");
    if email.is_empty() || password_empty {
      warn!("Signup without email or password.");
      return Err(AppError::BadRequest("Email and password are required".to_string()));
    }
    Ok(StepControl::Continue)
  })?;

  flow.on("create_identity", |ctx: SharedContext<SignupCtx>| async move {
    let (identity, request) = {
      let guard = ctx.read();
      (guard.app_state.identity.clone(), guard.request.clone())
    };
    let user = identity
      .create_user(&request.email, &request.password, &request.name)
      .await?;
    ctx.write().created_user = Some(user);
    Ok::<_, AppError>(StepControl::Continue)
  })?;

  flow.on("store_profile", |ctx: SharedContext<SignupCtx>| async move {
    let (store, profile) = {
      let guard = ctx.read();
      let user = guard.created_user.as_ref().ok_or_else(|| FlowError::Incomplete {
        flow: "signup".to_string(),
        missing: "an identity",
      })?;
      let profile = UserProfile {
        id: user.id.clone(),
        email: user.email.clone(),
        name: guard.request.name.clone(),
        created_at: Utc::now(),
      };
      (guard.app_state.store.clone(), profile)
    };
    put_json(store.as_ref(), &user_key(&profile.id), &profile).await?;
    info!(user_id = %profile.id, "Profile stored.");
    Ok::<_, AppError>(StepControl::Continue)
  })?;

  Ok(flow)
}
