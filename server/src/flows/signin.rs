// forkful_server/src/flows/signin.rs

use crate::errors::AppError;
use crate::state::AppState;
use forkful::model::{Session, SignInRequest};
use forkful::{Flow, FlowError, SharedContext, StepControl};
use tracing::info;

pub struct SigninCtx {
  pub app_state: AppState,
  pub request: SignInRequest,
  pub session: Option<Session>,
}

impl SigninCtx {
  pub fn new(app_state: AppState, request: SignInRequest) -> Self {
    Self {
      app_state,
      request,
      session: None,
    }
  }
}

/// `validate_input` → `authenticate`.
pub fn build_signin_flow() -> Result<Flow<SigninCtx, AppError>, FlowError> {
  let mut flow = Flow::<SigninCtx, AppError>::new(
    "signin",
    &[("validate_input", false, None), ("authenticate", false, None)],
  );

  flow.on("validate_input", |ctx: SharedContext<SigninCtx>| async move {
    let missing = {
      let guard = ctx.read();
      guard.request.email.trim().is_empty() || guard.request.password.is_empty()
    };
    if missing {
      return Err(AppError::BadRequest("Email and password are required".to_string()));
    }
    Ok(StepControl::Continue)
  })?;

  flow.on("authenticate", |ctx: SharedContext<SigninCtx>| async move {
    let (identity, request) = {
      let guard = ctx.read();
      (guard.app_state.identity.clone(), guard.request.clone())
    };
    let session = identity.sign_in(&request.email, &request.password).await?;
    info!(user_id = %session.user.id, "Signin successful.");
    ctx.write().session = Some(session);
    Ok::<_, AppError>(StepControl::Continue)
  })?;

  Ok(flow)
}
