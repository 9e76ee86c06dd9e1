// forkful_server/src/flows/mod.rs

//! Multi-step request handling expressed as [`forkful::Flow`]s.

pub mod signin;
pub mod signup;

use crate::errors::AppError;
use forkful::{Flow, FlowError};

pub use signin::SigninCtx;
pub use signup::SignupCtx;

/// Every flow the handlers run, built once at startup.
pub struct Flows {
  pub signup: Flow<SignupCtx, AppError>,
  pub signin: Flow<SigninCtx, AppError>,
}

impl Flows {
  pub fn build() -> Result<Self, FlowError> {
    let flows = Self {
      signup: signup::build_signup_flow()?,
      signin: signin::build_signin_flow()?,
    };
    tracing::info!(
      signup_steps = ?flows.signup.step_names(),
      signin_steps = ?flows.signin.step_names(),
      "Flows registered."
    );
    Ok(flows)
  }
}
