// forkful_server/src/web/handlers/contact_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use forkful::model::{ContactMessage, ContactRequest};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::keys::contact_key;
use crate::store::put_json;
use crate::web::extract::PublicAccess;

#[instrument(name = "handler::submit_contact", skip_all)]
pub async fn submit_contact_handler(
  app_state: web::Data<AppState>,
  _public: PublicAccess,
  req_payload: web::Json<ContactRequest>,
) -> Result<HttpResponse, AppError> {
  let key = contact_key(app_state.clock.next_millis());
  let message = ContactMessage::received(req_payload.into_inner(), Utc::now());
  put_json(app_state.store.as_ref(), &key, &message)
    .await
    .map_err(|e| AppError::internal("Failed to send message", e))?;
  info!(%key, "Contact message stored.");
  Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Message sent successfully" })))
}
