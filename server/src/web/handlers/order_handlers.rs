// forkful_server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use forkful::model::{NewOrder, Order};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::keys::{order_key, order_prefix};
use crate::store::{put_json, scan_json};
use crate::web::extract::AuthenticatedUser;

#[instrument(
  name = "handler::create_order",
  skip(app_state, auth_user, req_payload),
  fields(user_id = %auth_user.user.id, items = req_payload.items.len())
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<NewOrder>,
) -> Result<HttpResponse, AppError> {
  let user_id = auth_user.user.id;
  let order_id = order_key(&user_id, app_state.clock.next_millis());
  let order = Order::pending(order_id, user_id, req_payload.into_inner(), Utc::now());

  put_json(app_state.store.as_ref(), &order.id, &order)
    .await
    .map_err(|e| AppError::internal("Failed to create order", e))?;
  info!(order_id = %order.id, total = order.total_amount, "Order created.");
  Ok(HttpResponse::Ok().json(json!({ "success": true, "order": order })))
}

#[instrument(name = "handler::list_orders", skip(app_state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let orders: Vec<Order> = scan_json(app_state.store.as_ref(), &order_prefix(&auth_user.user.id))
    .await
    .map_err(|e| AppError::internal("Failed to fetch orders", e))?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "orders": orders })))
}
