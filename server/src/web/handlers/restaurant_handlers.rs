// forkful_server/src/web/handlers/restaurant_handlers.rs

use actix_web::{web, HttpResponse};
use forkful::model::Restaurant;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::seed;
use crate::state::AppState;
use crate::store::keys::{restaurant_key, RESTAURANT_PREFIX};
use crate::store::{get_json, scan_json};
use crate::web::extract::PublicAccess;

#[instrument(name = "handler::list_restaurants", skip_all)]
pub async fn list_restaurants_handler(
  app_state: web::Data<AppState>,
  _public: PublicAccess,
) -> Result<HttpResponse, AppError> {
  let restaurants: Vec<Restaurant> = scan_json(app_state.store.as_ref(), RESTAURANT_PREFIX)
    .await
    .map_err(|e| AppError::internal("Failed to fetch restaurants", e))?;
  info!(count = restaurants.len(), "Restaurants fetched.");
  Ok(HttpResponse::Ok().json(json!({ "success": true, "restaurants": restaurants })))
}

#[instrument(name = "handler::get_restaurant", skip(app_state, _public, path), fields(restaurant_id = %path))]
pub async fn get_restaurant_handler(
  app_state: web::Data<AppState>,
  _public: PublicAccess,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let restaurant_id = path.into_inner();
  let restaurant: Restaurant = get_json(app_state.store.as_ref(), &restaurant_key(&restaurant_id))
    .await
    .map_err(|e| AppError::internal("Failed to fetch restaurant", e))?
    .ok_or_else(|| AppError::NotFound("Restaurant not found".to_string()))?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "restaurant": restaurant })))
}

#[instrument(name = "handler::init_restaurants", skip_all)]
pub async fn init_restaurants_handler(
  app_state: web::Data<AppState>,
  _public: PublicAccess,
) -> Result<HttpResponse, AppError> {
  seed::init_restaurants(app_state.store.as_ref())
    .await
    .map_err(|e| AppError::internal("Failed to initialize restaurants", e))?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Restaurants initialized" })))
}
