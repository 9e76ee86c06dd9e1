// forkful_server/src/web/routes.rs

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, contact_handlers, order_handlers, restaurant_handlers};
use actix_web::{web, HttpResponse};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Mounts every route under `base_path` (already normalized, may be empty).
pub fn configure_app_routes(cfg: &mut web::ServiceConfig, base_path: &str) {
  cfg
    .app_data(
      web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid request body: {}", err)).into()),
    )
    .service(
      web::scope(base_path)
        .route("/health", web::get().to(health_check_handler))
        // Identity
        .route("/signup", web::post().to(auth_handlers::signup_handler))
        .route("/signin", web::post().to(auth_handlers::signin_handler))
        .route("/signout", web::post().to(auth_handlers::signout_handler))
        .route("/profile", web::get().to(auth_handlers::profile_handler))
        // Catalogue
        .route("/restaurants", web::get().to(restaurant_handlers::list_restaurants_handler))
        .route("/restaurants/{id}", web::get().to(restaurant_handlers::get_restaurant_handler))
        .route("/init-restaurants", web::post().to(restaurant_handlers::init_restaurants_handler))
        .route("/contact", web::post().to(contact_handlers::submit_contact_handler))
        // Orders
        .service(
          web::resource("/orders")
            .route(web::post().to(order_handlers::create_order_handler))
            .route(web::get().to(order_handlers::list_orders_handler)),
        ),
    );
}
