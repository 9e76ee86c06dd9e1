// forkful_server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod contact_handlers;
pub mod order_handlers;
pub mod restaurant_handlers;
