// forkful_server/src/lib.rs

//! HTTP gateway for the Forkful storefront: catalogue, orders, contact form and
//! identity, all over a key-value store.

pub mod config;
pub mod errors;
pub mod flows;
pub mod identity;
pub mod seed;
pub mod state;
pub mod store;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
