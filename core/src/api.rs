// forkful/src/api.rs

//! Seams between the storefront and the outside world.
//!
//! [`GatewayApi`] covers the gateway routes; [`AuthApi`] covers the identity
//! provider's session calls. [`crate::http::HttpGateway`] implements both over
//! HTTP, tests swap in in-memory doubles.

use crate::error::ClientResult;
use crate::model::{
  ContactRequest, IdentityUser, NewOrder, Order, Restaurant, Session, SignInRequest, SignUpRequest, UserProfile,
};
use async_trait::async_trait;

#[async_trait]
pub trait GatewayApi: Send + Sync {
  async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>>;

  async fn get_restaurant(&self, restaurant_id: &str) -> ClientResult<Restaurant>;

  /// Seeds the fixed restaurant set. Safe to repeat.
  async fn init_restaurants(&self) -> ClientResult<String>;

  async fn submit_contact(&self, request: &ContactRequest) -> ClientResult<String>;

  async fn create_order(&self, access_token: &str, order: &NewOrder) -> ClientResult<Order>;

  async fn list_orders(&self, access_token: &str) -> ClientResult<Vec<Order>>;

  async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<IdentityUser>;

  /// `Ok(None)` when the token is valid but no profile was mirrored.
  async fn get_profile(&self, access_token: &str) -> ClientResult<Option<UserProfile>>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
  async fn sign_in(&self, request: &SignInRequest) -> ClientResult<Session>;

  async fn sign_out(&self, access_token: &str) -> ClientResult<()>;
}
