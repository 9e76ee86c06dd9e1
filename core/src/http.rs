// forkful/src/http.rs

//! `reqwest` implementation of [`GatewayApi`] and [`AuthApi`].

use crate::api::{AuthApi, GatewayApi};
use crate::error::{ClientError, ClientResult};
use crate::model::envelope::{
  ErrorBody, MessageBody, OrderBody, OrdersBody, ProfileBody, RestaurantBody, RestaurantsBody, SessionBody,
  SignUpBody, SuccessBody,
};
use crate::model::{
  ContactRequest, IdentityUser, NewOrder, Order, Restaurant, Session, SignInRequest, SignUpRequest, UserProfile,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// `base_url` with `segments` appended, each percent-encoded as a single path segment.
fn segment_url(base_url: &str, segments: &[&str]) -> ClientResult<Url> {
  let mut url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
  url
    .path_segments_mut()
    .map_err(|_| ClientError::InvalidUrl(format!("{} cannot carry a path", base_url)))?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}

/// Where the gateway lives and how to reach it.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  /// Deployment base, e.g. `https://api.example.com/forkful`.
  pub base_url: String,

  /// Shared public key sent as the bearer token on public routes.
  pub public_key: Option<String>,

  pub timeout: Duration,
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      base_url: "http://127.0.0.1:8080".to_string(),
      public_key: None,
      timeout: Duration::from_secs(30),
    }
  }
}

impl GatewayConfig {
  /// Reads the config from the environment.
  ///
  /// - `FORKFUL_API_BASE`: gateway base URL (default `http://127.0.0.1:8080`)
  /// - `FORKFUL_PUBLIC_KEY`: optional public bearer key
  /// - `FORKFUL_API_TIMEOUT`: request timeout in seconds (default 30)
  pub fn from_env() -> Self {
    let defaults = Self::default();
    let base_url = std::env::var("FORKFUL_API_BASE").unwrap_or(defaults.base_url);
    let public_key = std::env::var("FORKFUL_PUBLIC_KEY").ok().filter(|k| !k.is_empty());
    let timeout = std::env::var("FORKFUL_API_TIMEOUT")
      .ok()
      .and_then(|s| s.parse().ok())
      .map(Duration::from_secs)
      .unwrap_or(defaults.timeout);

    Self {
      base_url,
      public_key,
      timeout,
    }
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
    self.public_key = Some(public_key.into());
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

pub struct HttpGateway {
  client: Client,
  config: GatewayConfig,
}

impl HttpGateway {
  pub fn new(config: GatewayConfig) -> ClientResult<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &GatewayConfig {
    &self.config
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn segment_url(&self, segments: &[&str]) -> ClientResult<Url> {
    segment_url(&self.config.base_url, segments)
  }

  /// Attaches the public key, if one is configured.
  fn public(&self, builder: RequestBuilder) -> RequestBuilder {
    match &self.config.public_key {
      Some(key) => builder.bearer_auth(key),
      None => builder,
    }
  }

  async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, action: &'static str) -> ClientResult<T> {
    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
      let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("Failed to {}", action));
      warn!(status = status.as_u16(), %message, "Gateway call to {} failed.", action);
      return Err(ClientError::Api {
        status: status.as_u16(),
        message,
      });
    }

    debug!(status = status.as_u16(), bytes = bytes.len(), "Gateway call to {} succeeded.", action);
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(format!("{}: {}", action, e)))
  }
}

#[async_trait]
impl GatewayApi for HttpGateway {
  #[instrument(name = "gateway::list_restaurants", skip(self))]
  async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
    let builder = self.public(self.client.get(self.url("/restaurants")));
    let body: RestaurantsBody = self.send(builder, "fetch restaurants").await?;
    Ok(body.restaurants)
  }

  #[instrument(name = "gateway::get_restaurant", skip(self))]
  async fn get_restaurant(&self, restaurant_id: &str) -> ClientResult<Restaurant> {
    let builder = self.public(self.client.get(self.segment_url(&["restaurants", restaurant_id])?));
    let body: RestaurantBody = self.send(builder, "fetch restaurant").await?;
    Ok(body.restaurant)
  }

  #[instrument(name = "gateway::init_restaurants", skip(self))]
  async fn init_restaurants(&self) -> ClientResult<String> {
    let builder = self.public(self.client.post(self.url("/init-restaurants")));
    let body: MessageBody = self.send(builder, "initialize restaurants").await?;
    Ok(body.message)
  }

  #[instrument(name = "gateway::submit_contact", skip(self, request), fields(email = %request.email))]
  async fn submit_contact(&self, request: &ContactRequest) -> ClientResult<String> {
    let builder = self.public(self.client.post(self.url("/contact")).json(request));
    let body: MessageBody = self.send(builder, "send message").await?;
    Ok(body.message)
  }

  #[instrument(name = "gateway::create_order", skip(self, access_token, order), fields(lines = order.items.len()))]
  async fn create_order(&self, access_token: &str, order: &NewOrder) -> ClientResult<Order> {
    let builder = self.client.post(self.url("/orders")).bearer_auth(access_token).json(order);
    let body: OrderBody = self.send(builder, "create order").await?;
    Ok(body.order)
  }

  #[instrument(name = "gateway::list_orders", skip(self, access_token))]
  async fn list_orders(&self, access_token: &str) -> ClientResult<Vec<Order>> {
    let builder = self.client.get(self.url("/orders")).bearer_auth(access_token);
    let body: OrdersBody = self.send(builder, "fetch orders").await?;
    Ok(body.orders)
  }

  #[instrument(name = "gateway::sign_up", skip(self, request), fields(email = %request.email))]
  async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<IdentityUser> {
    let builder = self.public(self.client.post(self.url("/signup")).json(request));
    let body: SignUpBody = self.send(builder, "sign up").await?;
    Ok(body.user)
  }

  #[instrument(name = "gateway::get_profile", skip(self, access_token))]
  async fn get_profile(&self, access_token: &str) -> ClientResult<Option<UserProfile>> {
    let builder = self.client.get(self.url("/profile")).bearer_auth(access_token);
    let body: ProfileBody = self.send(builder, "fetch profile").await?;
    Ok(body.profile)
  }
}

#[async_trait]
impl AuthApi for HttpGateway {
  #[instrument(name = "gateway::sign_in", skip(self, request), fields(email = %request.email))]
  async fn sign_in(&self, request: &SignInRequest) -> ClientResult<Session> {
    let builder = self.public(self.client.post(self.url("/signin")).json(request));
    let body: SessionBody = self.send(builder, "sign in").await?;
    Ok(body.session)
  }

  #[instrument(name = "gateway::sign_out", skip(self, access_token))]
  async fn sign_out(&self, access_token: &str) -> ClientResult<()> {
    let builder = self.client.post(self.url("/signout")).bearer_auth(access_token);
    let _: SuccessBody = self.send(builder, "sign out").await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::segment_url;

  #[test]
  fn restaurant_id_stays_one_path_segment() {
    let url = segment_url("http://127.0.0.1:8080/api/", &["restaurants", "a/b?c#d"]).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/restaurants/a%2Fb%3Fc%23d");

    let url = segment_url("http://127.0.0.1:8080", &["restaurants", "3"]).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/restaurants/3");
  }

  #[test]
  fn unparseable_base_url_is_reported() {
    assert!(segment_url("not a url", &["restaurants", "1"]).is_err());
  }
}
