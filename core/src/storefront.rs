// forkful/src/storefront.rs

//! The storefront session: page state, cart, identity and the gateway calls
//! that move between them.
//!
//! Calls whose result changes what is on screen are split in two. `open_*` /
//! `begin_*` captures a [`ViewTicket`] and returns a [`Pending`] future that
//! borrows nothing from the storefront; `apply_*` takes the [`Resolved`] value
//! and drops it if the user navigated, or issued a newer request, in the meantime.

use crate::api::{AuthApi, GatewayApi};
use crate::cart::{Cart, CartLineItem};
use crate::checkout::{CheckoutEngine, CheckoutRequest};
use crate::error::{ClientError, ClientResult};
use crate::http::{GatewayConfig, HttpGateway};
use crate::identity::IdentityAdapter;
use crate::model::{ContactRequest, IdentityUser, Order, Restaurant, Session};
use crate::money::Totals;
use crate::navigation::{CheckoutGate, InvalidTransition, NavAction, Navigator, Page, ViewTicket};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
  Success,
  Error,
}

/// A short user-facing message ("toast").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: NoticeLevel,
  pub message: String,
}

type BoxedCall<T> = Pin<Box<dyn Future<Output = ClientResult<T>> + Send>>;

/// Holds the storefront's order-in-flight flag while a submission is alive.
/// Dropping it, applied or abandoned, clears the flag.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
  fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
    flag
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| InFlight(flag.clone()))
  }
}

impl Drop for InFlight {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

/// An in-flight call tagged with the view it was issued from.
#[must_use = "a pending call does nothing until resolved"]
pub struct Pending<T> {
  ticket: ViewTicket,
  call: BoxedCall<T>,
  in_flight: Option<InFlight>,
}

impl<T> Pending<T> {
  pub fn ticket(&self) -> ViewTicket {
    self.ticket
  }

  pub async fn resolve(self) -> Resolved<T> {
    Resolved {
      ticket: self.ticket,
      result: self.call.await,
      in_flight: self.in_flight,
    }
  }
}

pub struct Resolved<T> {
  pub ticket: ViewTicket,
  pub result: ClientResult<T>,
  in_flight: Option<InFlight>,
}

/// What happened to a resolved call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
  Accepted,
  /// The view changed while the call was in flight; the result was dropped.
  Discarded,
  /// The call failed; an error notice was raised.
  Failed,
}

pub struct Storefront {
  gateway: Arc<dyn GatewayApi>,
  identity: IdentityAdapter,
  checkout: Arc<CheckoutEngine>,
  navigator: Navigator,
  cart: Cart,
  restaurants: Vec<Restaurant>,
  selected: Option<Restaurant>,
  order_in_flight: Arc<AtomicBool>,
  last_order: Option<Order>,
  notices: Vec<Notice>,
}

impl Storefront {
  pub fn new(gateway: Arc<dyn GatewayApi>, auth: Arc<dyn AuthApi>) -> ClientResult<Self> {
    let checkout = CheckoutEngine::new(gateway.clone())?;
    Ok(Self {
      identity: IdentityAdapter::new(gateway.clone(), auth),
      gateway,
      checkout: Arc::new(checkout),
      navigator: Navigator::new(),
      cart: Cart::new(),
      restaurants: Vec::new(),
      selected: None,
      order_in_flight: Arc::new(AtomicBool::new(false)),
      last_order: None,
      notices: Vec::new(),
    })
  }

  /// Storefront over the HTTP gateway, which also serves the session routes.
  pub fn connect(config: GatewayConfig) -> ClientResult<Self> {
    let gateway = Arc::new(HttpGateway::new(config)?);
    Self::new(gateway.clone(), gateway)
  }

  /// Resumes a session restored by the caller.
  pub fn with_session(mut self, session: Session) -> Self {
    self.identity = self.identity.with_session(session);
    self
  }

  // --- accessors ---

  pub fn page(&self) -> Page {
    self.navigator.current()
  }

  pub fn navigator(&self) -> &Navigator {
    &self.navigator
  }

  pub fn cart(&self) -> &Cart {
    &self.cart
  }

  pub fn totals(&self) -> Totals {
    self.cart.totals()
  }

  pub fn restaurants(&self) -> &[Restaurant] {
    &self.restaurants
  }

  pub fn selected_restaurant(&self) -> Option<&Restaurant> {
    self.selected.as_ref()
  }

  pub fn session(&self) -> Option<&Session> {
    self.identity.get_session()
  }

  pub fn identity(&self) -> &IdentityAdapter {
    &self.identity
  }

  pub fn order_in_flight(&self) -> bool {
    self.order_in_flight.load(Ordering::Acquire)
  }

  pub fn last_order(&self) -> Option<&Order> {
    self.last_order.as_ref()
  }

  pub fn drain_notices(&mut self) -> Vec<Notice> {
    std::mem::take(&mut self.notices)
  }

  fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
    let message = message.into();
    debug!(?level, %message, "Notice raised.");
    self.notices.push(Notice { level, message });
  }

  // --- startup and catalogue ---

  /// Revalidates a restored session, then loads the restaurant list.
  #[instrument(name = "storefront::start", skip(self))]
  pub async fn start(&mut self) -> ClientResult<()> {
    if let Err(e) = self.identity.revalidate().await {
      warn!(error = %e, "Session check failed, keeping the stored session.");
    }
    self.load_restaurants().await?;
    Ok(())
  }

  /// Fetches the list and seeds the catalogue once if it comes back empty.
  #[instrument(name = "storefront::load_restaurants", skip(self))]
  pub async fn load_restaurants(&mut self) -> ClientResult<&[Restaurant]> {
    match self.fetch_or_seed_restaurants().await {
      Ok(restaurants) => {
        self.restaurants = restaurants;
        Ok(&self.restaurants)
      }
      Err(e) => {
        self.notify(NoticeLevel::Error, "Failed to load restaurants");
        Err(e)
      }
    }
  }

  async fn fetch_or_seed_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
    let restaurants = self.gateway.list_restaurants().await?;
    if !restaurants.is_empty() {
      return Ok(restaurants);
    }
    let message = self.gateway.init_restaurants().await?;
    debug!(%message, "Catalogue was empty, seeded it.");
    self.gateway.list_restaurants().await
  }

  /// Starts fetching one restaurant for the detail page. Only the most recent
  /// fetch can be applied.
  pub fn open_restaurant(&mut self, restaurant_id: &str) -> Pending<Restaurant> {
    let gateway = self.gateway.clone();
    let restaurant_id = restaurant_id.to_string();
    Pending {
      ticket: self.navigator.issue_ticket(),
      call: Box::pin(async move { gateway.get_restaurant(&restaurant_id).await }),
      in_flight: None,
    }
  }

  pub fn apply_restaurant(&mut self, resolved: Resolved<Restaurant>) -> Applied {
    if !self.navigator.is_current(resolved.ticket) {
      debug!(ticket = ?resolved.ticket, "Discarding stale restaurant result.");
      return Applied::Discarded;
    }
    match resolved.result {
      Ok(restaurant) => {
        self.selected = Some(restaurant);
        self.navigator.show_restaurant();
        Applied::Accepted
      }
      Err(e) => {
        warn!(error = %e, "Restaurant fetch failed.");
        self.notify(NoticeLevel::Error, "Failed to load restaurant details");
        Applied::Failed
      }
    }
  }

  pub async fn select_restaurant(&mut self, restaurant_id: &str) -> Applied {
    let resolved = self.open_restaurant(restaurant_id).resolve().await;
    self.apply_restaurant(resolved)
  }

  // --- navigation and cart ---

  pub fn navigate(&mut self, action: NavAction) -> Page {
    self.navigator.navigate(action)
  }

  /// Adds an item from the restaurant currently shown.
  pub fn add_to_cart(&mut self, menu_item_id: &str, quantity: u32) -> ClientResult<CartLineItem> {
    let restaurant = self.selected.as_ref().ok_or(ClientError::NoRestaurantSelected)?;
    let item = restaurant
      .menu_item(menu_item_id)
      .ok_or_else(|| ClientError::UnknownMenuItem {
        restaurant_id: restaurant.id.clone(),
        menu_item_id: menu_item_id.to_string(),
      })?;
    let line = self.cart.add_item(restaurant, item, quantity)?.clone();
    self.notify(NoticeLevel::Success, format!("Added {} x {} to cart", quantity, line.name));
    Ok(line)
  }

  pub fn update_quantity(&mut self, line_id: &str, new_quantity: i64) -> Option<&CartLineItem> {
    self.cart.update_quantity(line_id, new_quantity)
  }

  pub fn remove_item(&mut self, line_id: &str) -> Option<CartLineItem> {
    let removed = self.cart.remove_item(line_id);
    if removed.is_some() {
      self.notify(NoticeLevel::Success, "Item removed from cart");
    }
    removed
  }

  /// Cart → checkout, or the sign-in prompt when there is no session.
  pub fn proceed_to_checkout(&mut self) -> ClientResult<CheckoutGate> {
    let gate = self.navigator.request_checkout(self.session().is_some())?;
    if gate == CheckoutGate::AuthRequired {
      self.notify(NoticeLevel::Error, "Please sign in to checkout");
    }
    Ok(gate)
  }

  pub fn dismiss_sign_in(&mut self) {
    self.navigator.dismiss_auth_prompt();
  }

  // --- identity ---

  pub async fn sign_up(&mut self, email: &str, password: &str, name: &str) -> ClientResult<IdentityUser> {
    match self.identity.sign_up(email, password, name).await {
      Ok(user) => {
        self.notify(NoticeLevel::Success, "Account created successfully! Please sign in.");
        Ok(user)
      }
      Err(e) => {
        self.notify(NoticeLevel::Error, e.to_string());
        Err(e)
      }
    }
  }

  /// Signs in and resumes a checkout that was waiting on it.
  pub async fn sign_in(&mut self, email: &str, password: &str) -> ClientResult<()> {
    if let Err(e) = self.identity.sign_in(email, password).await {
      self.notify(NoticeLevel::Error, e.to_string());
      return Err(e);
    }
    self.notify(NoticeLevel::Success, "Signed in successfully!");
    if self.navigator.resume_after_sign_in() {
      debug!("Resumed deferred checkout.");
    }
    Ok(())
  }

  pub async fn sign_out(&mut self) -> ClientResult<()> {
    match self.identity.sign_out().await {
      Ok(()) => {
        self.notify(NoticeLevel::Success, "Signed out successfully");
        Ok(())
      }
      Err(e) => {
        self.notify(NoticeLevel::Error, e.to_string());
        Err(e)
      }
    }
  }

  // --- orders ---

  /// Starts an order submission from the checkout page.
  ///
  /// Returns `Ok(None)` when a submission is already in flight. Without a
  /// session nothing is sent: the sign-in prompt opens and
  /// [`ClientError::Unauthenticated`] is returned. The in-flight flag lasts as
  /// long as the returned [`Pending`] or its [`Resolved`] value.
  pub fn begin_order(&mut self, request: CheckoutRequest) -> ClientResult<Option<Pending<Order>>> {
    if self.order_in_flight() {
      debug!("Order submission already in flight, ignoring.");
      return Ok(None);
    }
    if self.page() != Page::Checkout {
      return Err(
        InvalidTransition {
          from: self.page(),
          to: Page::OrderSuccess,
        }
        .into(),
      );
    }
    let Some(session) = self.session().cloned() else {
      self.navigator.open_auth_prompt();
      self.notify(NoticeLevel::Error, "Please sign in to complete your order");
      return Err(ClientError::Unauthenticated);
    };

    let Some(in_flight) = InFlight::claim(&self.order_in_flight) else {
      return Ok(None);
    };
    let engine = self.checkout.clone();
    let lines = self.cart.lines().to_vec();
    Ok(Some(Pending {
      ticket: self.navigator.ticket(),
      call: Box::pin(async move { engine.submit(lines, Some(session), request).await }),
      in_flight: Some(in_flight),
    }))
  }

  /// Applies an order result. A placed order always empties the cart; the move
  /// to the success page only happens if the checkout page is still showing.
  pub fn apply_order(&mut self, resolved: Resolved<Order>) -> Applied {
    let Resolved {
      ticket,
      result,
      in_flight,
    } = resolved;
    drop(in_flight);
    match result {
      Ok(order) => {
        self.cart.clear();
        self.last_order = Some(order);
        if !self.navigator.is_current(ticket) {
          debug!(?ticket, "Order placed after the view changed; staying put.");
          return Applied::Discarded;
        }
        match self.navigator.complete_order() {
          Ok(_) => {
            self.notify(NoticeLevel::Success, "Order placed successfully!");
            Applied::Accepted
          }
          Err(e) => {
            debug!(error = %e, "Order placed but the success page is unreachable.");
            Applied::Discarded
          }
        }
      }
      Err(e) if !self.navigator.is_current(ticket) => {
        debug!(error = %e, "Discarding stale order failure.");
        Applied::Discarded
      }
      Err(e) => {
        if e.is_unauthorized() {
          self.navigator.open_auth_prompt();
        }
        self.notify(NoticeLevel::Error, e.to_string());
        Applied::Failed
      }
    }
  }

  /// Submit, wait and apply in one go. `Ok(None)` for an ignored duplicate.
  pub async fn place_order(&mut self, request: CheckoutRequest) -> ClientResult<Option<Applied>> {
    let Some(pending) = self.begin_order(request)? else {
      return Ok(None);
    };
    let resolved = pending.resolve().await;
    Ok(Some(self.apply_order(resolved)))
  }

  #[instrument(name = "storefront::order_history", skip(self))]
  pub async fn order_history(&self) -> ClientResult<Vec<Order>> {
    let session = self.session().ok_or(ClientError::Unauthenticated)?;
    self.gateway.list_orders(&session.access_token).await
  }

  // --- contact ---

  pub async fn submit_contact(&mut self, name: &str, email: &str, message: &str) -> ClientResult<()> {
    let request = ContactRequest {
      name: name.to_string(),
      email: email.to_string(),
      message: message.to_string(),
    };
    match self.gateway.submit_contact(&request).await {
      Ok(_) => {
        self.notify(NoticeLevel::Success, "Message sent successfully! We'll get back to you soon.");
        Ok(())
      }
      Err(e) => {
        self.notify(NoticeLevel::Error, "Failed to send message");
        Err(e)
      }
    }
  }
}
