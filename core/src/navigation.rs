// forkful/src/navigation.rs

//! Page state machine of the storefront.
//!
//! Every transition advances a view generation. Asynchronous work captures a
//! [`ViewTicket`] when it starts and is only applied if that ticket is still
//! current when it resolves.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
  #[default]
  Home,
  Restaurants,
  About,
  Contact,
  RestaurantDetail,
  Cart,
  Checkout,
  OrderSuccess,
}

/// User-triggered navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
  Home,
  Restaurants,
  About,
  Contact,
  ViewCart,
  Back,
}

/// Identifies the view an asynchronous request was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
  page: Page,
  generation: u64,
}

impl ViewTicket {
  pub fn page(&self) -> Page {
    self.page
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutGate {
  /// The checkout page is now showing.
  Entered,
  /// No session: the sign-in prompt is open and checkout resumes once it succeeds.
  AuthRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot go from {from:?} to {to:?}")]
pub struct InvalidTransition {
  pub from: Page,
  pub to: Page,
}

#[derive(Debug, Default)]
pub struct Navigator {
  current: Page,
  generation: u64,
  auth_prompt_open: bool,
  checkout_deferred: bool,
}

impl Navigator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn current(&self) -> Page {
    self.current
  }

  pub fn ticket(&self) -> ViewTicket {
    ViewTicket {
      page: self.current,
      generation: self.generation,
    }
  }

  /// Ticket for a request that supersedes any request still in flight from
  /// this view. The page stays as it is.
  pub fn issue_ticket(&mut self) -> ViewTicket {
    self.generation += 1;
    self.ticket()
  }

  /// True if no transition and no newer [`issue_ticket`](Self::issue_ticket)
  /// happened since `ticket` was taken.
  pub fn is_current(&self, ticket: ViewTicket) -> bool {
    ticket.generation == self.generation
  }

  pub fn auth_prompt_open(&self) -> bool {
    self.auth_prompt_open
  }

  pub fn checkout_deferred(&self) -> bool {
    self.checkout_deferred
  }

  pub fn open_auth_prompt(&mut self) {
    self.auth_prompt_open = true;
  }

  /// Closes the sign-in prompt without signing in; a deferred checkout is dropped.
  pub fn dismiss_auth_prompt(&mut self) {
    self.auth_prompt_open = false;
    self.checkout_deferred = false;
  }

  fn transition(&mut self, to: Page) -> Page {
    debug!(from = ?self.current, to = ?to, generation = self.generation + 1, "Page transition.");
    if to != Page::Cart {
      self.checkout_deferred = false;
    }
    self.current = to;
    self.generation += 1;
    to
  }

  pub fn navigate(&mut self, action: NavAction) -> Page {
    let to = match action {
      NavAction::Home => Page::Home,
      NavAction::Restaurants => Page::Restaurants,
      NavAction::About => Page::About,
      NavAction::Contact => Page::Contact,
      NavAction::ViewCart => Page::Cart,
      NavAction::Back => match self.current {
        Page::Checkout => Page::Cart,
        _ => Page::Home,
      },
    };
    self.transition(to)
  }

  /// Shows the detail page once a restaurant fetch has been accepted.
  pub fn show_restaurant(&mut self) -> Page {
    self.transition(Page::RestaurantDetail)
  }

  /// Moves from the cart to checkout, or defers behind the sign-in prompt.
  pub fn request_checkout(&mut self, has_session: bool) -> Result<CheckoutGate, InvalidTransition> {
    if self.current != Page::Cart {
      return Err(InvalidTransition {
        from: self.current,
        to: Page::Checkout,
      });
    }
    if has_session {
      self.transition(Page::Checkout);
      Ok(CheckoutGate::Entered)
    } else {
      self.auth_prompt_open = true;
      self.checkout_deferred = true;
      Ok(CheckoutGate::AuthRequired)
    }
  }

  /// Called after a successful sign-in. Closes the prompt and resumes a deferred
  /// checkout if the user is still looking at the cart.
  pub fn resume_after_sign_in(&mut self) -> bool {
    self.auth_prompt_open = false;
    let resume = self.checkout_deferred && self.current == Page::Cart;
    self.checkout_deferred = false;
    if resume {
      self.transition(Page::Checkout);
    }
    resume
  }

  pub fn complete_order(&mut self) -> Result<Page, InvalidTransition> {
    if self.current != Page::Checkout {
      return Err(InvalidTransition {
        from: self.current,
        to: Page::OrderSuccess,
      });
    }
    Ok(self.transition(Page::OrderSuccess))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn back_from_checkout_returns_to_cart() {
    let mut nav = Navigator::new();
    nav.navigate(NavAction::ViewCart);
    assert_eq!(nav.request_checkout(true), Ok(CheckoutGate::Entered));
    assert_eq!(nav.navigate(NavAction::Back), Page::Cart);
    assert_eq!(nav.navigate(NavAction::Back), Page::Home);
  }

  #[test]
  fn checkout_only_reachable_from_cart() {
    let mut nav = Navigator::new();
    let err = nav.request_checkout(true).unwrap_err();
    assert_eq!(err.from, Page::Home);
    assert_eq!(nav.current(), Page::Home);
  }

  #[test]
  fn checkout_without_session_is_deferred_until_sign_in() {
    let mut nav = Navigator::new();
    nav.navigate(NavAction::ViewCart);
    assert_eq!(nav.request_checkout(false), Ok(CheckoutGate::AuthRequired));
    assert_eq!(nav.current(), Page::Cart);
    assert!(nav.auth_prompt_open());

    assert!(nav.resume_after_sign_in());
    assert_eq!(nav.current(), Page::Checkout);
    assert!(!nav.auth_prompt_open());
  }

  #[test]
  fn leaving_cart_drops_deferred_checkout() {
    let mut nav = Navigator::new();
    nav.navigate(NavAction::ViewCart);
    nav.request_checkout(false).unwrap();
    nav.navigate(NavAction::About);
    nav.navigate(NavAction::ViewCart);
    assert!(!nav.resume_after_sign_in());
    assert_eq!(nav.current(), Page::Cart);
  }

  #[test]
  fn any_transition_invalidates_older_tickets() {
    let mut nav = Navigator::new();
    let ticket = nav.ticket();
    assert!(nav.is_current(ticket));
    nav.navigate(NavAction::Home);
    assert!(!nav.is_current(ticket));
  }

  #[test]
  fn issued_ticket_supersedes_earlier_requests_on_same_page() {
    let mut nav = Navigator::new();
    nav.navigate(NavAction::Restaurants);
    let first = nav.issue_ticket();
    let second = nav.issue_ticket();
    assert_eq!(nav.current(), Page::Restaurants);
    assert_eq!(first.page(), Page::Restaurants);
    assert!(!nav.is_current(first));
    assert!(nav.is_current(second));
  }

  #[test]
  fn order_success_requires_checkout_page() {
    let mut nav = Navigator::new();
    assert!(nav.complete_order().is_err());
    nav.navigate(NavAction::ViewCart);
    nav.request_checkout(true).unwrap();
    assert_eq!(nav.complete_order(), Ok(Page::OrderSuccess));
  }
}
