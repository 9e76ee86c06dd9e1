// forkful/src/checkout.rs

//! Order submission as a [`Flow`].
//!
//! Steps, in order: `require_session`, `require_items`, `price_snapshot`,
//! `submit_order`. The first two fail before any network call is made, so an
//! unauthenticated or empty checkout never reaches the order endpoint.

use crate::api::GatewayApi;
use crate::cart::{compute_totals, Cart, CartLineItem};
use crate::error::{ClientError, ClientResult, FlowError};
use crate::flow::{Flow, FlowOutcome, SharedContext, StepControl};
use crate::model::{DeliveryAddress, NewOrder, Order, PaymentMethod, Session};
use crate::money::Totals;
use std::sync::Arc;
use tracing::{info, instrument};

pub const CHECKOUT_FLOW: &str = "checkout";

/// What the checkout form collects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
  pub delivery_address: DeliveryAddress,
  pub payment_method: PaymentMethod,
}

/// State threaded through the checkout flow.
#[derive(Debug)]
pub struct CheckoutCtx {
  pub session: Option<Session>,
  pub lines: Vec<CartLineItem>,
  pub request: CheckoutRequest,
  pub totals: Option<Totals>,
  pub order: Option<Order>,
}

impl CheckoutCtx {
  pub fn new(lines: Vec<CartLineItem>, session: Option<Session>, request: CheckoutRequest) -> Self {
    Self {
      session,
      lines,
      request,
      totals: None,
      order: None,
    }
  }
}

pub struct CheckoutEngine {
  flow: Flow<CheckoutCtx, ClientError>,
}

impl CheckoutEngine {
  pub fn new(gateway: Arc<dyn GatewayApi>) -> Result<Self, FlowError> {
    let mut flow: Flow<CheckoutCtx, ClientError> = Flow::new(
      CHECKOUT_FLOW,
      &[
        ("require_session", false, None),
        ("require_items", false, None),
        ("price_snapshot", false, None),
        ("submit_order", false, None),
      ],
    );

    flow.on("require_session", |ctx: SharedContext<CheckoutCtx>| async move {
      let has_token = ctx
        .read()
        .session
        .as_ref()
        .is_some_and(|s| !s.access_token.is_empty());
      if !has_token {
        return Err(ClientError::Unauthenticated);
      }
      Ok(StepControl::Continue)
    })?;

    flow.on("require_items", |ctx: SharedContext<CheckoutCtx>| async move {
      if ctx.read().lines.is_empty() {
        return Err(ClientError::EmptyCart);
      }
      Ok(StepControl::Continue)
    })?;

    flow.on("price_snapshot", |ctx: SharedContext<CheckoutCtx>| async move {
      let mut guard = ctx.write();
      let totals = compute_totals(&guard.lines);
      tracing::debug!(total_cents = totals.total_cents, lines = guard.lines.len(), "Priced cart.");
      guard.totals = Some(totals);
      Ok::<_, ClientError>(StepControl::Continue)
    })?;

    flow.on("submit_order", move |ctx: SharedContext<CheckoutCtx>| {
      let gateway = gateway.clone();
      async move {
        let (token, new_order) = {
          let guard = ctx.read();
          let token = guard
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(ClientError::Unauthenticated)?;
          let totals = guard.totals.ok_or_else(|| FlowError::Incomplete {
            flow: CHECKOUT_FLOW.to_string(),
            missing: "a price snapshot",
          })?;
          let new_order = NewOrder {
            items: guard.lines.iter().map(CartLineItem::to_order_line).collect(),
            total_amount: totals.total(),
            delivery_address: guard.request.delivery_address.clone(),
            payment_method: guard.request.payment_method,
          };
          (token, new_order)
        };

        let order = gateway.create_order(&token, &new_order).await?;
        ctx.write().order = Some(order);
        Ok::<_, ClientError>(StepControl::Continue)
      }
    })?;

    Ok(Self { flow })
  }

  pub fn flow(&self) -> &Flow<CheckoutCtx, ClientError> {
    &self.flow
  }

  /// Runs the checkout flow over a snapshot of cart lines.
  #[instrument(name = "checkout::submit", skip_all, fields(lines = lines.len()))]
  pub async fn submit(
    &self,
    lines: Vec<CartLineItem>,
    session: Option<Session>,
    request: CheckoutRequest,
  ) -> ClientResult<Order> {
    let ctx = SharedContext::new(CheckoutCtx::new(lines, session, request));
    let outcome = self.flow.run(ctx.clone()).await?;

    let order = match outcome {
      FlowOutcome::Completed => match ctx.try_unwrap() {
        Ok(done) => done.order,
        Err(shared) => {
          let order = shared.write().order.take();
          order
        }
      },
      FlowOutcome::Halted => None,
    };
    let order = order.ok_or_else(|| FlowError::Incomplete {
      flow: CHECKOUT_FLOW.to_string(),
      missing: "an order",
    })?;
    info!(order_id = %order.id, total = order.total_amount, "Order placed.");
    Ok(order)
  }

  /// Submits `cart` and empties it once the order exists.
  pub async fn checkout(
    &self,
    cart: &mut Cart,
    session: Option<&Session>,
    request: CheckoutRequest,
  ) -> ClientResult<Order> {
    let order = self.submit(cart.lines().to_vec(), session.cloned(), request).await?;
    cart.clear();
    Ok(order)
  }
}
