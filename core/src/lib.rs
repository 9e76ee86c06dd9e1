// src/lib.rs

//! Forkful: the client side of a food-ordering storefront.
//!
//! The crate covers:
//!  - A cart with merge-on-add, quantity edits and integer-cent totals.
//!  - The page state machine, including sign-in-gated checkout and discarding
//!    of results that arrive after the user moved on.
//!  - An identity adapter that keeps the session as an explicit value.
//!  - Order submission as a small async [`flow::Flow`] of named steps.
//!  - An HTTP client for the gateway routes (`reqwest`).
//!
//! The wire types in [`model`] are shared with the gateway server.

pub mod api;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod flow;
pub mod http;
pub mod identity;
pub mod model;
pub mod money;
pub mod navigation;
pub mod storefront;

// --- Re-exports for the Public API ---

pub use crate::api::{AuthApi, GatewayApi};
pub use crate::cart::{compute_totals, line_id, Cart, CartLineItem};
pub use crate::checkout::{CheckoutCtx, CheckoutEngine, CheckoutRequest};
pub use crate::error::{ClientError, ClientResult, FlowError};
pub use crate::flow::{Flow, FlowOutcome, SharedContext, StepControl};
pub use crate::http::{GatewayConfig, HttpGateway};
pub use crate::identity::IdentityAdapter;
pub use crate::money::Totals;
pub use crate::navigation::{CheckoutGate, NavAction, Navigator, Page, ViewTicket};
pub use crate::storefront::{Applied, Notice, NoticeLevel, Pending, Resolved, Storefront};
