// tests/checkout_tests.rs
mod common;

use common::*;
use forkful::checkout::CheckoutRequest;
use forkful::model::{DeliveryAddress, PaymentMethod};
use forkful::{Cart, CheckoutEngine, ClientError};
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn request() -> CheckoutRequest {
  CheckoutRequest {
    delivery_address: DeliveryAddress {
      address: "12 Analytical St".to_string(),
      city: "London".to_string(),
      zip_code: "N1 9GU".to_string(),
      phone: "+44 20 0000 0000".to_string(),
    },
    payment_method: PaymentMethod::Cash,
  }
}

fn filled_cart() -> Cart {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 2).unwrap();
  cart.add_item(&burgers, &burgers.menu[1], 1).unwrap();
  cart
}

#[tokio::test]
#[serial]
async fn test_checkout_without_session_never_calls_order_endpoint() {
  setup_tracing();
  let gateway = Arc::new(MockGateway::seeded());
  let engine = CheckoutEngine::new(gateway.clone()).unwrap();
  let mut cart = filled_cart();

  let err = engine.checkout(&mut cart, None, request()).await.unwrap_err();

  assert!(matches!(err, ClientError::Unauthenticated));
  assert_eq!(gateway.call_count("create_order"), 0);
  assert_eq!(cart.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_checkout_with_empty_cart_is_rejected_locally() {
  setup_tracing();
  let gateway = Arc::new(MockGateway::seeded());
  let engine = CheckoutEngine::new(gateway.clone()).unwrap();
  let mut cart = Cart::new();

  let err = engine
    .checkout(&mut cart, Some(&ada_session()), request())
    .await
    .unwrap_err();

  assert!(matches!(err, ClientError::EmptyCart));
  assert!(gateway.calls().is_empty());
}

#[tokio::test]
#[serial]
async fn test_successful_checkout_sends_priced_order_and_clears_cart() {
  setup_tracing();
  let gateway = Arc::new(MockGateway::seeded());
  let engine = CheckoutEngine::new(gateway.clone()).unwrap();
  let mut cart = filled_cart();

  let order = engine
    .checkout(&mut cart, Some(&ada_session()), request())
    .await
    .unwrap();

  assert!(cart.is_empty());
  assert!((order.total_amount - 43.84).abs() < 1e-9);
  assert_eq!(order.items.len(), 2);
  assert_eq!(order.payment_method, PaymentMethod::Cash);
  assert_eq!(order.delivery_address.city, "London");
  assert!(order.id.starts_with("order:user-ada:"));
  assert_eq!(gateway.orders.lock().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_failed_order_keeps_cart() {
  setup_tracing();
  let gateway = Arc::new(MockGateway::seeded());
  gateway.fail_orders.store(true, Ordering::SeqCst);
  let engine = CheckoutEngine::new(gateway.clone()).unwrap();
  let mut cart = filled_cart();

  let err = engine
    .checkout(&mut cart, Some(&ada_session()), request())
    .await
    .unwrap_err();

  match err {
    ClientError::Api { status, message } => {
      assert_eq!(status, 500);
      assert_eq!(message, "Failed to create order");
    }
    other => panic!("Expected ClientError::Api, got {:?}", other),
  }
  assert_eq!(cart.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_rejected_token_surfaces_as_unauthorized() {
  setup_tracing();
  let gateway = Arc::new(MockGateway::seeded());
  let engine = CheckoutEngine::new(gateway.clone()).unwrap();
  let mut session = ada_session();
  session.access_token = "expired".to_string();

  let err = engine
    .submit(filled_cart().lines().to_vec(), Some(session), request())
    .await
    .unwrap_err();

  assert!(err.is_unauthorized());
  assert_eq!(gateway.call_count("create_order"), 1);
}

#[test]
fn test_checkout_flow_step_order() {
  let engine = CheckoutEngine::new(Arc::new(MockGateway::new())).unwrap();
  assert_eq!(
    engine.flow().step_names(),
    vec!["require_session", "require_items", "price_snapshot", "submit_order"]
  );
}
