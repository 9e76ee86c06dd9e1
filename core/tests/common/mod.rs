// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use forkful::model::{
  ContactRequest, IdentityUser, MenuItem, NewOrder, Order, Restaurant, Session, SessionUser, SignInRequest,
  SignUpRequest, UserProfile,
};
use forkful::{AuthApi, ClientError, ClientResult, FlowError, GatewayApi, SharedContext, StepControl};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;

pub const VALID_TOKEN: &str = "token-ada";
pub const VALID_PASSWORD: &str = "hunter22";

// --- Tracing ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Flow test context and error ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_halt_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(fe: FlowError) -> Self {
    TestError::Flow(format!("{:?}", fe))
  }
}

pub async fn record_step(
  ctx: SharedContext<TestContext>,
  step_name: &'static str,
  message: &'static str,
) -> Result<StepControl, TestError> {
  let mut guard = ctx.write();
  guard.counter += 1;
  guard.message.push_str(message);
  guard.steps_executed.push(step_name.to_string());
  if guard.should_halt_at.as_deref() == Some(step_name) {
    return Ok(StepControl::Halt);
  }
  Ok(StepControl::Continue)
}

// --- Fixtures ---
fn menu_item(id: &str, name: &str, price: f64) -> MenuItem {
  MenuItem {
    id: id.to_string(),
    name: name.to_string(),
    price,
    description: format!("{} description", name),
    image: format!("https://img.example/{}.jpg", id),
  }
}

pub fn restaurant(id: &str, name: &str, menu: Vec<MenuItem>) -> Restaurant {
  Restaurant {
    id: id.to_string(),
    name: name.to_string(),
    image: format!("https://img.example/r{}.jpg", id),
    rating: 4.5,
    delivery_time: "25-35".to_string(),
    distance: "1.2 km".to_string(),
    cuisine: "Test".to_string(),
    price_range: "$$".to_string(),
    description: format!("{} description", name),
    address: "1 Test Street".to_string(),
    phone: "+1 555 0100".to_string(),
    menu,
  }
}

/// Restaurant "1": burger 12.99, fries 9.99.
pub fn burger_place() -> Restaurant {
  restaurant(
    "1",
    "Burger Place",
    vec![menu_item("1", "Classic Burger", 12.99), menu_item("2", "Loaded Fries", 9.99)],
  )
}

/// Restaurant "3": its menu ids collide with [`burger_place`]'s.
pub fn sushi_bar() -> Restaurant {
  restaurant(
    "3",
    "Tokyo Sushi Bar",
    vec![menu_item("1", "Dragon Roll", 16.99), menu_item("2", "Miso Soup", 4.99)],
  )
}

pub fn ada_session() -> Session {
  Session {
    user: SessionUser {
      id: "user-ada".to_string(),
      email: "ada@example.com".to_string(),
      name: Some("Ada".to_string()),
    },
    access_token: VALID_TOKEN.to_string(),
  }
}

// --- Gateway double ---

/// In-memory stand-in for the gateway and identity provider.
///
/// Starts with an empty catalogue; `init_restaurants` fills it with
/// [`burger_place`] and [`sushi_bar`]. Every call is recorded by name.
#[derive(Default)]
pub struct MockGateway {
  pub restaurants: Mutex<Vec<Restaurant>>,
  pub orders: Mutex<Vec<Order>>,
  pub contacts: Mutex<Vec<ContactRequest>>,
  pub calls: Mutex<Vec<String>>,
  pub fail_orders: AtomicBool,
}

impl MockGateway {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn seeded() -> Self {
    let gateway = Self::default();
    *gateway.restaurants.lock() = vec![burger_place(), sushi_bar()];
    gateway
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn call_count(&self, name: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.as_str() == name).count()
  }

  fn record(&self, name: &str) {
    self.calls.lock().push(name.to_string());
  }

  fn authorize(&self, token: &str) -> ClientResult<()> {
    if token == VALID_TOKEN {
      Ok(())
    } else {
      Err(ClientError::Api {
        status: 401,
        message: "Unauthorized".to_string(),
      })
    }
  }
}

#[async_trait]
impl GatewayApi for MockGateway {
  async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
    self.record("list_restaurants");
    Ok(self.restaurants.lock().clone())
  }

  async fn get_restaurant(&self, restaurant_id: &str) -> ClientResult<Restaurant> {
    self.record("get_restaurant");
    self
      .restaurants
      .lock()
      .iter()
      .find(|r| r.id == restaurant_id)
      .cloned()
      .ok_or_else(|| ClientError::Api {
        status: 404,
        message: "Restaurant not found".to_string(),
      })
  }

  async fn init_restaurants(&self) -> ClientResult<String> {
    self.record("init_restaurants");
    *self.restaurants.lock() = vec![burger_place(), sushi_bar()];
    Ok("Restaurants initialized".to_string())
  }

  async fn submit_contact(&self, request: &ContactRequest) -> ClientResult<String> {
    self.record("submit_contact");
    self.contacts.lock().push(request.clone());
    Ok("Message received".to_string())
  }

  async fn create_order(&self, access_token: &str, order: &NewOrder) -> ClientResult<Order> {
    self.record("create_order");
    self.authorize(access_token)?;
    if self.fail_orders.load(Ordering::SeqCst) {
      return Err(ClientError::Api {
        status: 500,
        message: "Failed to create order".to_string(),
      });
    }
    let mut orders = self.orders.lock();
    let millis = 1_700_000_000_000_i64 + orders.len() as i64;
    let created_at = Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now);
    let placed = Order::pending(format!("order:user-ada:{}", millis), "user-ada".to_string(), order.clone(), created_at);
    orders.push(placed.clone());
    Ok(placed)
  }

  async fn list_orders(&self, access_token: &str) -> ClientResult<Vec<Order>> {
    self.record("list_orders");
    self.authorize(access_token)?;
    Ok(self.orders.lock().clone())
  }

  async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<IdentityUser> {
    self.record("sign_up");
    if request.email == "taken@example.com" {
      return Err(ClientError::Api {
        status: 400,
        message: "User already registered".to_string(),
      });
    }
    Ok(IdentityUser {
      id: "user-new".to_string(),
      email: request.email.clone(),
      name: Some(request.name.clone()),
      created_at: Utc::now(),
    })
  }

  async fn get_profile(&self, access_token: &str) -> ClientResult<Option<UserProfile>> {
    self.record("get_profile");
    self.authorize(access_token)?;
    Ok(Some(UserProfile {
      id: "user-ada".to_string(),
      email: "ada@example.com".to_string(),
      name: "Ada".to_string(),
      created_at: Utc::now(),
    }))
  }
}

#[async_trait]
impl AuthApi for MockGateway {
  async fn sign_in(&self, request: &SignInRequest) -> ClientResult<Session> {
    self.record("sign_in");
    if request.email == "ada@example.com" && request.password == VALID_PASSWORD {
      Ok(ada_session())
    } else {
      Err(ClientError::Api {
        status: 400,
        message: "Invalid login credentials".to_string(),
      })
    }
  }

  async fn sign_out(&self, access_token: &str) -> ClientResult<()> {
    self.record("sign_out");
    self.authorize(access_token)
  }
}
