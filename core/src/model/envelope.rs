// forkful/src/model/envelope.rs

//! Response bodies of the gateway. Every success body carries `success: true`
//! next to its payload; failures are `{"error": "..."}`.

use super::{IdentityUser, Order, Restaurant, Session, UserProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantsBody {
  pub success: bool,
  pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantBody {
  pub success: bool,
  pub restaurant: Restaurant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
  pub success: bool,
  pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBody {
  pub success: bool,
  pub order: Order,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersBody {
  pub success: bool,
  pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpBody {
  pub success: bool,
  pub user: IdentityUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBody {
  pub success: bool,
  pub session: Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBody {
  pub success: bool,
  pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessBody {
  pub success: bool,
}
