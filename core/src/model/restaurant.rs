// forkful/src/model/restaurant.rs

use serde::{Deserialize, Serialize};

/// A restaurant with its full menu, as stored under `restaurant:<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
  pub id: String,
  pub name: String,
  pub image: String,
  pub rating: f64,
  /// Minutes, as a display range such as `"25-35"`.
  pub delivery_time: String,
  pub distance: String,
  pub cuisine: String,
  pub price_range: String,
  pub description: String,
  pub address: String,
  pub phone: String,
  pub menu: Vec<MenuItem>,
}

impl Restaurant {
  pub fn menu_item(&self, menu_item_id: &str) -> Option<&MenuItem> {
    self.menu.iter().find(|item| item.id == menu_item_id)
  }
}

/// One dish. `id` is only unique within its restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
  pub id: String,
  pub name: String,
  /// Decimal dollars, e.g. `12.99`.
  pub price: f64,
  pub description: String,
  pub image: String,
}
