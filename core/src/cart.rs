// forkful/src/cart.rs

//! The in-memory cart owned by one browsing session.

use crate::error::{ClientError, ClientResult};
use crate::model::{MenuItem, OrderLine, Restaurant};
use crate::money::{to_cents, Totals};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Line id for a (restaurant, menu item) pairing.
pub fn line_id(restaurant_id: &str, menu_item_id: &str) -> String {
  format!("{}-{}", restaurant_id, menu_item_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
  pub id: String,
  pub restaurant_id: String,
  pub restaurant_name: String,
  pub name: String,
  #[serde(rename = "price")]
  pub unit_price: f64,
  /// Never below 1 while the line is in a cart.
  pub quantity: u32,
  pub image: String,
}

impl CartLineItem {
  pub fn line_total_cents(&self) -> i64 {
    to_cents(self.unit_price) * i64::from(self.quantity)
  }

  pub fn to_order_line(&self) -> OrderLine {
    OrderLine {
      restaurant_id: self.restaurant_id.clone(),
      restaurant_name: self.restaurant_name.clone(),
      name: self.name.clone(),
      price: self.unit_price,
      quantity: self.quantity,
    }
  }
}

/// Pure price breakdown of a set of lines.
pub fn compute_totals(lines: &[CartLineItem]) -> Totals {
  Totals::from_subtotal_cents(lines.iter().map(CartLineItem::line_total_cents).sum())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
  lines: Vec<CartLineItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `quantity` of `item` from `restaurant`, merging into an existing line.
  pub fn add_item(&mut self, restaurant: &Restaurant, item: &MenuItem, quantity: u32) -> ClientResult<&CartLineItem> {
    if quantity == 0 {
      return Err(ClientError::InvalidQuantity(0));
    }

    let id = line_id(&restaurant.id, &item.id);
    let idx = match self.lines.iter().position(|line| line.id == id) {
      Some(idx) => {
        let line = &mut self.lines[idx];
        line.quantity = line.quantity.saturating_add(quantity);
        debug!(line_id = %id, quantity = line.quantity, "Cart line quantity increased.");
        idx
      }
      None => {
        self.lines.push(CartLineItem {
          id: id.clone(),
          restaurant_id: restaurant.id.clone(),
          restaurant_name: restaurant.name.clone(),
          name: item.name.clone(),
          unit_price: item.price,
          quantity,
          image: item.image.clone(),
        });
        debug!(line_id = %id, quantity, "Cart line added.");
        self.lines.len() - 1
      }
    };
    Ok(&self.lines[idx])
  }

  /// Sets a line's quantity. Zero or below removes the line; unknown ids are ignored.
  pub fn update_quantity(&mut self, line_id: &str, new_quantity: i64) -> Option<&CartLineItem> {
    if new_quantity <= 0 {
      self.remove_item(line_id);
      return None;
    }
    let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
    let line = self.lines.iter_mut().find(|line| line.id == line_id)?;
    line.quantity = quantity;
    debug!(line_id, quantity, "Cart line quantity set.");
    Some(&*line)
  }

  /// Removes a line if present.
  pub fn remove_item(&mut self, line_id: &str) -> Option<CartLineItem> {
    let idx = self.lines.iter().position(|line| line.id == line_id)?;
    debug!(line_id, "Cart line removed.");
    Some(self.lines.remove(idx))
  }

  pub fn line(&self, line_id: &str) -> Option<&CartLineItem> {
    self.lines.iter().find(|line| line.id == line_id)
  }

  pub fn lines(&self) -> &[CartLineItem] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Number of distinct lines.
  pub fn len(&self) -> usize {
    self.lines.len()
  }

  /// Sum of quantities across lines.
  pub fn item_count(&self) -> u32 {
    self.lines.iter().map(|line| line.quantity).sum()
  }

  pub fn totals(&self) -> Totals {
    compute_totals(&self.lines)
  }

  pub fn order_lines(&self) -> Vec<OrderLine> {
    self.lines.iter().map(CartLineItem::to_order_line).collect()
  }

  pub fn clear(&mut self) {
    self.lines.clear();
  }
}
