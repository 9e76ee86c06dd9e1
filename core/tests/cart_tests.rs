// tests/cart_tests.rs
mod common;

use common::*;
use forkful::{compute_totals, line_id, Cart, ClientError};
use proptest::prelude::*;
use std::collections::BTreeMap;

#[test]
fn test_adding_same_item_twice_merges_into_one_line() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 1).unwrap();
  cart.add_item(&burgers, &burgers.menu[0], 2).unwrap();

  assert_eq!(cart.len(), 1);
  let line = cart.line(&line_id("1", "1")).unwrap();
  assert_eq!(line.quantity, 3);
  assert_eq!(line.restaurant_name, "Burger Place");
}

#[test]
fn test_same_menu_id_at_different_restaurants_stays_separate() {
  let burgers = burger_place();
  let sushi = sushi_bar();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 1).unwrap();
  cart.add_item(&sushi, &sushi.menu[0], 1).unwrap();

  assert_eq!(cart.len(), 2);
  assert_eq!(cart.line("1-1").unwrap().name, "Classic Burger");
  assert_eq!(cart.line("3-1").unwrap().name, "Dragon Roll");
}

#[test]
fn test_zero_quantity_add_is_rejected() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  let err = cart.add_item(&burgers, &burgers.menu[0], 0).unwrap_err();
  assert!(matches!(err, ClientError::InvalidQuantity(0)));
  assert!(cart.is_empty());
}

#[test]
fn test_setting_quantity_to_zero_or_below_removes_line() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 2).unwrap();
  cart.add_item(&burgers, &burgers.menu[1], 1).unwrap();

  assert!(cart.update_quantity("1-1", 0).is_none());
  assert!(cart.update_quantity("1-2", -4).is_none());
  assert!(cart.is_empty());
}

#[test]
fn test_update_quantity_sets_exact_value_and_ignores_unknown_lines() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 2).unwrap();

  assert_eq!(cart.update_quantity("1-1", 5).map(|l| l.quantity), Some(5));
  assert!(cart.update_quantity("9-9", 3).is_none());
  assert_eq!(cart.item_count(), 5);
}

#[test]
fn test_remove_item() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 1).unwrap();
  assert!(cart.remove_item("1-1").is_some());
  assert!(cart.remove_item("1-1").is_none());
}

#[test]
fn test_totals_for_two_line_cart() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[0], 2).unwrap(); // 12.99 x 2
  cart.add_item(&burgers, &burgers.menu[1], 1).unwrap(); // 9.99 x 1

  let totals = cart.totals();
  assert_eq!(totals.subtotal_cents, 3597);
  assert_eq!(totals.delivery_fee_cents, 499);
  assert_eq!(totals.tax_cents, 288);
  assert_eq!(totals.total_cents, 4384);
  assert!((totals.total() - 43.84).abs() < 1e-9);
}

#[test]
fn test_empty_cart_totals_still_carry_delivery_fee() {
  let totals = compute_totals(&[]);
  assert_eq!(totals.subtotal_cents, 0);
  assert_eq!(totals.tax_cents, 0);
  assert_eq!(totals.total_cents, 499);
}

#[test]
fn test_subtotal_is_exact_sum_of_line_totals() {
  let sushi = sushi_bar();
  let mut cart = Cart::new();
  // Ten soups at 4.99 would drift in floating point.
  cart.add_item(&sushi, &sushi.menu[1], 10).unwrap();
  let totals = cart.totals();
  assert_eq!(totals.subtotal_cents, 4990);
  assert_eq!(totals.total_cents, totals.subtotal_cents + totals.delivery_fee_cents + totals.tax_cents);
}

#[test]
fn test_order_lines_snapshot_cart_contents() {
  let burgers = burger_place();
  let mut cart = Cart::new();
  cart.add_item(&burgers, &burgers.menu[1], 3).unwrap();
  let lines = cart.order_lines();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].restaurant_id, "1");
  assert_eq!(lines[0].name, "Loaded Fries");
  assert_eq!(lines[0].price, 9.99);
  assert_eq!(lines[0].quantity, 3);
}

#[derive(Debug, Clone)]
enum CartOp {
  Add { restaurant: usize, item: usize, quantity: u32 },
  Update { restaurant: usize, item: usize, quantity: i64 },
  Remove { restaurant: usize, item: usize },
}

fn cart_op() -> impl Strategy<Value = CartOp> {
  prop_oneof![
    (0..2usize, 0..2usize, 0u32..4).prop_map(|(restaurant, item, quantity)| CartOp::Add { restaurant, item, quantity }),
    (0..2usize, 0..2usize, -3i64..5).prop_map(|(restaurant, item, quantity)| CartOp::Update { restaurant, item, quantity }),
    (0..2usize, 0..2usize).prop_map(|(restaurant, item)| CartOp::Remove { restaurant, item }),
  ]
}

proptest! {
  /// Any mix of add/update/remove keeps every line at quantity >= 1 and
  /// matches a plain map of line id to quantity.
  #[test]
  fn test_cart_never_holds_non_positive_quantity(ops in prop::collection::vec(cart_op(), 1..60)) {
    let restaurants = [burger_place(), sushi_bar()];
    let mut cart = Cart::new();
    let mut expected: BTreeMap<String, u32> = BTreeMap::new();

    for op in ops {
      match op {
        CartOp::Add { restaurant, item, quantity } => {
          let (r, m) = (&restaurants[restaurant], &restaurants[restaurant].menu[item]);
          match cart.add_item(r, m, quantity) {
            Ok(_) => *expected.entry(line_id(&r.id, &m.id)).or_insert(0) += quantity,
            Err(e) => prop_assert!(quantity == 0 && matches!(e, ClientError::InvalidQuantity(0))),
          }
        }
        CartOp::Update { restaurant, item, quantity } => {
          let id = line_id(&restaurants[restaurant].id, &restaurants[restaurant].menu[item].id);
          cart.update_quantity(&id, quantity);
          if expected.contains_key(&id) {
            if quantity <= 0 {
              expected.remove(&id);
            } else {
              expected.insert(id, quantity as u32);
            }
          }
        }
        CartOp::Remove { restaurant, item } => {
          let id = line_id(&restaurants[restaurant].id, &restaurants[restaurant].menu[item].id);
          cart.remove_item(&id);
          expected.remove(&id);
        }
      }

      prop_assert!(cart.lines().iter().all(|line| line.quantity >= 1));
      let actual: BTreeMap<String, u32> = cart.lines().iter().map(|line| (line.id.clone(), line.quantity)).collect();
      prop_assert_eq!(&actual, &expected);
    }
  }
}
