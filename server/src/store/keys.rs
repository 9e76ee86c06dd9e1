// forkful_server/src/store/keys.rs

//! Key layouts and the clock that timestamps new keys.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const RESTAURANT_PREFIX: &str = "restaurant:";

pub fn restaurant_key(restaurant_id: &str) -> String {
  format!("{}{}", RESTAURANT_PREFIX, restaurant_id)
}

pub fn user_key(user_id: &str) -> String {
  format!("user:{}", user_id)
}

/// Emails are matched case-insensitively.
pub fn identity_key(email: &str) -> String {
  format!("identity:{}", email.trim().to_lowercase())
}

pub fn session_key(access_token: &str) -> String {
  format!("session:{}", access_token)
}

pub fn order_prefix(user_id: &str) -> String {
  format!("order:{}:", user_id)
}

pub fn order_key(user_id: &str, epoch_millis: i64) -> String {
  format!("{}{}", order_prefix(user_id), epoch_millis)
}

pub fn contact_key(epoch_millis: i64) -> String {
  format!("contact:{}", epoch_millis)
}

/// Millisecond wall clock that never hands out the same value twice.
///
/// Two calls inside one millisecond get consecutive values, so timestamped
/// keys stay distinct.
#[derive(Debug, Default)]
pub struct KeyClock {
  last: AtomicI64,
}

impl KeyClock {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn next_millis(&self) -> i64 {
    let now = Utc::now().timestamp_millis();
    let previous = self
      .last
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
      .unwrap_or_else(|last| last);
    now.max(previous + 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clock_values_strictly_increase() {
    let clock = KeyClock::new();
    let mut previous = clock.next_millis();
    for _ in 0..1_000 {
      let next = clock.next_millis();
      assert!(next > previous);
      previous = next;
    }
  }

  #[test]
  fn key_layouts() {
    assert_eq!(order_key("u1", 42), "order:u1:42");
    assert!(order_key("u1", 42).starts_with(&order_prefix("u1")));
    assert_eq!(restaurant_key("3"), "restaurant:3");
    assert_eq!(identity_key(" Ada@Example.com "), "identity:ada@example.com");
    assert_eq!(contact_key(7), "contact:7");
  }
}
