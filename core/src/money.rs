// forkful/src/money.rs

//! Cart pricing. Wire prices are decimal dollars; arithmetic happens in whole cents.

/// Flat delivery fee added to every order: 4.99.
pub const DELIVERY_FEE_CENTS: i64 = 499;

/// Sales tax applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: i64 = 8;

/// Converts decimal dollars to cents, rounding half away from zero.
pub fn to_cents(amount: f64) -> i64 {
  (amount * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
  cents as f64 / 100.0
}

/// Derived price breakdown of a cart. Always computed fresh, never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
  pub subtotal_cents: i64,
  pub delivery_fee_cents: i64,
  pub tax_cents: i64,
  pub total_cents: i64,
}

impl Totals {
  pub fn from_subtotal_cents(subtotal_cents: i64) -> Self {
    // Round half up on a non-negative subtotal.
    let tax_cents = (subtotal_cents * TAX_RATE_PERCENT + 50) / 100;
    Self {
      subtotal_cents,
      delivery_fee_cents: DELIVERY_FEE_CENTS,
      tax_cents,
      total_cents: subtotal_cents + DELIVERY_FEE_CENTS + tax_cents,
    }
  }

  pub fn subtotal(&self) -> f64 {
    from_cents(self.subtotal_cents)
  }

  pub fn delivery_fee(&self) -> f64 {
    from_cents(self.delivery_fee_cents)
  }

  pub fn tax(&self) -> f64 {
    from_cents(self.tax_cents)
  }

  pub fn total(&self) -> f64 {
    from_cents(self.total_cents)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn to_cents_absorbs_float_noise() {
    assert_eq!(to_cents(12.99), 1299);
    assert_eq!(to_cents(0.1 + 0.2), 30);
    assert_eq!(to_cents(4.99), 499);
  }

  #[test]
  fn tax_rounds_to_nearest_cent() {
    // 8% of 35.97 is 2.8776
    let totals = Totals::from_subtotal_cents(3597);
    assert_eq!(totals.tax_cents, 288);
    assert_eq!(totals.total_cents, 3597 + 499 + 288);

    // 8% of 0.06 is 0.0048, rounds down
    assert_eq!(Totals::from_subtotal_cents(6).tax_cents, 0);
    // 8% of 0.07 is 0.0056, rounds up
    assert_eq!(Totals::from_subtotal_cents(7).tax_cents, 1);
  }

  #[test]
  fn empty_subtotal_still_pays_delivery() {
    let totals = Totals::from_subtotal_cents(0);
    assert_eq!(totals.total(), 4.99);
    assert_eq!(totals.tax(), 0.0);
  }
}
