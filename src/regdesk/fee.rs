//! Monetary rules. Both functions are pure and never round; rounding is a
//! display concern handled in [`crate::views`].

use crate::validation::{is_viettel, is_vnpt};

/// Registration fee before any carrier discount.
pub const BASE_REGISTRATION_FEE: f64 = 6_000_000.0;

/// Discount applied to students on a partner carrier.
pub const CARRIER_DISCOUNT: f64 = 0.35;

/// Fee owed for a registration, derived from the student's phone number.
///
/// Viettel and VNPT numbers get [`CARRIER_DISCOUNT`] off the base fee.
pub fn registration_fee(phone: &str) -> f64 {
    if is_viettel(phone) || is_vnpt(phone) {
        BASE_REGISTRATION_FEE * (1.0 - CARRIER_DISCOUNT)
    } else {
        BASE_REGISTRATION_FEE
    }
}

pub fn order_cost(unit_price: f64, tables: u32) -> f64 {
    unit_price * f64::from(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn viettel_phone_is_discounted() {
        assert!(approx(registration_fee("0321234567"), 6_000_000.0 * 0.65));
    }

    #[test]
    fn vnpt_phone_is_discounted() {
        assert!(approx(registration_fee("0831234567"), 3_900_000.0));
    }

    #[test]
    fn other_phone_pays_full_base() {
        assert_eq!(registration_fee("0201234567"), BASE_REGISTRATION_FEE);
        assert_eq!(registration_fee("8412345678"), BASE_REGISTRATION_FEE);
    }

    #[test]
    fn order_cost_is_price_times_tables() {
        assert_eq!(order_cost(1_250_000.0, 4), 5_000_000.0);
        assert_eq!(order_cost(999.5, 0), 0.0);
    }
}
