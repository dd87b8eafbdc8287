//! Fractional price codec and the internal price record
//!
//! US Treasury prices are quoted in 32nds plus eighths-of-a-32nd:
//! `W-FFE` where `W` is the whole number of points, `FF` the number of
//! 32nds (00-31) and `E` the number of eighths of a 32nd (0-7, with 4
//! written as `+`). The smallest increment is therefore 1/256 of a point,
//! which is exact in base-10 decimal (0.00390625), so every quoted price
//! round-trips losslessly through `Decimal`.

use crate::errors::DeskError;
use crate::product::Product;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ticks per point: 32 thirty-seconds x 8 eighths
const TICKS_PER_POINT: i64 = 256;

/// The minimum price increment, 1/256 = 0.00390625
pub fn tick() -> Decimal {
    Decimal::new(390_625, 8)
}

/// Parse a fractional price string into a decimal point value
///
/// Accepts exactly the `W-FFE` form; anything else is an
/// `DeskError::InvalidPrice` carrying the offending text.
pub fn parse_price(text: &str) -> Result<Decimal, DeskError> {
    let invalid = || DeskError::InvalidPrice(text.to_string());

    let (whole_part, frac_part) = text.split_once('-').ok_or_else(invalid)?;
    if frac_part.len() != 3 {
        return Err(invalid());
    }

    let whole: i64 = whole_part.parse().map_err(|_| invalid())?;
    if whole < 0 {
        return Err(invalid());
    }

    let thirty_seconds: i64 = frac_part[..2].parse().map_err(|_| invalid())?;
    if thirty_seconds > 31 {
        return Err(invalid());
    }

    let eighths = match frac_part.as_bytes()[2] {
        b'+' => 4,
        c @ b'0'..=b'7' => i64::from(c - b'0'),
        _ => return Err(invalid()),
    };

    let ticks = whole * TICKS_PER_POINT + thirty_seconds * 8 + eighths;
    Ok(Decimal::from(ticks) * tick())
}

/// Render a decimal point value in the `W-FFE` fractional form
///
/// Values are rounded to the nearest 1/256 tick before rendering.
pub fn format_price(value: Decimal) -> String {
    let ticks = (value * Decimal::from(TICKS_PER_POINT))
        .round()
        .to_i64()
        .unwrap_or(0);

    let whole = ticks.div_euclid(TICKS_PER_POINT);
    let remainder = ticks.rem_euclid(TICKS_PER_POINT);
    let thirty_seconds = remainder / 8;
    let eighths = remainder % 8;

    if eighths == 4 {
        format!("{}-{:02}+", whole, thirty_seconds)
    } else {
        format!("{}-{:02}{}", whole, thirty_seconds, eighths)
    }
}

/// Internal desk price: mid and bid/offer spread for one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub product: Product,
    pub mid: Decimal,
    pub spread: Decimal,
}

impl Price {
    pub fn new(product: Product, mid: Decimal, spread: Decimal) -> Self {
        Self {
            product,
            mid,
            spread,
        }
    }

    /// Bid implied by the mid and spread
    pub fn bid(&self) -> Decimal {
        self.mid - self.spread / Decimal::from(2)
    }

    /// Offer implied by the mid and spread
    pub fn offer(&self) -> Decimal {
        self.mid + self.spread / Decimal::from(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_whole_price() {
        assert_eq!(parse_price("100-000").unwrap(), Decimal::from(100));
    }

    #[test]
    fn test_parse_one_tick() {
        assert_eq!(parse_price("100-001").unwrap(), Decimal::new(100_003_906_25, 8));
    }

    #[test]
    fn test_parse_plus_means_four_eighths() {
        // 99-31+ = 99 + 31/32 + 4/256
        let expected = Decimal::from(99)
            + Decimal::from(31) / Decimal::from(32)
            + Decimal::from(4) / Decimal::from(256);
        assert_eq!(parse_price("99-31+").unwrap(), expected.round_dp(8));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["100", "100-320", "100-3", "100-3200", "-1-000", "abc-000", "100-009", "100-0+0"] {
            assert!(
                matches!(parse_price(bad), Err(DeskError::InvalidPrice(_))),
                "expected InvalidPrice for {bad:?}"
            );
        }
    }

    #[test]
    fn test_format_whole_price() {
        assert_eq!(format_price(Decimal::from(100)), "100-000");
    }

    #[test]
    fn test_format_plus_notation() {
        let value = Decimal::from(99) + Decimal::from(4) / Decimal::from(256);
        assert_eq!(format_price(value), "99-00+");
    }

    #[test]
    fn test_format_top_of_range() {
        let value = Decimal::from(101) - tick();
        assert_eq!(format_price(value), "100-317");
    }

    #[test]
    fn test_price_bid_offer() {
        let price = Price::new(
            Product::default(),
            Decimal::from(100),
            Decimal::new(78125, 7), // 1/128
        );
        assert_eq!(price.bid(), Decimal::from(100) - Decimal::new(390625, 8));
        assert_eq!(price.offer(), Decimal::from(100) + Decimal::new(390625, 8));
    }

    proptest! {
        /// Every representable price between 0 and 200 points round-trips
        /// exactly through format/parse at 1/256 resolution.
        #[test]
        fn prop_price_round_trip(ticks in 0i64..(200 * 256)) {
            let value = Decimal::from(ticks) * tick();
            let text = format_price(value);
            let parsed = parse_price(&text).unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}
