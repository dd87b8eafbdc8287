//! Two-sided streamed quotes

use crate::order::PricingSide;
use crate::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One side of a streamed quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: u64,
    pub hidden_quantity: u64,
    pub side: PricingSide,
}

impl PriceStreamOrder {
    pub fn new(price: Decimal, visible_quantity: u64, hidden_quantity: u64, side: PricingSide) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

/// A two-sided quote streamed out for one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceStream {
    pub product: Product,
    pub bid_order: PriceStreamOrder,
    pub offer_order: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(product: Product, bid_order: PriceStreamOrder, offer_order: PriceStreamOrder) -> Self {
        Self {
            product,
            bid_order,
            offer_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_stream_serialization() {
        let stream = PriceStream::new(
            Product::default(),
            PriceStreamOrder::new(Decimal::from(99), 10_000_000, 20_000_000, PricingSide::BID),
            PriceStreamOrder::new(Decimal::from(100), 10_000_000, 20_000_000, PricingSide::OFFER),
        );
        let json = serde_json::to_string(&stream).unwrap();
        let deserialized: PriceStream = serde_json::from_str(&json).unwrap();
        assert_eq!(stream, deserialized);
    }
}
