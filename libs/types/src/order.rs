//! Market data orders and order books

use crate::errors::DeskError;
use crate::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a market data order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PricingSide {
    #[default]
    BID,
    OFFER,
}

impl PricingSide {
    /// Wire label as it appears in depth feeds
    pub fn as_label(&self) -> &'static str {
        match self {
            PricingSide::BID => "BID",
            PricingSide::OFFER => "OFFER",
        }
    }

    /// Parse a wire label, failing closed on anything unrecognized
    pub fn from_label(label: &str) -> Result<Self, DeskError> {
        match label {
            "BID" => Ok(PricingSide::BID),
            "OFFER" => Ok(PricingSide::OFFER),
            other => Err(DeskError::InvalidSide(other.to_string())),
        }
    }
}

/// A single resting order at one price level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub price: Decimal,
    pub quantity: u64,
    pub side: PricingSide,
}

impl Order {
    pub fn new(price: Decimal, quantity: u64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Best bid and best offer extracted from a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

impl BidOffer {
    /// Offer minus bid; the crossing engine compares this to its threshold
    pub fn spread(&self) -> Decimal {
        self.offer.price - self.bid.price
    }
}

/// Full-depth order book for one product
///
/// Stacks are stored exactly as received; nothing here is sorted or
/// deduplicated. Best-of-book is recomputed on every call rather than
/// cached, so a wholesale stack replacement can never leave a stale top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub product: Product,
    pub bid_stack: Vec<Order>,
    pub offer_stack: Vec<Order>,
}

impl OrderBook {
    pub fn new(product: Product, bid_stack: Vec<Order>, offer_stack: Vec<Order>) -> Self {
        Self {
            product,
            bid_stack,
            offer_stack,
        }
    }

    /// Highest bid and lowest offer, ties resolved to the first encountered.
    /// Empty stacks yield the zero-valued default order.
    pub fn best_bid_offer(&self) -> BidOffer {
        let mut best_bid: Option<&Order> = None;
        for order in &self.bid_stack {
            match best_bid {
                Some(current) if order.price <= current.price => {}
                _ => best_bid = Some(order),
            }
        }

        let mut best_offer: Option<&Order> = None;
        for order in &self.offer_stack {
            match best_offer {
                Some(current) if order.price >= current.price => {}
                _ => best_offer = Some(order),
            }
        }

        BidOffer {
            bid: best_bid.cloned().unwrap_or_default(),
            offer: best_offer.cloned().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(price: &str, quantity: u64, side: PricingSide) -> Order {
        Order::new(Decimal::from_str_exact(price).unwrap(), quantity, side)
    }

    #[test]
    fn test_best_bid_is_max_best_offer_is_min() {
        let book = OrderBook::new(
            Product::default(),
            vec![
                order("99.50", 10, PricingSide::BID),
                order("99.75", 20, PricingSide::BID),
                order("99.25", 30, PricingSide::BID),
            ],
            vec![
                order("100.25", 10, PricingSide::OFFER),
                order("100.00", 20, PricingSide::OFFER),
                order("100.50", 30, PricingSide::OFFER),
            ],
        );

        let top = book.best_bid_offer();
        assert_eq!(top.bid.price, Decimal::from_str_exact("99.75").unwrap());
        assert_eq!(top.bid.quantity, 20);
        assert_eq!(top.offer.price, Decimal::from_str_exact("100.00").unwrap());
        assert_eq!(top.offer.quantity, 20);
    }

    #[test]
    fn test_ties_resolve_to_first_encountered() {
        let book = OrderBook::new(
            Product::default(),
            vec![
                order("99.75", 111, PricingSide::BID),
                order("99.75", 222, PricingSide::BID),
            ],
            vec![
                order("100.00", 333, PricingSide::OFFER),
                order("100.00", 444, PricingSide::OFFER),
            ],
        );

        let top = book.best_bid_offer();
        assert_eq!(top.bid.quantity, 111);
        assert_eq!(top.offer.quantity, 333);
    }

    #[test]
    fn test_empty_stacks_yield_default_orders() {
        let book = OrderBook::default();
        let top = book.best_bid_offer();
        assert_eq!(top.bid, Order::default());
        assert_eq!(top.offer, Order::default());
    }

    #[test]
    fn test_side_label_round_trip() {
        assert_eq!(PricingSide::from_label("BID").unwrap(), PricingSide::BID);
        assert_eq!(PricingSide::from_label("OFFER").unwrap(), PricingSide::OFFER);
        assert!(matches!(
            PricingSide::from_label("bid"),
            Err(DeskError::InvalidSide(_))
        ));
    }
}
