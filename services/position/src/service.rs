//! Per-product position aggregation

use bus::KeyedStore;
use tracing::debug;
use types::errors::DeskError;
use types::position::Position;
use types::trade::Trade;

/// Keyed store of per-book positions, keyed by product identifier
pub struct PositionService {
    store: KeyedStore<Position>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new("position"),
        }
    }

    /// Latest position for a product; flat (all zero) when never traded
    pub fn get(&self, product_id: &str) -> Position {
        self.store.get(product_id)
    }

    /// Register an observer of position updates
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Position) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// Fold one booked trade into the product's position
    ///
    /// Builds the replacement record from the stored one: the trade's
    /// signed quantity lands in its book and every other book carries
    /// forward unchanged, then the whole record is replaced and observers
    /// notified.
    pub fn add_trade(&mut self, trade: &Trade) -> Result<(), DeskError> {
        let product_id = trade.product.product_id().to_string();

        let mut position = self.store.get(&product_id);
        position.product = trade.product.clone();
        position.add(trade.book.clone(), trade.signed_quantity());

        debug!(
            product_id = %product_id,
            book = %trade.book,
            delta = trade.signed_quantity(),
            aggregate = position.aggregate(),
            "position updated"
        );

        self.store.publish(product_id, position)
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::product::{Bond, Product};
    use types::trade::TradeSide;

    fn bond(id: &str) -> Product {
        Product::Bond(Bond {
            product_id: id.to_string(),
            ..Default::default()
        })
    }

    fn trade(book: &str, quantity: u64, side: TradeSide) -> Trade {
        Trade::new(bond("X"), "T", Decimal::from(100), book, quantity, side)
    }

    #[test]
    fn test_buy_adds_sell_subtracts() {
        let mut service = PositionService::new();
        service.add_trade(&trade("TRSY1", 5_000_000, TradeSide::BUY)).unwrap();
        service.add_trade(&trade("TRSY1", 2_000_000, TradeSide::SELL)).unwrap();

        let position = service.get("X");
        assert_eq!(position.position("TRSY1"), 3_000_000);
        assert_eq!(position.aggregate(), 3_000_000);
    }

    #[test]
    fn test_other_books_carry_forward() {
        let mut service = PositionService::new();
        service.add_trade(&trade("TRSY1", 5_000_000, TradeSide::BUY)).unwrap();
        service.add_trade(&trade("TRSY2", 1_000_000, TradeSide::SELL)).unwrap();

        let position = service.get("X");
        assert_eq!(position.position("TRSY1"), 5_000_000);
        assert_eq!(position.position("TRSY2"), -1_000_000);
        assert_eq!(position.aggregate(), 4_000_000);
    }

    #[test]
    fn test_products_are_independent() {
        let mut service = PositionService::new();
        service.add_trade(&trade("TRSY1", 5_000_000, TradeSide::BUY)).unwrap();

        let mut other = trade("TRSY1", 7_000_000, TradeSide::BUY);
        other.product = bond("Y");
        service.add_trade(&other).unwrap();

        assert_eq!(service.get("X").aggregate(), 5_000_000);
        assert_eq!(service.get("Y").aggregate(), 7_000_000);
    }

    #[test]
    fn test_never_traded_product_reads_flat() {
        let service = PositionService::new();
        assert_eq!(service.get("NEVER").aggregate(), 0);
    }
}
