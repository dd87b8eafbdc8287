//! Trade store and execution enrichment

use bus::KeyedStore;
use tracing::{debug, info};
use types::errors::DeskError;
use types::execution::ExecutionOrder;
use types::order::PricingSide;
use types::trade::{Trade, TradeSide};

/// Configuration for the booking service
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Books executions are rotated through, in order
    pub books: Vec<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            books: vec![
                "TRSY1".to_string(),
                "TRSY2".to_string(),
                "TRSY3".to_string(),
            ],
        }
    }
}

/// Keyed store of booked trades, keyed by trade identifier
pub struct BookingService {
    store: KeyedStore<Trade>,
    config: BookingConfig,
    executions_booked: u64,
}

impl BookingService {
    pub fn new(config: BookingConfig) -> Self {
        info!(books = config.books.len(), "BookingService initialized");
        Self {
            store: KeyedStore::new("booking"),
            config,
            executions_booked: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(BookingConfig::default())
    }

    /// Latest trade stored under a trade identifier
    pub fn get(&self, trade_id: &str) -> Trade {
        self.store.get(trade_id)
    }

    /// Register an observer of booked trades
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Trade) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// Book a trade directly: store keyed by trade id, then notify
    pub fn book_trade(&mut self, trade: Trade) -> Result<(), DeskError> {
        debug!(
            product_id = trade.product.product_id(),
            trade_id = %trade.trade_id,
            book = %trade.book,
            quantity = trade.quantity,
            side = trade.side.as_label(),
            "trade booked"
        );
        self.store.publish(trade.trade_id.clone(), trade)
    }

    /// Enrich an execution into exactly one trade and book it
    ///
    /// Deterministic enrichment: the trade side is the flip of the
    /// execution side (an execution hitting the bid is a desk SELL), the
    /// quantity is visible plus hidden, the trade id is the execution's
    /// order id, and the book rotates through the configured list. The
    /// rotation counter advances before selection, so the first execution
    /// lands in the second book.
    pub fn on_execution(&mut self, order: &ExecutionOrder) -> Result<Trade, DeskError> {
        self.executions_booked += 1;
        let book =
            self.config.books[self.executions_booked as usize % self.config.books.len()].clone();

        let side = match order.side {
            PricingSide::BID => TradeSide::SELL,
            PricingSide::OFFER => TradeSide::BUY,
        };

        let trade = Trade::new(
            order.product.clone(),
            order.order_id.to_string(),
            order.price,
            book,
            order.total_quantity(),
            side,
        );
        self.book_trade(trade.clone())?;
        Ok(trade)
    }
}

impl Default for BookingService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use types::ids::OrderId;
    use types::product::{Bond, Product};

    fn bond(id: &str) -> Product {
        Product::Bond(Bond {
            product_id: id.to_string(),
            ..Default::default()
        })
    }

    fn execution(side: PricingSide) -> ExecutionOrder {
        ExecutionOrder {
            product: bond("X"),
            side,
            order_id: OrderId::new(),
            price: Decimal::from(100),
            visible_quantity: 10_000_000,
            hidden_quantity: 20_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_side_flip_and_quantity_sum() {
        let mut service = BookingService::with_defaults();

        let sell = service.on_execution(&execution(PricingSide::BID)).unwrap();
        assert_eq!(sell.side, TradeSide::SELL);
        assert_eq!(sell.quantity, 30_000_000);

        let buy = service.on_execution(&execution(PricingSide::OFFER)).unwrap();
        assert_eq!(buy.side, TradeSide::BUY);
    }

    #[test]
    fn test_book_rotation_starts_at_second_book() {
        let mut service = BookingService::with_defaults();
        let books: Vec<String> = (0..4)
            .map(|_| {
                service
                    .on_execution(&execution(PricingSide::BID))
                    .unwrap()
                    .book
            })
            .collect();
        assert_eq!(books, vec!["TRSY2", "TRSY3", "TRSY1", "TRSY2"]);
    }

    #[test]
    fn test_trade_id_is_execution_order_id() {
        let mut service = BookingService::with_defaults();
        let order = execution(PricingSide::BID);
        let trade = service.on_execution(&order).unwrap();
        assert_eq!(trade.trade_id, order.order_id.to_string());
        assert_eq!(service.get(&trade.trade_id), trade);
    }

    #[test]
    fn test_direct_booking_notifies() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut service = BookingService::with_defaults();
        let seen = Rc::new(RefCell::new(0u32));
        let handle = Rc::clone(&seen);
        service.subscribe(move |_| {
            *handle.borrow_mut() += 1;
            Ok(())
        });

        service
            .book_trade(Trade::new(
                bond("X"),
                "T1",
                Decimal::from(99),
                "TRSY1",
                1_000_000,
                TradeSide::BUY,
            ))
            .unwrap();
        assert_eq!(*seen.borrow(), 1);
    }
}
