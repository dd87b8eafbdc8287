//! Order book store and depth aggregation

use bus::KeyedStore;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info};
use types::errors::DeskError;
use types::order::{BidOffer, Order, OrderBook, PricingSide};

/// Configuration for the market data service
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Number of price levels per side in the depth feed
    pub depth: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self { depth: 5 }
    }
}

/// Keyed store of the latest full-depth order book per product
pub struct MarketDataService {
    store: KeyedStore<OrderBook>,
    config: BookConfig,
}

impl MarketDataService {
    pub fn new(config: BookConfig) -> Self {
        info!(depth = config.depth, "MarketDataService initialized");
        Self {
            store: KeyedStore::new("market-data"),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(BookConfig::default())
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Latest book for a product; an empty book when never published
    pub fn get(&self, product_id: &str) -> OrderBook {
        self.store.get(product_id)
    }

    /// Best bid and offer of the latest book, recomputed on each call
    pub fn best_bid_offer(&self, product_id: &str) -> BidOffer {
        self.store.get(product_id).best_bid_offer()
    }

    /// Latest book with each stack grouped by price, quantities summed
    ///
    /// Group order within a stack is unspecified; callers must not depend
    /// on it.
    pub fn aggregate_depth(&self, product_id: &str) -> OrderBook {
        let book = self.store.get(product_id);
        OrderBook::new(
            book.product.clone(),
            group_stack(&book.bid_stack, PricingSide::BID),
            group_stack(&book.offer_stack, PricingSide::OFFER),
        )
    }

    /// Register an observer of book updates
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&OrderBook) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// Replace the stored book wholesale and notify observers
    pub fn on_message(&mut self, book: OrderBook) -> Result<(), DeskError> {
        debug!(
            product_id = book.product.product_id(),
            bids = book.bid_stack.len(),
            offers = book.offer_stack.len(),
            "book update"
        );
        self.store.publish(book.product.product_id().to_string(), book)
    }
}

fn group_stack(stack: &[Order], side: PricingSide) -> Vec<Order> {
    let mut grouped: BTreeMap<Decimal, u64> = BTreeMap::new();
    for order in stack {
        *grouped.entry(order.price).or_insert(0) += order.quantity;
    }
    grouped
        .into_iter()
        .map(|(price, quantity)| Order::new(price, quantity, side))
        .collect()
}
