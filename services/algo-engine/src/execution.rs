//! Spread-crossing execution generator

use bus::KeyedStore;
use rust_decimal::Decimal;
use tracing::{debug, info};
use types::errors::DeskError;
use types::execution::{ExecutionOrder, OrderKind};
use types::ids::OrderId;
use types::order::{OrderBook, PricingSide};

/// Configuration for the crossing engine
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Maximum top-of-book spread that still triggers an execution
    pub crossing_threshold: Decimal,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            // 1/128 of a point
            crossing_threshold: Decimal::new(78_125, 7),
        }
    }
}

/// Emits market orders against the tightest books
///
/// The alternation counter is global to the engine instance, shared across
/// every product it watches, and advances only when an execution is
/// actually emitted. Even counts hit the bid, odd counts lift the offer.
pub struct AlgoExecutionService {
    store: KeyedStore<ExecutionOrder>,
    config: ExecutionConfig,
    executions_emitted: u64,
}

impl AlgoExecutionService {
    pub fn new(config: ExecutionConfig) -> Self {
        info!(
            crossing_threshold = %config.crossing_threshold,
            "AlgoExecutionService initialized"
        );
        Self {
            store: KeyedStore::new("algo-execution"),
            config,
            executions_emitted: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExecutionConfig::default())
    }

    /// Latest execution emitted for a product
    pub fn get(&self, product_id: &str) -> ExecutionOrder {
        self.store.get(product_id)
    }

    /// Total executions emitted since creation
    pub fn executions_emitted(&self) -> u64 {
        self.executions_emitted
    }

    /// Register an observer of emitted executions
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ExecutionOrder) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// React to a book update, emitting at most one execution
    ///
    /// Executes only when `best_offer - best_bid <= threshold`: at the
    /// chosen side's best price for its full visible quantity, as a fully
    /// visible parentless market order. Above the threshold the update is
    /// ignored.
    pub fn on_book_update(&mut self, book: &OrderBook) -> Result<Option<ExecutionOrder>, DeskError> {
        let top = book.best_bid_offer();
        if top.spread() > self.config.crossing_threshold {
            return Ok(None);
        }

        let side = if self.executions_emitted % 2 == 0 {
            PricingSide::BID
        } else {
            PricingSide::OFFER
        };
        self.executions_emitted += 1;

        let hit = match side {
            PricingSide::BID => &top.bid,
            PricingSide::OFFER => &top.offer,
        };

        let order = ExecutionOrder {
            product: book.product.clone(),
            side,
            order_id: OrderId::new(),
            kind: OrderKind::MARKET,
            price: hit.price,
            visible_quantity: hit.quantity,
            hidden_quantity: 0,
            parent_order_id: None,
            is_child_order: false,
        };

        debug!(
            product_id = book.product.product_id(),
            side = side.as_label(),
            price = %order.price,
            quantity = order.visible_quantity,
            "execution emitted"
        );

        self.store
            .publish(book.product.product_id().to_string(), order.clone())?;
        Ok(Some(order))
    }
}

impl Default for AlgoExecutionService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
