//! Two-sided quote generator

use bus::KeyedStore;
use rust_decimal::Decimal;
use tracing::{debug, info};
use types::errors::DeskError;
use types::order::PricingSide;
use types::price::Price;
use types::quote::{PriceStream, PriceStreamOrder};

/// Configuration for the quote generator
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Smallest visible quantity on the ladder; updates alternate between
    /// one and two multiples of this
    pub base_quantity: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_quantity: 10_000_000,
        }
    }
}

/// Turns every internal price update into a two-sided streamed quote
///
/// Unlike the crossing engine, the size-ladder counter advances on every
/// price update; quotes are emitted unconditionally.
pub struct AlgoStreamingService {
    store: KeyedStore<PriceStream>,
    config: StreamConfig,
    updates_seen: u64,
}

impl AlgoStreamingService {
    pub fn new(config: StreamConfig) -> Self {
        info!(base_quantity = config.base_quantity, "AlgoStreamingService initialized");
        Self {
            store: KeyedStore::new("algo-streaming"),
            config,
            updates_seen: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(StreamConfig::default())
    }

    /// Latest quote streamed for a product
    pub fn get(&self, product_id: &str) -> PriceStream {
        self.store.get(product_id)
    }

    /// Register an observer of streamed quotes
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PriceStream) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// React to a price update by streaming a quote
    ///
    /// Bid and offer sit half the spread either side of the mid. Visible
    /// quantity alternates `1x` / `2x` the base; hidden is always twice
    /// the visible.
    pub fn on_price_update(&mut self, price: &Price) -> Result<PriceStream, DeskError> {
        let visible = ((self.updates_seen % 2) + 1) * self.config.base_quantity;
        let hidden = visible * 2;
        self.updates_seen += 1;

        let half_spread = price.spread / Decimal::from(2);
        let stream = PriceStream::new(
            price.product.clone(),
            PriceStreamOrder::new(price.mid - half_spread, visible, hidden, PricingSide::BID),
            PriceStreamOrder::new(price.mid + half_spread, visible, hidden, PricingSide::OFFER),
        );

        debug!(
            product_id = price.product.product_id(),
            bid = %stream.bid_order.price,
            offer = %stream.offer_order.price,
            visible,
            "quote streamed"
        );

        self.store
            .publish(price.product.product_id().to_string(), stream.clone())?;
        Ok(stream)
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
