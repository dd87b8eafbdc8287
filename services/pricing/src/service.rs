//! Latest-price store keyed by product identifier

use bus::KeyedStore;
use tracing::debug;
use types::errors::DeskError;
use types::price::Price;

/// Keyed store of the latest internal price per product
pub struct PricingService {
    store: KeyedStore<Price>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            store: KeyedStore::new("pricing"),
        }
    }

    /// Latest price for a product; the zero price when never published
    pub fn get(&self, product_id: &str) -> Price {
        self.store.get(product_id)
    }

    /// Register an observer of price updates
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Price) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// Store an incoming price and notify observers
    pub fn on_message(&mut self, price: Price) -> Result<(), DeskError> {
        debug!(
            product_id = price.product.product_id(),
            mid = %price.mid,
            spread = %price.spread,
            "price update"
        );
        self.store.publish(price.product.product_id().to_string(), price)
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}
