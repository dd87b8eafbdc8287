//! PV01 aggregation and bucketed sector risk

use bus::KeyedStore;
use rust_decimal::Decimal;
use tracing::{debug, info};
use types::errors::DeskError;
use types::position::Position;
use types::refdata::ReferenceData;
use types::risk::{BucketedSector, Pv01, SectorPv01};

/// Keyed store of PV01 risk, keyed by product identifier
pub struct RiskService {
    store: KeyedStore<Pv01>,
    refdata: ReferenceData,
}

impl RiskService {
    pub fn new(refdata: ReferenceData) -> Self {
        info!("RiskService initialized");
        Self {
            store: KeyedStore::new("risk"),
            refdata,
        }
    }

    /// Latest risk record for a product; zero when never positioned
    pub fn get(&self, product_id: &str) -> Pv01 {
        self.store.get(product_id)
    }

    /// Register an observer of risk updates
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Pv01) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// Recompute a product's risk from its new position
    ///
    /// The PV01-per-unit lookup happens before any mutation, so an unknown
    /// product fails the update without touching stored state. The stored
    /// record carries the per-unit PV01 unscaled, with the aggregate
    /// position as the quantity.
    pub fn add_position(&mut self, position: &Position) -> Result<(), DeskError> {
        let product_id = position.product.product_id().to_string();
        let pv01_per_unit = self.refdata.pv01(&product_id)?;

        let quantity = position.aggregate();

        debug!(
            product_id = %product_id,
            pv01 = %pv01_per_unit,
            quantity,
            "risk updated"
        );

        self.store.publish(
            product_id,
            Pv01::new(position.product.clone(), pv01_per_unit, quantity),
        )
    }

    /// Aggregate risk across a sector's products
    ///
    /// Position-weighted sum: `per-unit pv01 x stored quantity` over the
    /// sector's products; products never positioned read as zero records
    /// and contribute nothing. The result's quantity is the literal
    /// sentinel `1`, kept for parity with the desk's established reports.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> SectorPv01 {
        let mut total = Decimal::ZERO;
        for product in &sector.products {
            let stored = self.store.get(product.product_id());
            total += stored.pv01 * Decimal::from(stored.quantity);
        }
        SectorPv01::new(sector.clone(), total, 1)
    }
}
