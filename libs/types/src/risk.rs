//! PV01 risk values and bucketed sectors

use crate::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dollar-value-of-a-basis-point risk for one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pv01 {
    pub product: Product,
    /// PV01 per unit notional, from the static reference table
    pub pv01: Decimal,
    pub quantity: i64,
}

impl Pv01 {
    pub fn new(product: Product, pv01: Decimal, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }
}

/// A named, immutable set of products risk can be bucketed over
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub name: String,
    pub products: Vec<Product>,
}

impl BucketedSector {
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }
}

/// Aggregated PV01 across a sector's products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorPv01 {
    pub sector: BucketedSector,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl SectorPv01 {
    pub fn new(sector: BucketedSector, pv01: Decimal, quantity: i64) -> Self {
        Self {
            sector,
            pv01,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pv01_serialization() {
        let pv01 = Pv01::new(Product::default(), Decimal::new(1854, 4), 5_000_000);
        let json = serde_json::to_string(&pv01).unwrap();
        let deserialized: Pv01 = serde_json::from_str(&json).unwrap();
        assert_eq!(pv01, deserialized);
    }

    #[test]
    fn test_sector_holds_product_list() {
        let sector = BucketedSector::new("FrontEnd", vec![Product::default()]);
        assert_eq!(sector.name, "FrontEnd");
        assert_eq!(sector.products.len(), 1);
    }
}
