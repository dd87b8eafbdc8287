//! Constructed-once reference tables
//!
//! The product master and PV01-per-unit table are built explicitly at
//! startup and handed to the services that need them; there are no global
//! statics. Lookups fail closed: an identifier that is not in the table is
//! an `UnknownProduct` error, never a default.

use crate::errors::DeskError;
use crate::product::{Bond, Product};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static product and risk reference data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    bonds: BTreeMap<String, Bond>,
    pv01s: BTreeMap<String, Decimal>,
}

impl ReferenceData {
    /// Empty table; useful for tests building custom universes
    pub fn new() -> Self {
        Self::default()
    }

    /// The current on-the-run US Treasury universe with PV01 per unit
    pub fn us_treasuries() -> Self {
        let mut data = Self::new();
        data.insert(
            Bond::new("91282CLY5", "US2Y", Decimal::new(425, 4), maturity(2026, 11, 30)),
            Decimal::new(1854, 4),
        );
        data.insert(
            Bond::new("91282CMB4", "US3Y", Decimal::new(400, 4), maturity(2027, 12, 15)),
            Decimal::new(2738, 4),
        );
        data.insert(
            Bond::new("91282CMA6", "US5Y", Decimal::new(4125, 5), maturity(2029, 11, 30)),
            Decimal::new(4389, 4),
        );
        data.insert(
            Bond::new("91282CLZ2", "US7Y", Decimal::new(4125, 5), maturity(2031, 11, 30)),
            Decimal::new(5911, 4),
        );
        data.insert(
            Bond::new("91282CLW9", "US10Y", Decimal::new(425, 4), maturity(2034, 11, 15)),
            Decimal::new(7910, 4),
        );
        data.insert(
            Bond::new("912810UF3", "US20Y", Decimal::new(4625, 5), maturity(2044, 11, 15)),
            Decimal::new(12829, 4),
        );
        data.insert(
            Bond::new("912810UE6", "US30Y", Decimal::new(4500, 5), maturity(2054, 11, 15)),
            Decimal::new(15956, 4),
        );
        data
    }

    /// Register a bond and its PV01 per unit
    pub fn insert(&mut self, bond: Bond, pv01: Decimal) {
        self.pv01s.insert(bond.product_id.clone(), pv01);
        self.bonds.insert(bond.product_id.clone(), bond);
    }

    /// Look up a bond by CUSIP
    pub fn bond(&self, product_id: &str) -> Result<&Bond, DeskError> {
        self.bonds.get(product_id).ok_or_else(|| DeskError::UnknownProduct {
            id: product_id.to_string(),
        })
    }

    /// Look up a product by identifier
    pub fn product(&self, product_id: &str) -> Result<Product, DeskError> {
        Ok(Product::Bond(self.bond(product_id)?.clone()))
    }

    /// PV01 per unit notional for a product
    pub fn pv01(&self, product_id: &str) -> Result<Decimal, DeskError> {
        self.pv01s
            .get(product_id)
            .copied()
            .ok_or_else(|| DeskError::UnknownProduct {
                id: product_id.to_string(),
            })
    }

    /// All registered product identifiers, in lexical order
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.bonds.keys().map(String::as_str)
    }
}

fn maturity(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid maturity date")
}
