//! Tradable product identities
//!
//! The desk trades US Treasury bonds today; interest-rate swaps are carried
//! as a second product family so multi-asset stores stay possible without
//! reworking every service signature. A closed enum (not trait objects)
//! keeps products `Clone + Default` for the keyed stores.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed-coupon bond identified by CUSIP
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// CUSIP identifier, e.g. "91282CLY5"
    pub product_id: String,
    /// Issuer ticker, e.g. "US2Y"
    pub ticker: String,
    /// Annual coupon rate as a fraction (0.0425 = 4.25%)
    pub coupon: Decimal,
    pub maturity: NaiveDate,
}

impl Bond {
    pub fn new(
        product_id: impl Into<String>,
        ticker: impl Into<String>,
        coupon: Decimal,
        maturity: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }
}

/// A fixed-for-floating interest rate swap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swap {
    pub product_id: String,
    /// Fixed leg rate as a fraction
    pub fixed_rate: Decimal,
    pub term_years: u32,
}

/// Product identity carried by every keyed value in the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Product {
    Bond(Bond),
    Swap(Swap),
}

impl Product {
    /// Identifier used as the store key for this product
    pub fn product_id(&self) -> &str {
        match self {
            Product::Bond(bond) => &bond.product_id,
            Product::Swap(swap) => &swap.product_id,
        }
    }
}

impl Default for Product {
    fn default() -> Self {
        Product::Bond(Bond::default())
    }
}
