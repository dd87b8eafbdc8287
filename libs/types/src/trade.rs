//! Booked trade types

use crate::errors::DeskError;
use crate::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a booked trade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    #[default]
    BUY,
    SELL,
}

impl TradeSide {
    pub fn as_label(&self) -> &'static str {
        match self {
            TradeSide::BUY => "BUY",
            TradeSide::SELL => "SELL",
        }
    }

    /// Parse a wire label, failing closed on anything unrecognized
    pub fn from_label(label: &str) -> Result<Self, DeskError> {
        match label {
            "BUY" => Ok(TradeSide::BUY),
            "SELL" => Ok(TradeSide::SELL),
            other => Err(DeskError::InvalidSide(other.to_string())),
        }
    }

    /// Signed multiplier applied to quantities when positions aggregate
    pub fn sign(&self) -> i64 {
        match self {
            TradeSide::BUY => 1,
            TradeSide::SELL => -1,
        }
    }
}

/// A trade booked against one of the desk's books
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub product: Product,
    pub trade_id: String,
    pub price: Decimal,
    /// Book the trade is attributed to, e.g. "TRSY1"
    pub book: String,
    pub quantity: u64,
    pub side: TradeSide,
}

impl Trade {
    pub fn new(
        product: Product,
        trade_id: impl Into<String>,
        price: Decimal,
        book: impl Into<String>,
        quantity: u64,
        side: TradeSide,
    ) -> Self {
        Self {
            product,
            trade_id: trade_id.into(),
            price,
            book: book.into(),
            quantity,
            side,
        }
    }

    /// Quantity signed by trade direction (BUY positive, SELL negative)
    pub fn signed_quantity(&self) -> i64 {
        self.side.sign() * self.quantity as i64
    }
}
