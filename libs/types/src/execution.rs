//! Execution orders produced by the crossing engine

use crate::ids::OrderId;
use crate::order::PricingSide;
use crate::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Execution order kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    FOK,
    IOC,
    #[default]
    MARKET,
    LIMIT,
    STOP,
}

impl OrderKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            OrderKind::FOK => "FOK",
            OrderKind::IOC => "IOC",
            OrderKind::MARKET => "MARKET",
            OrderKind::LIMIT => "LIMIT",
            OrderKind::STOP => "STOP",
        }
    }
}

/// An order emitted against the market when the spread crosses the
/// engine's threshold
///
/// `visible_quantity` is what the venue would display; `hidden_quantity`
/// stays dark. Crossing executions are always fully visible market orders
/// with no parent linkage; the parent/child fields exist for worked child
/// orders booked through the same path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub product: Product,
    pub side: PricingSide,
    pub order_id: OrderId,
    pub kind: OrderKind,
    pub price: Decimal,
    pub visible_quantity: u64,
    pub hidden_quantity: u64,
    pub parent_order_id: Option<OrderId>,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    /// Total quantity across the visible and hidden portions
    pub fn total_quantity(&self) -> u64 {
        self.visible_quantity + self.hidden_quantity
    }
}
