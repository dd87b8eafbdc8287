//! Client inquiry types

use crate::errors::DeskError;
use crate::product::Product;
use crate::trade::TradeSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a client inquiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryState {
    #[default]
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

impl InquiryState {
    pub fn as_label(&self) -> &'static str {
        match self {
            InquiryState::Received => "RECEIVED",
            InquiryState::Quoted => "QUOTED",
            InquiryState::Done => "DONE",
            InquiryState::Rejected => "REJECTED",
            InquiryState::CustomerRejected => "CUSTOMER_REJECTED",
        }
    }

    /// Parse a wire label, failing closed on anything unrecognized
    pub fn from_label(label: &str) -> Result<Self, DeskError> {
        match label {
            "RECEIVED" => Ok(InquiryState::Received),
            "QUOTED" => Ok(InquiryState::Quoted),
            "DONE" => Ok(InquiryState::Done),
            "REJECTED" => Ok(InquiryState::Rejected),
            "CUSTOMER_REJECTED" => Ok(InquiryState::CustomerRejected),
            other => Err(DeskError::InvalidState(other.to_string())),
        }
    }
}

/// A client inquiry for a quote in one product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: String,
    pub product: Product,
    pub side: TradeSide,
    pub quantity: u64,
    /// Price the desk has responded with; zero until quoted
    pub price: Decimal,
    pub state: InquiryState,
}

impl Inquiry {
    pub fn new(
        inquiry_id: impl Into<String>,
        product: Product,
        side: TradeSide,
        quantity: u64,
        price: Decimal,
        state: InquiryState,
    ) -> Self {
        Self {
            inquiry_id: inquiry_id.into(),
            product,
            side,
            quantity,
            price,
            state,
        }
    }
}
