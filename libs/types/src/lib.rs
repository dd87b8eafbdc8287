//! Types library for the trading desk pipeline
//!
//! This library provides all core type definitions shared across the desk
//! services, ensuring type safety and deterministic behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId)
//! - `product`: Tradable product identities (bonds, swaps)
//! - `price`: Fractional price codec and the internal price record
//! - `order`: Market data orders and order books
//! - `execution`: Execution orders produced by the crossing engine
//! - `quote`: Two-sided streamed quotes
//! - `trade`: Booked trades
//! - `position`: Per-book position breakdowns
//! - `risk`: PV01 values and bucketed sectors
//! - `inquiry`: Client inquiries
//! - `refdata`: Constructed-once reference tables
//! - `projection`: Ordered field rendering for downstream sinks
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod product;
pub mod price;
pub mod order;
pub mod execution;
pub mod quote;
pub mod trade;
pub mod position;
pub mod risk;
pub mod inquiry;
pub mod refdata;
pub mod projection;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::product::*;
    pub use crate::price::*;
    pub use crate::order::*;
    pub use crate::execution::*;
    pub use crate::quote::*;
    pub use crate::trade::*;
    pub use crate::position::*;
    pub use crate::risk::*;
    pub use crate::inquiry::*;
    pub use crate::refdata::*;
    pub use crate::projection::*;
    pub use crate::errors::*;
}
