//! Booking service
//!
//! Books trades into the desk's books, either directly from the trade CSV
//! feed or by enriching execution orders coming off the crossing engine.

pub mod ingest;
pub mod service;

pub use ingest::ingest_trades;
pub use service::{BookingConfig, BookingService};
