//! Market data service
//!
//! Holds the latest full-depth order book per product, replaced wholesale
//! on every update, and feeds the crossing engine. Depth records enter
//! through the CSV ingress adapter in `ingest`.

pub mod ingest;
pub mod service;

pub use ingest::ingest_market_data;
pub use service::{BookConfig, MarketDataService};
