//! Pricing service
//!
//! Holds the latest internal desk price (mid and spread) per product and
//! fans updates out to the streaming engine and the GUI sink. Prices enter
//! through the CSV ingress adapter in `ingest`.

pub mod ingest;
pub mod service;

pub use ingest::ingest_prices;
pub use service::PricingService;
