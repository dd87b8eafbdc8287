//! Risk service
//!
//! Converts position updates into PV01 risk records using the static
//! reference table, and answers bucketed sector queries over the stored
//! records.

pub mod service;

pub use service::RiskService;
