//! Position service
//!
//! Aggregates booked trades into signed per-book positions, one keyed
//! record per product. The aggregate across books is derived on read and
//! never stored.

pub mod service;

pub use service::PositionService;
