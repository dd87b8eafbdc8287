//! Keyed store and synchronous listener fan-out
//!
//! Every desk service is, at its core, a `KeyedStore`: a map from a string
//! key to the latest value of one domain type, plus an ordered list of
//! listeners invoked synchronously when a value is published. The whole
//! pipeline runs on one logical thread; there is no queueing, no locking
//! and no listener isolation.

pub mod store;

pub use store::{KeyedStore, Listener};
