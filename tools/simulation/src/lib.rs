//! Simulation tool
//!
//! Deterministic synthetic feed generation (`generator`) and the static
//! wiring of the full desk pipeline (`pipeline`). The binary generates the
//! four CSV feeds and drives them through the wired graph, leaving the
//! persisted streams on disk.

pub mod generator;
pub mod pipeline;

pub use generator::{DataSimulator, SimulationConfig};
pub use pipeline::Desk;
