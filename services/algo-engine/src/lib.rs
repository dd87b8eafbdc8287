//! Algo engine
//!
//! Two generators driven by upstream stores:
//!
//! - `execution`: watches order books and emits a market execution order
//!   whenever the top-of-book spread is at or inside the crossing
//!   threshold, alternating sides between emissions.
//! - `streaming`: turns every internal price update into a two-sided
//!   streamed quote with an alternating size ladder.

pub mod execution;
pub mod streaming;

pub use execution::{AlgoExecutionService, ExecutionConfig};
pub use streaming::{AlgoStreamingService, StreamConfig};
