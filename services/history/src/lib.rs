//! History sinks
//!
//! Terminal observers of the pipeline: the generic historical sink appends
//! every update of one stream to a timestamped CSV file, and the GUI sink
//! writes throttled price rows for the desk display.

pub mod gui;
pub mod sink;

pub use gui::{GuiConfig, GuiService};
pub use sink::HistoricalDataService;
