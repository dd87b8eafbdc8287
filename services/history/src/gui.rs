//! Throttled GUI price sink

use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use types::errors::DeskError;
use types::price::Price;
use types::projection::Projection;

/// Configuration for the GUI sink
#[derive(Debug, Clone)]
pub struct GuiConfig {
    /// Minimum interval between emitted rows; intermediate updates drop
    pub throttle: Duration,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(300),
        }
    }
}

/// Writes timestamped price rows for the desk display
///
/// Updates arriving inside the throttle window are dropped, not queued;
/// the display only ever shows the freshest price that made it through.
pub struct GuiService {
    writer: BufWriter<File>,
    config: GuiConfig,
    last_emit: Option<Instant>,
    rows_written: u64,
}

impl GuiService {
    /// Create the sink, truncating any existing file at `path`
    pub fn create(path: impl AsRef<Path>, config: GuiConfig) -> Result<Self, DeskError> {
        let file = File::create(path.as_ref())?;
        info!(
            path = %path.as_ref().display(),
            throttle_ms = config.throttle.as_millis() as u64,
            "gui sink opened"
        );
        Ok(Self {
            writer: BufWriter::new(file),
            config,
            last_emit: None,
            rows_written: 0,
        })
    }

    pub fn with_defaults(path: impl AsRef<Path>) -> Result<Self, DeskError> {
        Self::create(path, GuiConfig::default())
    }

    /// Offer a price update to the sink
    pub fn on_price(&mut self, price: &Price) -> Result<(), DeskError> {
        self.on_price_at(price, Instant::now())
    }

    /// Throttle decision against an explicit clock reading
    pub fn on_price_at(&mut self, price: &Price, now: Instant) -> Result<(), DeskError> {
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < self.config.throttle {
                debug!(
                    product_id = price.product.product_id(),
                    "price update throttled"
                );
                return Ok(());
            }
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        writeln!(self.writer, "{},{}", timestamp, price.project().join(","))?;
        self.writer.flush()?;
        self.last_emit = Some(now);
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}
