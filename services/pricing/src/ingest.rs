//! Price CSV ingress adapter
//!
//! Strict positional format, one record per line:
//!
//! ```text
//! productId,bid,offer
//! ```
//!
//! Bid and offer are fractional 32nds strings; the stored price carries
//! mid = (bid + offer) / 2 and spread = offer - bid. A malformed line or an
//! unknown product fails the whole feed; nothing is skipped silently.

use crate::service::PricingService;
use rust_decimal::Decimal;
use std::io::BufRead;
use tracing::{info, warn};
use types::errors::DeskError;
use types::price::{parse_price, Price};
use types::refdata::ReferenceData;

/// Feed price records from `reader` into the service.
///
/// Returns the number of records published. Empty lines are tolerated
/// (trailing newlines); anything else malformed aborts the feed with the
/// offending line number.
pub fn ingest_prices<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    service: &mut PricingService,
) -> Result<u64, DeskError> {
    let mut published = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index as u64 + 1;
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            warn!(line = line_number, "malformed price record");
            return Err(DeskError::MalformedRecord {
                line: line_number,
                reason: format!("expected 3 fields, got {}", fields.len()),
            });
        }

        let product = refdata.product(fields[0])?;
        let bid = parse_field(fields[1], line_number)?;
        let offer = parse_field(fields[2], line_number)?;

        let mid = (bid + offer) / Decimal::from(2);
        let spread = offer - bid;
        service.on_message(Price::new(product, mid, spread))?;
        published += 1;
    }

    info!(records = published, "price feed complete");
    Ok(published)
}

fn parse_field(text: &str, line_number: u64) -> Result<Decimal, DeskError> {
    parse_price(text).map_err(|err| DeskError::MalformedRecord {
        line: line_number,
        reason: err.to_string(),
    })
}
