//! Inquiry CSV ingress adapter
//!
//! Strict positional format, one inquiry per line:
//!
//! ```text
//! inquiryId,productId,side{BUY|SELL},quantity,state{RECEIVED|QUOTED|DONE|REJECTED|CUSTOMER_REJECTED}
//! ```
//!
//! Incoming inquiries carry no price; the state machine fills it in.

use crate::service::InquiryService;
use rust_decimal::Decimal;
use std::io::BufRead;
use tracing::{info, warn};
use types::errors::DeskError;
use types::inquiry::{Inquiry, InquiryState};
use types::refdata::ReferenceData;
use types::trade::TradeSide;

/// Feed inquiry records from `reader` into the service.
///
/// Returns the number of inquiries processed. A malformed line or an
/// unknown product fails the whole feed.
pub fn ingest_inquiries<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    service: &mut InquiryService,
) -> Result<u64, DeskError> {
    let mut processed = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index as u64 + 1;
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 5 {
            warn!(line = line_number, "malformed inquiry record");
            return Err(DeskError::MalformedRecord {
                line: line_number,
                reason: format!("expected 5 fields, got {}", fields.len()),
            });
        }

        let product = refdata.product(fields[1])?;
        let side = TradeSide::from_label(fields[2]).map_err(|err| DeskError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;
        let quantity: u64 = fields[3].parse().map_err(|_| DeskError::MalformedRecord {
            line: line_number,
            reason: format!("bad quantity: {}", fields[3]),
        })?;
        let state = InquiryState::from_label(fields[4]).map_err(|err| DeskError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;

        service.on_message(Inquiry::new(
            fields[0],
            product,
            side,
            quantity,
            Decimal::ZERO,
            state,
        ))?;
        processed += 1;
    }

    info!(inquiries = processed, "inquiry feed complete");
    Ok(processed)
}
