//! Trade CSV ingress adapter
//!
//! Strict positional format, one trade per line:
//!
//! ```text
//! productId,tradeId,price,book,quantity,side{BUY|SELL}
//! ```

use crate::service::BookingService;
use std::io::BufRead;
use tracing::{info, warn};
use types::errors::DeskError;
use types::price::parse_price;
use types::refdata::ReferenceData;
use types::trade::{Trade, TradeSide};

/// Feed trade records from `reader` into the service.
///
/// Returns the number of trades booked. A malformed line or an unknown
/// product fails the whole feed.
pub fn ingest_trades<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    service: &mut BookingService,
) -> Result<u64, DeskError> {
    let mut booked = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index as u64 + 1;
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            warn!(line = line_number, "malformed trade record");
            return Err(DeskError::MalformedRecord {
                line: line_number,
                reason: format!("expected 6 fields, got {}", fields.len()),
            });
        }

        let product = refdata.product(fields[0])?;
        let price = parse_price(fields[2]).map_err(|err| DeskError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;
        let quantity: u64 = fields[4].parse().map_err(|_| DeskError::MalformedRecord {
            line: line_number,
            reason: format!("bad quantity: {}", fields[4]),
        })?;
        let side = TradeSide::from_label(fields[5]).map_err(|err| DeskError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;

        service.book_trade(Trade::new(product, fields[1], price, fields[3], quantity, side))?;
        booked += 1;
    }

    info!(trades = booked, "trade feed complete");
    Ok(booked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use types::trade::TradeSide;

    #[test]
    fn test_ingest_books_trades() {
        let feed = Cursor::new(
            "91282CLY5,T1,99-000,TRSY1,1000000,BUY\n\
             91282CLY5,T2,100-000,TRSY2,2000000,SELL\n",
        );
        let mut service = BookingService::with_defaults();
        let booked = ingest_trades(feed, &ReferenceData::us_treasuries(), &mut service).unwrap();
        assert_eq!(booked, 2);

        let t2 = service.get("T2");
        assert_eq!(t2.book, "TRSY2");
        assert_eq!(t2.side, TradeSide::SELL);
        assert_eq!(t2.quantity, 2_000_000);
    }

    #[test]
    fn test_bad_side_fails_feed() {
        let feed = Cursor::new("91282CLY5,T1,99-000,TRSY1,1000000,LONG\n");
        let mut service = BookingService::with_defaults();
        let result = ingest_trades(feed, &ReferenceData::us_treasuries(), &mut service);
        assert!(matches!(
            result,
            Err(DeskError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_product_aborts_feed() {
        let feed = Cursor::new("NOTACUSIP,T1,99-000,TRSY1,1000000,BUY\n");
        let mut service = BookingService::with_defaults();
        let result = ingest_trades(feed, &ReferenceData::us_treasuries(), &mut service);
        assert!(matches!(result, Err(DeskError::UnknownProduct { .. })));
    }
}
