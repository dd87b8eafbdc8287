//! Market depth CSV ingress adapter
//!
//! Strict positional format, one order per line:
//!
//! ```text
//! productId,price,quantity,side{BID|OFFER}
//! ```
//!
//! Lines arrive batched: `2 x depth` consecutive lines describe one full
//! book for one product, and each completed batch is published as a single
//! wholesale book replacement. A malformed line, a product change inside a
//! batch, an unknown product or a truncated final batch fails the whole
//! feed.

use crate::service::MarketDataService;
use std::io::BufRead;
use tracing::{info, warn};
use types::errors::DeskError;
use types::order::{Order, OrderBook, PricingSide};
use types::price::parse_price;
use types::refdata::ReferenceData;

/// Feed depth records from `reader` into the service.
///
/// Returns the number of books published.
pub fn ingest_market_data<R: BufRead>(
    reader: R,
    refdata: &ReferenceData,
    service: &mut MarketDataService,
) -> Result<u64, DeskError> {
    let batch_size = service.config().depth * 2;
    let mut published = 0u64;

    let mut batch_product: Option<String> = None;
    let mut bid_stack: Vec<Order> = Vec::new();
    let mut offer_stack: Vec<Order> = Vec::new();
    let mut batch_lines = 0usize;
    let mut line_number = 0u64;

    for (index, line) in reader.lines().enumerate() {
        line_number = index as u64 + 1;
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            warn!(line = line_number, "malformed depth record");
            return Err(DeskError::MalformedRecord {
                line: line_number,
                reason: format!("expected 4 fields, got {}", fields.len()),
            });
        }

        let product_id = fields[0];
        match &batch_product {
            None => batch_product = Some(product_id.to_string()),
            Some(current) if current != product_id => {
                return Err(DeskError::MalformedRecord {
                    line: line_number,
                    reason: format!(
                        "product changed mid-batch: {} then {}",
                        current, product_id
                    ),
                });
            }
            Some(_) => {}
        }

        let price = parse_price(fields[1]).map_err(|err| DeskError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;
        let quantity: u64 = fields[2].parse().map_err(|_| DeskError::MalformedRecord {
            line: line_number,
            reason: format!("bad quantity: {}", fields[2]),
        })?;
        let side = PricingSide::from_label(fields[3]).map_err(|err| DeskError::MalformedRecord {
            line: line_number,
            reason: err.to_string(),
        })?;

        match side {
            PricingSide::BID => bid_stack.push(Order::new(price, quantity, side)),
            PricingSide::OFFER => offer_stack.push(Order::new(price, quantity, side)),
        }
        batch_lines += 1;

        if batch_lines == batch_size {
            let id = batch_product.take().unwrap_or_default();
            let product = refdata.product(&id)?;
            service.on_message(OrderBook::new(
                product,
                std::mem::take(&mut bid_stack),
                std::mem::take(&mut offer_stack),
            ))?;
            published += 1;
            batch_lines = 0;
        }
    }

    if batch_lines != 0 {
        return Err(DeskError::MalformedRecord {
            line: line_number,
            reason: format!(
                "truncated depth batch: {} of {} lines",
                batch_lines, batch_size
            ),
        });
    }

    info!(books = published, "market data feed complete");
    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::BookConfig;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    fn service(depth: usize) -> MarketDataService {
        MarketDataService::new(BookConfig { depth })
    }

    fn two_level_batch(product_id: &str) -> String {
        format!(
            "{p},99-310,10000000,BID\n{p},100-010,10000000,OFFER\n\
             {p},99-300,20000000,BID\n{p},100-020,20000000,OFFER\n",
            p = product_id
        )
    }

    #[test]
    fn test_batch_publishes_one_book() {
        let mut service = service(2);
        let published = ingest_market_data(
            Cursor::new(two_level_batch("91282CLY5")),
            &ReferenceData::us_treasuries(),
            &mut service,
        )
        .unwrap();
        assert_eq!(published, 1);

        let book = service.get("91282CLY5");
        assert_eq!(book.bid_stack.len(), 2);
        assert_eq!(book.offer_stack.len(), 2);

        let top = book.best_bid_offer();
        assert_eq!(top.bid.price, parse_price("99-310").unwrap());
        assert_eq!(top.offer.price, parse_price("100-010").unwrap());
        assert_eq!(top.spread(), Decimal::from(16) / Decimal::from(256));
    }

    #[test]
    fn test_consecutive_batches_replace() {
        let mut service = service(2);
        let feed = format!("{}{}", two_level_batch("91282CLY5"), two_level_batch("91282CMB4"));
        let published = ingest_market_data(
            Cursor::new(feed),
            &ReferenceData::us_treasuries(),
            &mut service,
        )
        .unwrap();
        assert_eq!(published, 2);
        assert_eq!(service.get("91282CLY5").bid_stack.len(), 2);
        assert_eq!(service.get("91282CMB4").bid_stack.len(), 2);
    }

    #[test]
    fn test_truncated_batch_fails() {
        let mut service = service(2);
        let feed = "91282CLY5,99-310,10000000,BID\n";
        let result = ingest_market_data(
            Cursor::new(feed),
            &ReferenceData::us_treasuries(),
            &mut service,
        );
        assert!(matches!(result, Err(DeskError::MalformedRecord { .. })));
    }

    #[test]
    fn test_product_change_mid_batch_fails() {
        let mut service = service(2);
        let feed = "91282CLY5,99-310,10000000,BID\n91282CMB4,100-010,10000000,OFFER\n";
        let result = ingest_market_data(
            Cursor::new(feed),
            &ReferenceData::us_treasuries(),
            &mut service,
        );
        assert!(matches!(
            result,
            Err(DeskError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_bad_side_fails() {
        let mut service = service(1);
        let feed = "91282CLY5,99-310,10000000,ASK\n91282CLY5,100-010,10000000,OFFER\n";
        let result = ingest_market_data(
            Cursor::new(feed),
            &ReferenceData::us_treasuries(),
            &mut service,
        );
        assert!(matches!(
            result,
            Err(DeskError::MalformedRecord { line: 1, .. })
        ));
    }
}
