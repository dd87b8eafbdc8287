//! Deterministic synthetic feed generation
//!
//! No randomness anywhere: prices walk 99 to 101 and back in 1/256 steps,
//! spreads, quantities and books rotate through fixed cycles, and record
//! identifiers are sequential. Two runs with the same configuration
//! produce byte-identical feeds.

use rust_decimal::Decimal;
use std::io::Write;
use types::errors::DeskError;
use types::price::{format_price, tick};

/// On-the-run Treasury CUSIPs in tenor order, 2Y out to 30Y
pub const TENOR_CUSIPS: [&str; 7] = [
    "91282CLY5",
    "91282CMB4",
    "91282CMA6",
    "91282CLZ2",
    "91282CLW9",
    "912810UF3",
    "912810UE6",
];

/// Configuration for the feed generator
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub cusips: Vec<String>,
    /// Price and book updates generated per security
    pub updates_per_security: u32,
    pub trades_per_security: u32,
    pub inquiries_per_security: u32,
    /// Price levels per side in each generated book
    pub book_depth: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cusips: TENOR_CUSIPS.iter().map(|s| s.to_string()).collect(),
            updates_per_security: 1_000,
            trades_per_security: 10,
            inquiries_per_security: 10,
            book_depth: 5,
        }
    }
}

/// Bounded mid-price walk: up one tick at a time to the top, then back down
struct MidWalk {
    mid: Decimal,
    ascending: bool,
    bottom: Decimal,
    top: Decimal,
}

impl MidWalk {
    fn new() -> Self {
        Self {
            mid: Decimal::from(99),
            ascending: true,
            bottom: Decimal::from(99),
            top: Decimal::from(101),
        }
    }

    fn step(&mut self) {
        if self.ascending {
            if self.mid + tick() > self.top {
                self.ascending = false;
                self.mid = self.top;
            } else {
                self.mid += tick();
            }
        } else if self.mid - tick() < self.bottom {
            self.ascending = true;
            self.mid = self.bottom;
        } else {
            self.mid -= tick();
        }
    }
}

/// Writes the four synthetic CSV feeds
pub struct DataSimulator {
    config: SimulationConfig,
}

impl DataSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(SimulationConfig::default())
    }

    /// Price feed: `productId,bid,offer`
    ///
    /// The spread alternates 1/128 and 1/64 away from the walk's
    /// boundaries and widens to 1/64 at them; bid and offer are clamped to
    /// the walk's range.
    pub fn generate_prices<W: Write>(&self, out: &mut W) -> Result<u64, DeskError> {
        let narrow = Decimal::from(2) * tick(); // 1/128
        let wide = Decimal::from(4) * tick(); // 1/64
        let mut records = 0u64;

        for cusip in &self.config.cusips {
            let mut walk = MidWalk::new();
            let mut alternate = true;

            for _ in 0..self.config.updates_per_security {
                let at_boundary = walk.mid == walk.bottom || walk.mid == walk.top;
                let spread = if at_boundary {
                    wide
                } else if alternate {
                    narrow
                } else {
                    wide
                };
                alternate = !alternate;

                let bid = (walk.mid - spread).max(walk.bottom);
                let offer = (walk.mid + spread).min(walk.top);
                writeln!(out, "{},{},{}", cusip, format_price(bid), format_price(offer))?;
                records += 1;

                walk.step();
            }
        }
        Ok(records)
    }

    /// Depth feed: `productId,price,quantity,side`, one book per update
    ///
    /// Each book is `2 x depth` lines, bid and offer interleaved per
    /// level. The top-of-book spread cycles 1/128, 1/64, 3/128, 1/32 and
    /// each deeper level sits a further 1/128 out with quantity
    /// `(level + 1) x 10M`.
    pub fn generate_market_data<W: Write>(&self, out: &mut W) -> Result<u64, DeskError> {
        let spread_cycle = [
            Decimal::from(2) * tick(),
            Decimal::from(4) * tick(),
            Decimal::from(6) * tick(),
            Decimal::from(8) * tick(),
        ];
        let level_step = Decimal::from(2) * tick();
        let mut cycle_index = 0usize;
        let mut lines = 0u64;

        for cusip in &self.config.cusips {
            let mut walk = MidWalk::new();

            for _ in 0..self.config.updates_per_security {
                let top_spread = spread_cycle[cycle_index];
                cycle_index = (cycle_index + 1) % spread_cycle.len();

                for level in 0..self.config.book_depth {
                    let offset = top_spread + Decimal::from(level as u32) * level_step;
                    let quantity = (level as u64 + 1) * 10_000_000;

                    writeln!(
                        out,
                        "{},{},{},BID",
                        cusip,
                        format_price(walk.mid - offset),
                        quantity
                    )?;
                    writeln!(
                        out,
                        "{},{},{},OFFER",
                        cusip,
                        format_price(walk.mid + offset),
                        quantity
                    )?;
                    lines += 2;
                }

                walk.step();
            }
        }
        Ok(lines)
    }

    /// Trade feed: `productId,tradeId,price,book,quantity,side`
    ///
    /// Sides alternate starting with BUY, buys print at 99 and sells at
    /// 100, books rotate TRSY1/2/3 and quantities cycle 1M through 5M.
    pub fn generate_trades<W: Write>(&self, out: &mut W) -> Result<u64, DeskError> {
        let books = ["TRSY1", "TRSY2", "TRSY3"];
        let quantities = [1_000_000u64, 2_000_000, 3_000_000, 4_000_000, 5_000_000];
        let mut quantity_index = 0usize;
        let mut sequence = 0u64;

        for cusip in &self.config.cusips {
            for trade_num in 0..self.config.trades_per_security {
                sequence += 1;
                let side = if trade_num % 2 == 0 { "BUY" } else { "SELL" };
                let price = if side == "BUY" {
                    Decimal::from(99)
                } else {
                    Decimal::from(100)
                };
                let quantity = quantities[quantity_index];
                quantity_index = (quantity_index + 1) % quantities.len();

                writeln!(
                    out,
                    "{},TRADE-{:06},{},{},{},{}",
                    cusip,
                    sequence,
                    format_price(price),
                    books[trade_num as usize % books.len()],
                    quantity,
                    side
                )?;
            }
        }
        Ok(sequence)
    }

    /// Inquiry feed: `inquiryId,productId,side,quantity,state`
    pub fn generate_inquiries<W: Write>(&self, out: &mut W) -> Result<u64, DeskError> {
        let mut sequence = 0u64;

        for cusip in &self.config.cusips {
            for inquiry_num in 0..self.config.inquiries_per_security {
                sequence += 1;
                let side = if inquiry_num % 2 == 0 { "SELL" } else { "BUY" };
                let quantity = (inquiry_num as u64 % 5 + 1) * 1_000_000;

                writeln!(
                    out,
                    "INQ-{:06},{},{},{},RECEIVED",
                    sequence, cusip, side, quantity
                )?;
            }
        }
        Ok(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            cusips: vec!["91282CLY5".to_string()],
            updates_per_security: 4,
            trades_per_security: 4,
            inquiries_per_security: 3,
            book_depth: 2,
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let simulator = DataSimulator::new(small_config());
        let mut first = Vec::new();
        let mut second = Vec::new();
        simulator.generate_prices(&mut first).unwrap();
        simulator.generate_prices(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_price_feed_shape() {
        let simulator = DataSimulator::new(small_config());
        let mut out = Vec::new();
        let records = simulator.generate_prices(&mut out).unwrap();
        assert_eq!(records, 4);

        let text = String::from_utf8(out).unwrap();
        for line in text.lines() {
            assert_eq!(line.split(',').count(), 3);
            assert!(line.starts_with("91282CLY5,"));
        }
        // First record: mid 99 at the boundary, so bid clamps to 99.
        assert_eq!(text.lines().next().unwrap(), "91282CLY5,99-000,99-00+");
    }

    #[test]
    fn test_market_data_batches_are_complete() {
        let simulator = DataSimulator::new(small_config());
        let mut out = Vec::new();
        let lines = simulator.generate_market_data(&mut out).unwrap();
        // 4 updates x 2 levels x 2 sides
        assert_eq!(lines, 16);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 16);
    }

    #[test]
    fn test_trade_sides_and_books_rotate() {
        let simulator = DataSimulator::new(small_config());
        let mut out = Vec::new();
        simulator.generate_trades(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let records: Vec<Vec<&str>> = text.lines().map(|l| l.split(',').collect()).collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0][5], "BUY");
        assert_eq!(records[1][5], "SELL");
        assert_eq!(records[0][3], "TRSY1");
        assert_eq!(records[1][3], "TRSY2");
        assert_eq!(records[2][3], "TRSY3");
        assert_eq!(records[3][3], "TRSY1");
        // Buys print at 99, sells at 100.
        assert_eq!(records[0][2], "99-000");
        assert_eq!(records[1][2], "100-000");
    }

    #[test]
    fn test_inquiries_all_received() {
        let simulator = DataSimulator::new(small_config());
        let mut out = Vec::new();
        let records = simulator.generate_inquiries(&mut out).unwrap();
        assert_eq!(records, 3);

        let text = String::from_utf8(out).unwrap();
        for line in text.lines() {
            assert!(line.ends_with(",RECEIVED"));
        }
    }
}
