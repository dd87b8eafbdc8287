//! Per-book position breakdowns

use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signed position in one product, broken down by desk book
///
/// The aggregate across books is always derived at query time; it is never
/// stored, so the per-book breakdown and the aggregate cannot drift apart.
/// A `BTreeMap` keeps book iteration order deterministic for projections
/// and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub product: Product,
    positions: BTreeMap<String, i64>,
}

impl Position {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            positions: BTreeMap::new(),
        }
    }

    /// Signed quantity held in one book; zero when the book has never traded
    pub fn position(&self, book: &str) -> i64 {
        self.positions.get(book).copied().unwrap_or(0)
    }

    /// All per-book quantities in book-name order
    pub fn books(&self) -> &BTreeMap<String, i64> {
        &self.positions
    }

    /// Add a signed quantity into one book
    pub fn add(&mut self, book: impl Into<String>, quantity: i64) {
        *self.positions.entry(book.into()).or_insert(0) += quantity;
    }

    /// Aggregate position: the sum across every book
    pub fn aggregate(&self) -> i64 {
        self.positions.values().sum()
    }
}
