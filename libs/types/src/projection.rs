//! Ordered field rendering for downstream sinks
//!
//! Every value that flows to a persistence or GUI sink renders itself as a
//! stable ordered list of strings: product identifier first, then the
//! type-specific fields. Prices render in the fractional 32nds form.

use crate::execution::ExecutionOrder;
use crate::inquiry::Inquiry;
use crate::position::Position;
use crate::price::{format_price, Price};
use crate::quote::PriceStream;
use crate::risk::Pv01;
use crate::trade::Trade;

/// Stable ordered field rendering
pub trait Projection {
    fn project(&self) -> Vec<String>;
}

impl Projection for Price {
    fn project(&self) -> Vec<String> {
        vec![
            self.product.product_id().to_string(),
            format_price(self.mid),
            format_price(self.spread),
        ]
    }
}

impl Projection for PriceStream {
    fn project(&self) -> Vec<String> {
        vec![
            self.product.product_id().to_string(),
            format_price(self.bid_order.price),
            self.bid_order.visible_quantity.to_string(),
            self.bid_order.hidden_quantity.to_string(),
            self.bid_order.side.as_label().to_string(),
            format_price(self.offer_order.price),
            self.offer_order.visible_quantity.to_string(),
            self.offer_order.hidden_quantity.to_string(),
            self.offer_order.side.as_label().to_string(),
        ]
    }
}

impl Projection for ExecutionOrder {
    fn project(&self) -> Vec<String> {
        vec![
            self.product.product_id().to_string(),
            self.side.as_label().to_string(),
            self.order_id.to_string(),
            self.kind.as_label().to_string(),
            format_price(self.price),
            self.visible_quantity.to_string(),
            self.hidden_quantity.to_string(),
            self.parent_order_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            if self.is_child_order { "YES" } else { "NO" }.to_string(),
        ]
    }
}

impl Projection for Trade {
    fn project(&self) -> Vec<String> {
        vec![
            self.product.product_id().to_string(),
            self.trade_id.clone(),
            format_price(self.price),
            self.book.clone(),
            self.quantity.to_string(),
            self.side.as_label().to_string(),
        ]
    }
}

impl Projection for Position {
    fn project(&self) -> Vec<String> {
        let mut fields = vec![self.product.product_id().to_string()];
        for (book, quantity) in self.books() {
            fields.push(book.clone());
            fields.push(quantity.to_string());
        }
        fields.push(self.aggregate().to_string());
        fields
    }
}

impl Projection for Pv01 {
    fn project(&self) -> Vec<String> {
        vec![
            self.product.product_id().to_string(),
            self.pv01.to_string(),
            self.quantity.to_string(),
        ]
    }
}

impl Projection for Inquiry {
    fn project(&self) -> Vec<String> {
        vec![
            self.product.product_id().to_string(),
            self.inquiry_id.clone(),
            self.side.as_label().to_string(),
            self.quantity.to_string(),
            format_price(self.price),
            self.state.as_label().to_string(),
        ]
    }
}
