//! Inquiry state machine

use bus::KeyedStore;
use rust_decimal::Decimal;
use tracing::{debug, info};
use types::errors::DeskError;
use types::inquiry::{Inquiry, InquiryState};

/// Configuration for the inquiry service
#[derive(Debug, Clone)]
pub struct InquiryConfig {
    /// Price quoted back on newly received inquiries
    pub quote_price: Decimal,
}

impl Default for InquiryConfig {
    fn default() -> Self {
        Self {
            // Par
            quote_price: Decimal::from(100),
        }
    }
}

/// Keyed store of inquiries, keyed by inquiry identifier
pub struct InquiryService {
    store: KeyedStore<Inquiry>,
    config: InquiryConfig,
}

impl InquiryService {
    pub fn new(config: InquiryConfig) -> Self {
        info!(quote_price = %config.quote_price, "InquiryService initialized");
        Self {
            store: KeyedStore::new("inquiry"),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(InquiryConfig::default())
    }

    /// Latest state of an inquiry
    pub fn get(&self, inquiry_id: &str) -> Inquiry {
        self.store.get(inquiry_id)
    }

    /// Register an observer of completed (and re-quoted) inquiries
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Inquiry) -> Result<(), DeskError> + 'static,
    {
        self.store.subscribe(listener);
    }

    /// Drive an incoming inquiry through the state machine
    ///
    /// RECEIVED inquiries are quoted at the configured par price, echoed
    /// back as QUOTED through the same entry point, and land here again to
    /// be marked DONE; observers are notified once, at completion. Other
    /// states are stored without notification.
    pub fn on_message(&mut self, mut inquiry: Inquiry) -> Result<(), DeskError> {
        match inquiry.state {
            InquiryState::Received => {
                inquiry.price = self.config.quote_price;
                inquiry.state = InquiryState::Quoted;
                debug!(
                    inquiry_id = %inquiry.inquiry_id,
                    price = %inquiry.price,
                    "inquiry quoted"
                );
                self.on_message(inquiry)
            }
            InquiryState::Quoted => {
                inquiry.state = InquiryState::Done;
                debug!(inquiry_id = %inquiry.inquiry_id, "inquiry completed");
                self.store.publish(inquiry.inquiry_id.clone(), inquiry)
            }
            _ => {
                self.store.set(inquiry.inquiry_id.clone(), inquiry);
                Ok(())
            }
        }
    }

    /// Re-quote an existing inquiry at an explicit price and notify
    pub fn send_quote(&mut self, inquiry_id: &str, price: Decimal) -> Result<(), DeskError> {
        let mut inquiry = self.existing(inquiry_id)?;
        inquiry.price = price;
        self.store.publish(inquiry_id.to_string(), inquiry)
    }

    /// Reject an existing inquiry; stored, not notified
    pub fn reject_inquiry(&mut self, inquiry_id: &str) -> Result<(), DeskError> {
        let mut inquiry = self.existing(inquiry_id)?;
        inquiry.state = InquiryState::Rejected;
        self.store.set(inquiry_id.to_string(), inquiry);
        Ok(())
    }

    fn existing(&self, inquiry_id: &str) -> Result<Inquiry, DeskError> {
        let inquiry = self.store.get(inquiry_id);
        if inquiry.inquiry_id.is_empty() {
            return Err(DeskError::UnknownInquiry {
                id: inquiry_id.to_string(),
            });
        }
        Ok(inquiry)
    }
}

impl Default for InquiryService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use types::product::{Bond, Product};
    use types::trade::TradeSide;

    fn bond(id: &str) -> Product {
        Product::Bond(Bond {
            product_id: id.to_string(),
            ..Default::default()
        })
    }

    fn received(id: &str) -> Inquiry {
        Inquiry::new(
            id,
            bond("X"),
            TradeSide::BUY,
            1_000_000,
            Decimal::ZERO,
            InquiryState::Received,
        )
    }

    #[test]
    fn test_received_completes_at_par() {
        let mut service = InquiryService::with_defaults();
        service.on_message(received("Q1")).unwrap();

        let stored = service.get("Q1");
        assert_eq!(stored.state, InquiryState::Done);
        assert_eq!(stored.price, Decimal::from(100));
    }

    #[test]
    fn test_completion_notifies_once() {
        let mut service = InquiryService::with_defaults();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handle = Rc::clone(&seen);
        service.subscribe(move |inquiry| {
            handle.borrow_mut().push(inquiry.state);
            Ok(())
        });

        service.on_message(received("Q1")).unwrap();
        assert_eq!(*seen.borrow(), vec![InquiryState::Done]);
    }

    #[test]
    fn test_send_quote_updates_price() {
        let mut service = InquiryService::with_defaults();
        service.on_message(received("Q1")).unwrap();
        service.send_quote("Q1", Decimal::from(99)).unwrap();
        assert_eq!(service.get("Q1").price, Decimal::from(99));
    }

    #[test]
    fn test_reject_marks_rejected() {
        let mut service = InquiryService::with_defaults();
        service.on_message(received("Q1")).unwrap();
        service.reject_inquiry("Q1").unwrap();
        assert_eq!(service.get("Q1").state, InquiryState::Rejected);
    }

    #[test]
    fn test_unknown_inquiry_fails_closed() {
        let mut service = InquiryService::with_defaults();
        assert!(matches!(
            service.send_quote("NOPE", Decimal::from(99)),
            Err(DeskError::UnknownInquiry { .. })
        ));
        assert!(matches!(
            service.reject_inquiry("NOPE"),
            Err(DeskError::UnknownInquiry { .. })
        ));
    }

    #[test]
    fn test_terminal_states_stored_without_notification() {
        let mut service = InquiryService::with_defaults();
        let count = Rc::new(RefCell::new(0u32));
        let handle = Rc::clone(&count);
        service.subscribe(move |_| {
            *handle.borrow_mut() += 1;
            Ok(())
        });

        let mut inquiry = received("Q2");
        inquiry.state = InquiryState::CustomerRejected;
        service.on_message(inquiry).unwrap();

        assert_eq!(*count.borrow(), 0);
        assert_eq!(service.get("Q2").state, InquiryState::CustomerRejected);
    }
}
