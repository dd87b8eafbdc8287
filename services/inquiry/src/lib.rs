//! Inquiry service
//!
//! Runs the accept/quote/complete state machine over client inquiries:
//! newly received inquiries are quoted at par, echoed back as quoted and
//! completed, with observers notified of completions.

pub mod ingest;
pub mod service;

pub use ingest::ingest_inquiries;
pub use service::{InquiryConfig, InquiryService};
