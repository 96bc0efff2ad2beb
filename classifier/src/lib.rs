//! Gateway to the external AI phishing-scoring service.
//!
//! The service is an opaque classifier behind one request/response call.
//! Callers always get a well-formed [`PhishingAnalysis`] back: transport
//! and protocol failures are absorbed into a conservative high-severity
//! fallback instead of propagating.

mod client;

pub use client::{ClassifierClient, PhishingAnalysis, DEFAULT_CLASSIFIER_URL};
