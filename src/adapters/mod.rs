//! Infrastructure adapters. Implement outbound ports and drive the inbound one.
//!
//! AI, payment, notifications, documents, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod documents;
pub mod integrations;
pub mod payment;
pub mod ui;
