//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Matching itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("AI request failed: {0}")]
    Ai(String),

    #[error("Payment failed: {0}")]
    Payment(String),

    #[error("Notification failed: {0}")]
    Notify(String),

    #[error("Session brief error: {0}")]
    Brief(String),

    #[error("Prompt aborted: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
