//! Application use cases. Orchestrate domain logic via ports.

pub mod checkout_service;
pub mod intake_service;
pub mod match_service;

pub use checkout_service::{CheckoutOutcome, CheckoutService};
pub use intake_service::IntakeService;
pub use match_service::MatchService;
