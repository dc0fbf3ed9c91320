//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the onboarding flow.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the wizard: landing, intake, matching, dashboard, checkout.
    async fn run(&self) -> Result<(), DomainError>;
}
