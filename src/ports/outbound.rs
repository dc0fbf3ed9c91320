//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    CardDetails, Category, DomainError, MatchResult, Receipt, SessionBrief, UserProfile,
    WelcomeLetter,
};
use std::path::PathBuf;

/// Language model used during intake and for the welcome letter.
#[async_trait::async_trait]
pub trait AiPort: Send + Sync {
    /// Short empathetic reply to what the user shared about their feelings.
    async fn reflect_feelings(&self, feelings: &str) -> Result<String, DomainError>;

    /// Short appreciative reply to the activity that brings the user peace.
    async fn reflect_hobby(&self, hobby: &str) -> Result<String, DomainError>;

    /// Classify feelings into taxonomy categories (at most two, most relevant first).
    async fn classify_feelings(&self, feelings: &str) -> Result<Vec<Category>, DomainError>;

    /// Write a welcome letter for a user who has just joined their circle.
    async fn compose_welcome(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
    ) -> Result<WelcomeLetter, DomainError>;
}

/// Payment processor. The shipped adapter only simulates a charge.
#[async_trait::async_trait]
pub trait PaymentPort: Send + Sync {
    async fn charge(
        &self,
        profile: &UserProfile,
        card: &CardDetails,
        amount_cents: u64,
    ) -> Result<Receipt, DomainError>;
}

/// Delivers the welcome letter (e-mail relay, log, ...).
#[async_trait::async_trait]
pub trait NotifierPort: Send + Sync {
    async fn send_welcome(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
        letter: &WelcomeLetter,
    ) -> Result<(), DomainError>;
}

/// Renders and stores a session brief. Returns the written file.
#[async_trait::async_trait]
pub trait BriefWriterPort: Send + Sync {
    async fn write_brief(&self, brief: &SessionBrief) -> Result<PathBuf, DomainError>;
}
