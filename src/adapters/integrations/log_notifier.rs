//! Log-only notifier. Used when no e-mail relay is configured.

use crate::domain::{DomainError, MatchResult, UserProfile, WelcomeLetter};
use crate::ports::NotifierPort;
use tracing::info;

/// "Sends" the welcome letter by logging it.
#[derive(Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NotifierPort for LogNotifier {
    async fn send_welcome(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
        letter: &WelcomeLetter,
    ) -> Result<(), DomainError> {
        info!(
            to = %profile.email,
            group = %matched.group_name,
            subject = %letter.subject,
            body = %letter.body,
            "[SIMULATED] welcome e-mail"
        );
        Ok(())
    }
}
