//! E-mail relay adapter. Implements NotifierPort by POSTing the letter as JSON.
//!
//! Works with any relay (EmailJS-style template endpoints, internal mailers) that accepts
//! `to_name`, `to_email`, `subject`, `message`, `group_name`.

use crate::domain::{DomainError, MatchResult, UserProfile, WelcomeLetter};
use crate::ports::NotifierPort;
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

pub struct EmailWebhookNotifier {
    client: Arc<Client>,
    url: String,
}

impl EmailWebhookNotifier {
    /// Create a notifier posting to `url`.
    pub fn new(url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            url,
        }
    }

    fn payload(
        profile: &UserProfile,
        matched: &MatchResult,
        letter: &WelcomeLetter,
    ) -> serde_json::Value {
        serde_json::json!({
            "to_name": profile.name,
            "to_email": profile.email,
            "subject": letter.subject,
            "message": letter.body,
            "group_name": matched.group_name,
        })
    }
}

#[async_trait::async_trait]
impl NotifierPort for EmailWebhookNotifier {
    async fn send_welcome(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
        letter: &WelcomeLetter,
    ) -> Result<(), DomainError> {
        let res = self
            .client
            .post(&self.url)
            .json(&Self::payload(profile, matched, letter))
            .send()
            .await
            .map_err(|e| DomainError::Notify(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Notify(format!(
                "relay error {}: {}",
                status, text
            )));
        }

        info!(to = %profile.email, "welcome e-mail handed to relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IntakeData, Location, Matcher};

    #[test]
    fn test_payload_fields() {
        let profile = UserProfile::new("Ana", "ana@example.com", Location::Dubai).unwrap();
        let matched = Matcher::default().find_matches(&IntakeData::new("", ""));
        let letter = WelcomeLetter {
            subject: "Welcome home".into(),
            body: "We are glad you are here.".into(),
        };
        let payload = EmailWebhookNotifier::payload(&profile, &matched, &letter);
        assert_eq!(payload["to_email"], "ana@example.com");
        assert_eq!(payload["message"], "We are glad you are here.");
        assert_eq!(payload["group_name"], matched.group_name.as_str());
    }
}
