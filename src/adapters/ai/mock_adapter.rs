//! Mock AI adapter for running without API calls.
//!
//! Classifies with the keyword matcher and returns canned replies.

use crate::domain::matching::infer_categories;
use crate::domain::{Category, DomainError, MatchResult, UserProfile, WelcomeLetter};
use crate::ports::AiPort;
use std::time::Duration;
use tracing::info;

/// Mock AI adapter.
///
/// Returns predetermined responses without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    async fn simulate_latency(&self) {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn reflect_feelings(&self, feelings: &str) -> Result<String, DomainError> {
        info!(len = feelings.len(), "[MOCK] reflecting feelings");
        self.simulate_latency().await;
        Ok("That sounds incredibly heavy to carry. Thank you for sharing it here; \
            what you feel makes sense, and you do not have to hold it alone."
            .to_string())
    }

    async fn reflect_hobby(&self, hobby: &str) -> Result<String, DomainError> {
        info!(hobby, "[MOCK] reflecting hobby");
        self.simulate_latency().await;
        Ok(format!(
            "Oh, that sounds lovely. There is real healing in {}; it gives the soul room to breathe.",
            hobby.trim()
        ))
    }

    async fn classify_feelings(&self, feelings: &str) -> Result<Vec<Category>, DomainError> {
        info!(len = feelings.len(), "[MOCK] classifying feelings");
        self.simulate_latency().await;
        Ok(infer_categories(feelings).into_iter().take(2).collect())
    }

    async fn compose_welcome(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
    ) -> Result<WelcomeLetter, DomainError> {
        info!(group = %matched.group_name, "[MOCK] composing welcome letter");
        self.simulate_latency().await;
        Ok(WelcomeLetter::fallback(profile, matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IntakeData, Location, Matcher};

    #[tokio::test]
    async fn test_mock_classifies_at_most_two() {
        let adapter = MockAiAdapter::with_delay(1);
        let cats = adapter
            .classify_feelings("my baby cries, my husband works late and I panic")
            .await
            .unwrap();
        assert_eq!(
            cats,
            vec![Category::PostpartumDepression, Category::RelationshipIssues]
        );
    }

    #[tokio::test]
    async fn test_mock_welcome_mentions_group() {
        let adapter = MockAiAdapter::with_delay(1);
        let profile = UserProfile::new("Ana", "ana@example.com", Location::Dubai).unwrap();
        let matched = Matcher::default().find_matches(&IntakeData::new("grief", "books"));
        let letter = adapter.compose_welcome(&profile, &matched).await.unwrap();
        assert!(letter.subject.contains(&matched.group_name));
        assert!(letter.body.starts_with("Dear Ana"));
    }
}
