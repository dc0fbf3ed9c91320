//! Intake conversation. Produces `IntakeData` from the user's two answers.
//!
//! AI replies are a nicety: every AI failure degrades to canned text, and a failed
//! classification leaves categories to the keyword matcher.

use crate::domain::{DomainError, IntakeData};
use crate::ports::AiPort;
use std::sync::Arc;
use tracing::{info, warn};

pub const FEELINGS_QUESTION: &str =
    "In your own words, what has been weighing on your heart lately?";
pub const HOBBY_QUESTION: &str =
    "To match you with friends, not just patients... what is one activity that brings you peace?";
pub const HOBBY_HINT: &str = "(e.g., Gaming, Art, Nature, Reading)";
pub const CLOSING: &str =
    "I have found a circle that resonates with your journey. Are you ready to meet them?";
const FEELINGS_FALLBACK: &str = "I hear you. Thank you for trusting me with this vulnerability.";

pub fn greeting(name: &str) -> String {
    format!("Welcome, {}. I am Mentra. This is a safe space.", name)
}

pub struct IntakeService {
    ai: Arc<dyn AiPort>,
}

impl IntakeService {
    pub fn new(ai: Arc<dyn AiPort>) -> Self {
        Self { ai }
    }

    /// Empathetic reply to the feelings answer.
    pub async fn reflect_feelings(&self, feelings: &str) -> String {
        let reply = self.ai.reflect_feelings(feelings).await;
        Self::or_fallback(reply, FEELINGS_FALLBACK.to_string())
    }

    /// Appreciative reply to the hobby answer.
    pub async fn reflect_hobby(&self, hobby: &str) -> String {
        let reply = self.ai.reflect_hobby(hobby).await;
        Self::or_fallback(
            reply,
            format!("Ah, {} is a beautiful way to find grounding.", hobby.trim()),
        )
    }

    /// Classify the feelings and assemble the intake record.
    pub async fn complete(&self, feelings: &str, hobby: &str) -> IntakeData {
        let labels: Vec<String> = match self.ai.classify_feelings(feelings).await {
            Ok(categories) => categories.iter().map(|c| c.label().to_string()).collect(),
            Err(e) => {
                warn!(error = %e, "AI classification failed, falling back to keywords");
                Vec::new()
            }
        };
        info!(ai_categories = ?labels, "intake complete");
        IntakeData::new(feelings.trim(), hobby.trim()).with_ai_categories(labels)
    }

    fn or_fallback(reply: Result<String, DomainError>, fallback: String) -> String {
        match reply {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => fallback,
            Err(e) => {
                warn!(error = %e, "AI reply failed, using fallback");
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiAdapter;
    use crate::domain::{Category, CategorySource, MatchResult, UserProfile, WelcomeLetter};

    /// AI that fails every call.
    struct DownAi;

    #[async_trait::async_trait]
    impl AiPort for DownAi {
        async fn reflect_feelings(&self, _: &str) -> Result<String, DomainError> {
            Err(DomainError::Ai("offline".into()))
        }
        async fn reflect_hobby(&self, _: &str) -> Result<String, DomainError> {
            Ok("   ".into())
        }
        async fn classify_feelings(&self, _: &str) -> Result<Vec<Category>, DomainError> {
            Err(DomainError::Ai("offline".into()))
        }
        async fn compose_welcome(
            &self,
            _: &UserProfile,
            _: &MatchResult,
        ) -> Result<WelcomeLetter, DomainError> {
            Err(DomainError::Ai("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_fallbacks_when_ai_is_down() {
        let service = IntakeService::new(Arc::new(DownAi));
        assert_eq!(service.reflect_feelings("sad").await, FEELINGS_FALLBACK);
        assert_eq!(
            service.reflect_hobby(" chess ").await,
            "Ah, chess is a beautiful way to find grounding."
        );

        let intake = service.complete("my boss", "chess").await;
        assert_eq!(
            intake.category_source(),
            CategorySource::Inferred("my boss".into())
        );
    }

    #[tokio::test]
    async fn test_classification_overrides_keywords() {
        let service = IntakeService::new(Arc::new(MockAiAdapter::with_delay(1)));
        let intake = service.complete("pregnant and my partner left", "books").await;
        assert_eq!(
            intake.ai_categories,
            Some(vec![
                "Postpartum Depression".to_string(),
                "Relationship Issues".to_string()
            ])
        );
        assert!(matches!(intake.category_source(), CategorySource::Provided(_)));
    }

    #[test]
    fn test_greeting() {
        assert_eq!(
            greeting("Lina"),
            "Welcome, Lina. I am Mentra. This is a safe space."
        );
    }
}
