//! OpenAI-compatible adapter for the intake companion.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `AiPort` with robust JSON parsing and markdown stripping.

use crate::domain::{Category, DomainError, MatchResult, UserProfile, WelcomeLetter};
use crate::ports::AiPort;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Warmer sampling for conversational replies; classification stays near-deterministic.
const REPLY_TEMPERATURE: f32 = 1.1;
const JSON_TEMPERATURE: f32 = 0.3;

/// OpenAI-compatible AI adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    fn persona() -> &'static str {
        "You are Mentra, a compassionate and human-like mental health companion. \
         Tone: warm, safe, serene, non-judgmental. Never say \"I understand\" or \"I am an AI\"."
    }

    fn feelings_prompt(feelings: &str) -> String {
        format!(
            r#"User input: "{}"

Task: Respond with genuine, varied empathy.
1. Detect the specific emotion (sadness, exhaustion, anger, fear, etc.).
2. Start with a natural acknowledgment suited to that emotion, e.g. "I hear how heavy that is", "That sounds incredibly draining".
3. Validate their experience deeply but briefly.
4. Keep it under 35 words."#,
            feelings
        )
    }

    fn hobby_prompt(hobby: &str) -> String {
        format!(
            r#"The user finds peace in: "{}".

Task: Validate this coping mechanism with a warm, poetic touch.
1. Start with an appreciative, varied filler, e.g. "Ah, what a beautiful escape", "Oh, that sounds lovely".
2. Connect this activity to inner peace or the soul.
3. Max 25 words."#,
            hobby
        )
    }

    fn classify_prompt(feelings: &str) -> String {
        let labels = Category::ALL
            .iter()
            .map(|c| format!("\"{}\"", c.label()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"Analyze the following user input about their mental state: "{}".

Task 1: Identify the most relevant categories from this specific list: [{}].
If it fits multiple, list up to 2. If it fits none clearly, use "Anxiety Management".

Task 2: Analyze the sentiment/tone (e.g., Overwhelmed, Sad, Hopeful, Angry).

Return ONLY a JSON object:
{{"categories": ["Category1", "Category2"], "sentiment": "One word sentiment"}}"#,
            feelings, labels
        )
    }

    fn welcome_prompt(profile: &UserProfile, matched: &MatchResult) -> String {
        format!(
            r#"Write a warm, deeply empathetic, and short welcome email for a user named "{}".
They are joining a support group called "{}".
They are dealing with: "{}".

The tone must be: Peaceful, Trustworthy, Serene.
Avoid clinical jargon. Make them feel safe and validated.

Output format: JSON with keys "subject" and "body".
Subject should be comforting.
Body should be around 50-70 words."#,
            profile.name,
            matched.group_name,
            matched.categories_joined(", ")
        )
    }

    /// Sanitize JSON response from LLM.
    ///
    /// LLMs sometimes wrap JSON in markdown code blocks. This strips them.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        // Handle markdown code blocks: ```json ... ``` or ``` ... ```
        if trimmed.starts_with("```") {
            let without_prefix = if trimmed.starts_with("```json") {
                trimmed.strip_prefix("```json").unwrap_or(trimmed)
            } else {
                trimmed.strip_prefix("```").unwrap_or(trimmed)
            };

            if let Some(end_idx) = without_prefix.rfind("```") {
                return without_prefix[..end_idx].trim().to_string();
            }
            return without_prefix.trim().to_string();
        }

        if let Some(start) = trimmed.find('{') {
            if let Some(end) = trimmed.rfind('}') {
                if start < end {
                    return trimmed[start..=end].to_string();
                }
            }
        }

        trimmed.to_string()
    }

    /// Map classifier labels onto the taxonomy: unknown labels dropped, duplicates removed, max 2.
    fn categories_from_labels(labels: &[String]) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::with_capacity(2);
        for label in labels {
            match Category::from_label(label) {
                Some(c) if !out.contains(&c) => out.push(c),
                Some(_) => {}
                None => debug!(label = %label, "classifier returned unknown category"),
            }
            if out.len() == 2 {
                break;
            }
        }
        out
    }

    /// Send one chat completion and return the first choice's content.
    async fn complete(
        &self,
        user_prompt: String,
        temperature: f32,
        json: bool,
    ) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::persona().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            temperature,
            response_format: json.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| DomainError::Ai("No response choices returned".to_string()))?;

        debug!(raw_len = content.len(), "received AI response");
        Ok(content)
    }

    async fn complete_json<T: DeserializeOwned>(&self, user_prompt: String) -> Result<T, DomainError> {
        let raw = self.complete(user_prompt, JSON_TEMPERATURE, true).await?;
        let clean_json = Self::sanitize_json(&raw);
        serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Ai(format!("Failed to parse LLM JSON: {}", e))
        })
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Classifier reply schema.
#[derive(Deserialize)]
struct LlmClassification {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    sentiment: Option<String>,
}

/// Welcome letter reply schema.
#[derive(Deserialize)]
struct LlmLetter {
    subject: String,
    body: String,
}

#[async_trait::async_trait]
impl AiPort for OpenAiAdapter {
    async fn reflect_feelings(&self, feelings: &str) -> Result<String, DomainError> {
        info!(len = feelings.len(), "asking AI to reflect feelings");
        self.complete(Self::feelings_prompt(feelings), REPLY_TEMPERATURE, false)
            .await
    }

    async fn reflect_hobby(&self, hobby: &str) -> Result<String, DomainError> {
        info!(len = hobby.len(), "asking AI to reflect hobby");
        self.complete(Self::hobby_prompt(hobby), REPLY_TEMPERATURE, false)
            .await
    }

    async fn classify_feelings(&self, feelings: &str) -> Result<Vec<Category>, DomainError> {
        let parsed: LlmClassification = self.complete_json(Self::classify_prompt(feelings)).await?;
        let categories = Self::categories_from_labels(&parsed.categories);
        info!(
            categories = ?categories,
            sentiment = parsed.sentiment.as_deref().unwrap_or("unknown"),
            "AI classification complete"
        );
        Ok(categories)
    }

    async fn compose_welcome(
        &self,
        profile: &UserProfile,
        matched: &MatchResult,
    ) -> Result<WelcomeLetter, DomainError> {
        let letter: LlmLetter = self
            .complete_json(Self::welcome_prompt(profile, matched))
            .await?;
        if letter.subject.trim().is_empty() || letter.body.trim().is_empty() {
            return Err(DomainError::Ai("welcome letter came back empty".to_string()));
        }
        info!(subject_len = letter.subject.len(), body_len = letter.body.len(), "welcome letter composed");
        Ok(WelcomeLetter {
            subject: letter.subject.trim().to_string(),
            body: letter.body.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_json_clean() {
        let input = r#"{"categories": []}"#;
        assert_eq!(OpenAiAdapter::sanitize_json(input), input);
    }

    #[test]
    fn test_sanitize_json_markdown() {
        let input = r#"```json
{"categories": ["Grief Support"]}
```"#;
        assert_eq!(
            OpenAiAdapter::sanitize_json(input),
            r#"{"categories": ["Grief Support"]}"#
        );
    }

    #[test]
    fn test_sanitize_json_markdown_no_lang() {
        let input = r#"```
{"subject": "Hi"}
```"#;
        assert_eq!(OpenAiAdapter::sanitize_json(input), r#"{"subject": "Hi"}"#);
    }

    #[test]
    fn test_sanitize_json_with_text() {
        let input = r#"Here you go:
{"subject": "Welcome", "body": "..."}"#;
        assert_eq!(
            OpenAiAdapter::sanitize_json(input),
            r#"{"subject": "Welcome", "body": "..."}"#
        );
    }

    #[test]
    fn test_categories_from_labels() {
        let labels = vec![
            "grief support".to_string(),
            "Loneliness".to_string(),
            "Grief Support".to_string(),
            "Workplace Stress".to_string(),
            "Anxiety Management".to_string(),
        ];
        assert_eq!(
            OpenAiAdapter::categories_from_labels(&labels),
            vec![Category::GriefSupport, Category::WorkplaceStress]
        );
        assert!(OpenAiAdapter::categories_from_labels(&[]).is_empty());
    }

    #[test]
    fn test_classification_schema_tolerates_missing_fields() {
        let parsed: LlmClassification = serde_json::from_str(r#"{"sentiment": "Sad"}"#).unwrap();
        assert!(parsed.categories.is_empty());
        assert_eq!(parsed.sentiment.as_deref(), Some("Sad"));
    }

    #[test]
    fn test_classify_prompt_lists_taxonomy() {
        let prompt = OpenAiAdapter::classify_prompt("tired");
        for category in Category::ALL {
            assert!(prompt.contains(category.label()));
        }
    }
}
