//! Domain entities. Pure data structures for the onboarding flow.
//!
//! No UI/HTTP types here; adapters map into and out of these.

use crate::domain::errors::DomainError;
use crate::domain::taxonomy::{Category, Hobby};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A peer available for matching. Immutable once loaded into a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub id: u32,
    pub name: String,
    pub category: Category,
    pub hobby: Hobby,
    pub avatar: String,
}

/// Answers collected by the intake conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeData {
    pub feelings: String,
    pub hobby: String,
    /// Labels from an external classifier (LLM). Not validated against the taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_categories: Option<Vec<String>>,
}

impl IntakeData {
    pub fn new(feelings: impl Into<String>, hobby: impl Into<String>) -> Self {
        Self {
            feelings: feelings.into(),
            hobby: hobby.into(),
            ai_categories: None,
        }
    }

    pub fn with_ai_categories(mut self, labels: Vec<String>) -> Self {
        self.ai_categories = Some(labels);
        self
    }

    /// Decide where the user's categories come from.
    ///
    /// Supplied labels win only if at least one of them names a known category;
    /// an absent, empty or entirely unknown list falls back to inference over `feelings`.
    pub fn category_source(&self) -> CategorySource {
        let provided: Vec<Category> = self
            .ai_categories
            .iter()
            .flatten()
            .filter_map(|label| {
                let category = Category::from_label(label);
                if category.is_none() {
                    debug!(label = %label, "discarding unknown category label");
                }
                category
            })
            .collect();
        if provided.is_empty() {
            CategorySource::Inferred(self.feelings.clone())
        } else {
            CategorySource::Provided(provided)
        }
    }
}

/// Origin of the user's categories. `Provided` replaces inference, it is never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySource {
    Inferred(String),
    Provided(Vec<Category>),
}

/// Outcome of matching. `peers` holds at most three distinct peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub group_name: String,
    pub peers: Vec<Peer>,
    pub icebreaker: String,
    pub user_categories: Vec<Category>,
}

impl MatchResult {
    /// Label shown as the circle's shared focus.
    pub fn focus_label(&self) -> &str {
        match self.user_categories.as_slice() {
            [single] => single.label(),
            _ => "Personalized Support",
        }
    }

    pub fn categories_joined(&self, sep: &str) -> String {
        self.user_categories
            .iter()
            .map(Category::label)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Cities the service operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Dubai, UAE")]
    Dubai,
    #[serde(rename = "London, UK")]
    London,
    #[serde(rename = "New York, USA")]
    NewYork,
}

/// Shown when someone signs up from a city the service has not launched in.
pub const WAITLIST_NOTICE: &str =
    "🌿 We are currently planting roots only in Dubai. Join our waitlist.";

impl Location {
    pub const ALL: [Location; 3] = [Location::Dubai, Location::London, Location::NewYork];

    /// Only Dubai is live; the other cities are waitlisted.
    pub fn is_operating(&self) -> bool {
        matches!(self, Location::Dubai)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::Dubai => "Dubai, UAE",
            Location::London => "London, UK",
            Location::NewYork => "New York, USA",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity captured on the landing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub location: Location,
}

impl UserProfile {
    pub fn new(name: &str, email: &str, location: Location) -> Result<Self, DomainError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        if email.is_empty() {
            return Err(DomainError::Validation("email is required".into()));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation(format!(
                "'{}' is not an email address",
                email
            )));
        }
        if !location.is_operating() {
            return Err(DomainError::Validation(WAITLIST_NOTICE.into()));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            location,
        })
    }
}

/// Card details entered at checkout. Only ever handed to the (simulated) payment port.
/// The CVC is checked on construction and not kept.
#[derive(Debug, Clone)]
pub struct CardDetails {
    number: String,
    pub expiry: String,
    pub holder: String,
}

impl CardDetails {
    pub fn new(number: &str, expiry: &str, cvc: &str, holder: &str) -> Result<Self, DomainError> {
        let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        if !(12..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "card number must be 12-19 digits".into(),
            ));
        }
        validate_expiry(expiry.trim())?;
        let cvc = cvc.trim();
        if cvc.len() != 3 || !cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation("CVC must be 3 digits".into()));
        }
        let holder = holder.trim();
        if holder.is_empty() {
            return Err(DomainError::Validation("cardholder name is required".into()));
        }
        Ok(Self {
            number: digits,
            expiry: expiry.trim().to_string(),
            holder: holder.to_string(),
        })
    }

    pub fn last4(&self) -> &str {
        &self.number[self.number.len() - 4..]
    }

    pub fn masked(&self) -> String {
        format!("**** {}", self.last4())
    }
}

fn validate_expiry(expiry: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::Validation("expiry must be MM/YY".into());
    let (mm, yy) = expiry.split_once('/').ok_or_else(invalid)?;
    if mm.len() != 2 || yy.len() != 2 {
        return Err(invalid());
    }
    let month: u8 = mm.parse().map_err(|_| invalid())?;
    yy.parse::<u8>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(())
}

/// Group digits in fours for display ("4242424242424242" -> "4242 4242 4242 4242").
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(char::is_ascii_digit).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render cents as dollars, e.g. 2000 -> "$20.00".
pub fn format_amount(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Proof of a completed (simulated) charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub reference: String,
    pub amount_cents: u64,
    pub masked_card: String,
    pub cardholder: String,
    pub paid_at: DateTime<Utc>,
}

/// Personalized welcome message sent after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeLetter {
    pub subject: String,
    pub body: String,
}

impl WelcomeLetter {
    /// Letter used when no AI-composed text is available.
    pub fn fallback(profile: &UserProfile, matched: &MatchResult) -> Self {
        Self {
            subject: format!("Welcome to {}, {}", matched.group_name, profile.name),
            body: format!(
                "Dear {},\n\nThank you for taking this brave first step. {} is a calm, \
                 judgment-free circle of people who understand what it is like to carry \
                 {}. Your peers are looking forward to meeting you. Come as you are; \
                 there is room for you here.\n\nWith warmth,\nMentra",
                profile.name,
                matched.group_name,
                matched.categories_joined(" and ").to_lowercase()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_source_prefers_known_provided_labels() {
        let intake = IntakeData::new("my boss", "").with_ai_categories(vec![
            "Grief Support".into(),
            "Not A Category".into(),
        ]);
        assert_eq!(
            intake.category_source(),
            CategorySource::Provided(vec![Category::GriefSupport])
        );
    }

    #[test]
    fn test_category_source_empty_or_unknown_falls_back() {
        let empty = IntakeData::new("my boss", "").with_ai_categories(vec![]);
        assert_eq!(
            empty.category_source(),
            CategorySource::Inferred("my boss".into())
        );

        let unknown = IntakeData::new("my boss", "").with_ai_categories(vec!["Sleep".into()]);
        assert_eq!(
            unknown.category_source(),
            CategorySource::Inferred("my boss".into())
        );

        let absent = IntakeData::new("my boss", "");
        assert!(matches!(absent.category_source(), CategorySource::Inferred(_)));
    }

    #[test]
    fn test_user_profile_validation() {
        assert!(UserProfile::new("Ana", "ana@example.com", Location::Dubai).is_ok());
        assert!(UserProfile::new("  ", "ana@example.com", Location::Dubai).is_err());
        assert!(UserProfile::new("Ana", "", Location::Dubai).is_err());
        assert!(UserProfile::new("Ana", "ana.example.com", Location::Dubai).is_err());
    }

    #[test]
    fn test_only_dubai_is_accepted() {
        for location in [Location::London, Location::NewYork] {
            match UserProfile::new("Ana", "ana@example.com", location) {
                Err(DomainError::Validation(msg)) => assert_eq!(msg, WAITLIST_NOTICE),
                other => panic!("expected waitlist refusal for {}, got {:?}", location, other),
            }
        }
        let profile = UserProfile::new("Ana", "ana@example.com", Location::Dubai).unwrap();
        assert_eq!(profile.location.label(), "Dubai, UAE");
    }

    #[test]
    fn test_card_details_validation() {
        let card = CardDetails::new("4242 4242 4242 4242", "12/27", "123", "Ana Lee").unwrap();
        assert_eq!(card.masked(), "**** 4242");
        assert_eq!(card.holder, "Ana Lee");
        assert_eq!(card.expiry, "12/27");

        assert!(CardDetails::new("4242", "12/27", "123", "Ana").is_err());
        assert!(CardDetails::new("4242 4242 4242 424x", "12/27", "123", "Ana").is_err());
        assert!(CardDetails::new("4242424242424242", "13/27", "123", "Ana").is_err());
        assert!(CardDetails::new("4242424242424242", "1227", "123", "Ana").is_err());
        assert!(CardDetails::new("4242424242424242", "12/27", "12", "Ana").is_err());
        assert!(CardDetails::new("4242424242424242", "12/27", "123", " ").is_err());
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("42-42 42"), "4242 42");
        assert_eq!(format_amount(2000), "$20.00");
        assert_eq!(format_amount(1999), "$19.99");
    }
}
