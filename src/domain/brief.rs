//! Session brief content: the document a user receives after checkout.
//!
//! Narrative and goals are keyed on the user's primary (first) category.

use crate::domain::entities::{MatchResult, UserProfile};
use crate::domain::taxonomy::Category;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

/// Everything a brief renderer needs. Built once, rendered by an adapter.
#[derive(Debug, Clone, Serialize)]
pub struct SessionBrief {
    pub reference: String,
    pub generated_at: DateTime<Utc>,
    pub profile: UserProfile,
    pub matched: MatchResult,
    pub narrative: String,
    pub goals: Vec<&'static str>,
}

impl SessionBrief {
    pub fn new(profile: UserProfile, matched: MatchResult, reference: String) -> Self {
        let primary = matched.user_categories.first().copied();
        Self {
            narrative: clinical_narrative(primary, &profile.name),
            goals: therapeutic_goals(primary).to_vec(),
            generated_at: Utc::now(),
            reference,
            profile,
            matched,
        }
    }
}

/// Brief/receipt reference, e.g. `MS-0427`.
pub fn new_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("MS-{:04}", rng.gen_range(0..10_000))
}

pub fn clinical_narrative(primary: Option<Category>, name: &str) -> String {
    match primary {
        Some(Category::PostpartumDepression) => format!(
            "{name} is currently navigating the complex emotional landscape of the postpartum period. \
             The selected support circle focuses on validating maternal experiences, reducing isolation, \
             and navigating identity shifts. Key themes include sleep deprivation, hormonal regulation, \
             and bonding challenges."
        ),
        Some(Category::RelationshipIssues) => format!(
            "{name} has indicated distress related to interpersonal relationships. The matched group \
             provides a space to explore attachment styles, boundary setting, and communication patterns. \
             The focus is on rebuilding self-worth independent of relationship status."
        ),
        Some(Category::WorkplaceStress) => format!(
            "{name} is experiencing high levels of professional burnout or anxiety. The support circle is \
             curated to normalize these stressors and share coping mechanisms for high-pressure \
             environments, focusing on work-life separation and redefining professional value."
        ),
        Some(Category::GriefSupport) => format!(
            "{name} is processing a significant loss. The group dynamic is centered on the 'continuing \
             bonds' model of grief, offering a non-judgmental space to share memories and navigate the \
             non-linear stages of mourning without pressure to 'move on'."
        ),
        Some(Category::AnxietyManagement) => format!(
            "{name} reports symptoms of elevated anxiety. The matched peers share similar experiences with \
             nervous system regulation. The group's primary goal is to function as a co-regulation anchor, \
             practicing grounding techniques and challenging catastrophic thinking."
        ),
        None => format!(
            "{name} is seeking a supportive community to enhance general mental well-being and resilience. \
             The group focuses on shared human experiences and mutual support."
        ),
    }
}

pub fn therapeutic_goals(primary: Option<Category>) -> [&'static str; 3] {
    match primary {
        Some(Category::PostpartumDepression) => [
            "Normalize the 'Baby Blues' vs. PPD distinction",
            "Identify one self-care window per day",
            "Reduce guilt around parenting expectations",
        ],
        Some(Category::RelationshipIssues) => [
            "Establish one healthy boundary this week",
            "Identify triggers for emotional dysregulation",
            "Practice 'I' statements in communication",
        ],
        Some(Category::WorkplaceStress) => [
            "Define clear 'clock-out' rituals",
            "Identify physical signs of burnout",
            "Practice saying 'no' to non-essential tasks",
        ],
        Some(Category::GriefSupport) => [
            "Share one memory without judgment",
            "Allow space for 'grief waves'",
            "Create a small ritual of remembrance",
        ],
        Some(Category::AnxietyManagement) => [
            "Practice 4-7-8 breathing technique",
            "Identify cognitive distortions",
            "Create a 'safety anchor' visualization",
        ],
        None => [
            "Build a consistent support network",
            "Verbalize emotions safely",
            "Practice active listening",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{IntakeData, Location};
    use crate::domain::matching::Matcher;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_brief_uses_primary_category() {
        let profile = UserProfile::new("Dana", "dana@example.com", Location::Dubai).unwrap();
        let matched = Matcher::default().find_matches(
            &IntakeData::new("", "").with_ai_categories(vec![
                "Grief Support".into(),
                "Workplace Stress".into(),
            ]),
        );
        let brief = SessionBrief::new(profile, matched, "MS-0001".into());

        assert!(brief.narrative.starts_with("Dana is processing a significant loss."));
        assert_eq!(brief.goals[0], "Share one memory without judgment");
    }

    #[test]
    fn test_general_fallback_without_category() {
        assert!(clinical_narrative(None, "Kim").contains("general mental well-being"));
        assert_eq!(therapeutic_goals(None)[2], "Practice active listening");
    }

    #[test]
    fn test_reference_format() {
        let mut rng = StdRng::seed_from_u64(1);
        let reference = new_reference(&mut rng);
        assert!(reference.starts_with("MS-"));
        assert_eq!(reference.len(), 7);
        assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
