//! Closed label sets shared by users and peers.
//!
//! Labels are the human-readable strings used in prompts, JSON and the UI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Support focus. Variant order is the taxonomy order used by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Postpartum Depression")]
    PostpartumDepression,
    #[serde(rename = "Relationship Issues")]
    RelationshipIssues,
    #[serde(rename = "Workplace Stress")]
    WorkplaceStress,
    #[serde(rename = "Grief Support")]
    GriefSupport,
    #[serde(rename = "Anxiety Management")]
    AnxietyManagement,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::PostpartumDepression,
        Category::RelationshipIssues,
        Category::WorkplaceStress,
        Category::GriefSupport,
        Category::AnxietyManagement,
    ];

    /// Used when nothing in the user's text points anywhere else.
    pub const DEFAULT: Category = Category::AnxietyManagement;

    pub fn label(&self) -> &'static str {
        match self {
            Category::PostpartumDepression => "Postpartum Depression",
            Category::RelationshipIssues => "Relationship Issues",
            Category::WorkplaceStress => "Workplace Stress",
            Category::GriefSupport => "Grief Support",
            Category::AnxietyManagement => "Anxiety Management",
        }
    }

    /// Parse a label (case-insensitive, surrounding whitespace ignored).
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized hobby. `General` means no keyword group matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hobby {
    Gaming,
    Hiking,
    Art,
    Reading,
    General,
}

impl Hobby {
    pub fn label(&self) -> &'static str {
        match self {
            Hobby::Gaming => "Gaming",
            Hobby::Hiking => "Hiking",
            Hobby::Art => "Art",
            Hobby::Reading => "Reading",
            Hobby::General => "General",
        }
    }
}

impl fmt::Display for Hobby {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label_ignores_case() {
        assert_eq!(
            Category::from_label("grief support"),
            Some(Category::GriefSupport)
        );
        assert_eq!(
            Category::from_label("  Workplace Stress "),
            Some(Category::WorkplaceStress)
        );
        assert_eq!(Category::from_label("Insomnia"), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::PostpartumDepression).unwrap();
        assert_eq!(json, "\"Postpartum Depression\"");
        let back: Category = serde_json::from_str("\"Relationship Issues\"").unwrap();
        assert_eq!(back, Category::RelationshipIssues);
    }
}
