//! Renders session briefs as Markdown files.
//!
//! One file per brief: `{dir}/session_brief_{reference}.md`.

use crate::domain::{DomainError, SessionBrief};
use crate::ports::BriefWriterPort;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

pub struct MarkdownBriefWriter {
    dir: PathBuf,
}

impl MarkdownBriefWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Render the brief. Pure; the port method only adds I/O.
    pub fn render(brief: &SessionBrief) -> String {
        let profile = &brief.profile;
        let matched = &brief.matched;
        let mut md = String::new();

        // Header
        md.push_str("# Mentra Sphere\n\n");
        md.push_str("_Confidential Clinical Session Brief_\n\n");
        md.push_str(&format!(
            "**Generated:** {} | **Ref:** {}\n\n",
            brief.generated_at.format("%Y-%m-%d"),
            brief.reference
        ));
        md.push_str("---\n\n");

        md.push_str("## Client Profile\n\n");
        md.push_str("| Name | Location | Email | Primary Focus |\n");
        md.push_str("|------|----------|-------|---------------|\n");
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n\n",
            profile.name,
            profile.location,
            profile.email,
            matched.categories_joined(", ")
        ));

        md.push_str("## Therapeutic Context & Group Fit\n\n");
        md.push_str(&format!("> {}\n\n", brief.narrative));

        md.push_str(&format!("## Matched Sphere: {}\n\n", matched.group_name));
        if matched.peers.is_empty() {
            md.push_str("_Peers will be assigned by a facilitator._\n");
        }
        for peer in &matched.peers {
            md.push_str(&format!(
                "- **{}**: Category: {} | Shared Interest: {}\n",
                peer.name, peer.category, peer.hobby
            ));
        }
        md.push('\n');

        md.push_str("## Initial Session Plan\n\n");
        md.push_str("**Suggested Icebreaker:**\n\n");
        md.push_str(&format!("\"{}\"\n\n", matched.icebreaker));
        md.push_str("**Recommended Therapeutic Goals:**\n\n");
        for goal in &brief.goals {
            md.push_str(&format!("- {}\n", goal));
        }
        md.push('\n');

        // Footer
        md.push_str("---\n");
        md.push_str(
            "*This document contains confidential health information. Intended for authorized clinical use only.*\n",
        );
        md.push_str(&format!(
            "*© {} Mentra Sphere*\n",
            brief.generated_at.format("%Y")
        ));
        md
    }
}

#[async_trait::async_trait]
impl BriefWriterPort for MarkdownBriefWriter {
    async fn write_brief(&self, brief: &SessionBrief) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::Brief(format!("Failed to create briefs dir: {}", e)))?;

        let path = self
            .dir
            .join(format!("session_brief_{}.md", brief.reference));
        fs::write(&path, Self::render(brief))
            .await
            .map_err(|e| DomainError::Brief(format!("Failed to write brief: {}", e)))?;

        info!(path = %path.display(), "session brief written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IntakeData, Location, Matcher, UserProfile};

    fn brief() -> SessionBrief {
        let profile = UserProfile::new("Omar", "omar@example.com", Location::Dubai).unwrap();
        let matched = Matcher::default()
            .find_matches(&IntakeData::new("my wife and I argue constantly", "mountain walks"));
        SessionBrief::new(profile, matched, "MS-0042".into())
    }

    #[test]
    fn test_render_sections() {
        let md = MarkdownBriefWriter::render(&brief());
        assert!(md.contains("**Ref:** MS-0042"));
        assert!(md.contains("| Omar | Dubai, UAE | omar@example.com | Relationship Issues |"));
        assert!(md.contains("Omar has indicated distress related to interpersonal relationships."));
        assert!(md.contains("\"Where is your favorite place to find peace in nature?\""));
        assert!(md.contains("- Establish one healthy boundary this week"));
        // James is the hiking relationship peer and comes first.
        assert!(md.contains("- **James**: Category: Relationship Issues | Shared Interest: Hiking"));
    }

    #[tokio::test]
    async fn test_write_brief_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownBriefWriter::new(dir.path().join("briefs"));
        let path = writer.write_brief(&brief()).await.unwrap();

        assert!(path.ends_with("session_brief_MS-0042.md"));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.starts_with("# Mentra Sphere"));
    }
}
