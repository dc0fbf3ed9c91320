//! Peer roster. Read-only for the lifetime of the process.
//!
//! The built-in roster mirrors the launch cohort; a JSON file may replace it.

use crate::domain::errors::DomainError;
use crate::domain::entities::Peer;
use crate::domain::taxonomy::{Category, Hobby};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Circle names handed out at random to each match.
pub const GROUP_NAMES: [&str; 7] = [
    "The Resilience Collective",
    "Circle of Calm",
    "Mindful Hearts",
    "The Serenity Squad",
    "Pathways to Peace",
    "Healing Harbor",
    "New Beginnings Group",
];

const BUILTIN: [(u32, &str, Category, Hobby); 15] = [
    (1, "Sarah", Category::WorkplaceStress, Hobby::Gaming),
    (2, "Ahmed", Category::AnxietyManagement, Hobby::Hiking),
    (3, "Lisa", Category::GriefSupport, Hobby::Art),
    (4, "Mike", Category::WorkplaceStress, Hobby::Hiking),
    (5, "Emma", Category::AnxietyManagement, Hobby::Gaming),
    (6, "John", Category::GriefSupport, Hobby::Art),
    (7, "Zoe", Category::PostpartumDepression, Hobby::Art),
    (8, "Omar", Category::RelationshipIssues, Hobby::Gaming),
    (9, "Layla", Category::GriefSupport, Hobby::Hiking),
    (10, "Fatima", Category::PostpartumDepression, Hobby::Reading),
    (11, "James", Category::RelationshipIssues, Hobby::Hiking),
    (12, "Maya", Category::WorkplaceStress, Hobby::Reading),
    (13, "Priya", Category::AnxietyManagement, Hobby::Reading),
    (14, "Elena", Category::PostpartumDepression, Hobby::Hiking),
    (15, "Sam", Category::RelationshipIssues, Hobby::Art),
];

fn avatar_url(name: &str) -> String {
    format!("https://picsum.photos/seed/{}/200/200", name.to_lowercase())
}

/// Ordered list of peers with unique ids. Order is the tie-break order for matching.
#[derive(Debug, Clone)]
pub struct Roster {
    peers: Vec<Peer>,
}

impl Roster {
    /// The fifteen launch peers.
    pub fn builtin() -> Self {
        let peers = BUILTIN
            .iter()
            .map(|&(id, name, category, hobby)| Peer {
                id,
                name: name.to_string(),
                category,
                hobby,
                avatar: avatar_url(name),
            })
            .collect();
        Self { peers }
    }

    /// Build a roster from arbitrary peers. Rejects duplicate ids.
    pub fn from_peers(peers: Vec<Peer>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(peers.len());
        for peer in &peers {
            if !seen.insert(peer.id) {
                return Err(DomainError::Roster(format!(
                    "duplicate peer id {} ({})",
                    peer.id, peer.name
                )));
            }
        }
        Ok(Self { peers })
    }

    /// Load a roster from a JSON array of peers.
    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::Roster(format!("read {}: {}", path.display(), e))
        })?;
        let peers: Vec<Peer> = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Roster(format!("parse {}: {}", path.display(), e)))?;
        let roster = Self::from_peers(peers)?;
        info!(path = %path.display(), peers = roster.len(), "roster loaded");
        Ok(roster)
    }

    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_roster_shape() {
        let roster = Roster::builtin();
        assert_eq!(roster.len(), 15);
        let ids: HashSet<u32> = roster.peers().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 15);
        for category in Category::ALL {
            let count = roster
                .peers()
                .iter()
                .filter(|p| p.category == category)
                .count();
            assert_eq!(count, 3, "{} should have three peers", category);
        }
        assert_eq!(
            roster.peers()[0].avatar,
            "https://picsum.photos/seed/sarah/200/200"
        );
    }

    #[test]
    fn test_from_peers_rejects_duplicate_ids() {
        let mut peers = Roster::builtin().peers().to_vec();
        peers[1].id = peers[0].id;
        let err = Roster::from_peers(peers).unwrap_err();
        assert!(matches!(err, DomainError::Roster(_)));
    }

    #[tokio::test]
    async fn test_load_roster_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 7, "name": "Nora", "category": "Grief Support", "hobby": "Reading", "avatar": "a.png"}},
                {{"id": 9, "name": "Ravi", "category": "Workplace Stress", "hobby": "Gaming", "avatar": "b.png"}}
            ]"#
        )
        .unwrap();

        let roster = Roster::load(file.path()).await.unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.peers()[0].category, Category::GriefSupport);
        assert_eq!(roster.peers()[1].hobby, Hobby::Gaming);
    }

    #[tokio::test]
    async fn test_load_roster_missing_file() {
        let err = Roster::load(Path::new("/nonexistent/roster.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Roster(_)));
    }
}
