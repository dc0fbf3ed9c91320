//! Matching use case. Wraps the domain matcher with logging.

use crate::domain::{IntakeData, MatchResult, Matcher};
use crate::domain::matching::CIRCLE_SIZE;
use std::sync::Arc;
use tracing::{info, warn};

pub struct MatchService {
    matcher: Arc<Matcher>,
}

impl MatchService {
    pub fn new(matcher: Arc<Matcher>) -> Self {
        Self { matcher }
    }

    pub fn match_intake(&self, intake: &IntakeData) -> MatchResult {
        let result = self.matcher.find_matches(intake);
        if result.peers.len() < CIRCLE_SIZE {
            warn!(
                found = result.peers.len(),
                roster = self.matcher.roster().len(),
                "circle is smaller than expected"
            );
        }
        info!(
            group = %result.group_name,
            categories = %result.categories_joined(", "),
            peers = ?result.peers.iter().map(|p| p.id).collect::<Vec<_>>(),
            "circle matched"
        );
        result
    }
}
