//! Peer matching: category inference, hobby normalization and round-robin selection.
//!
//! Everything here is synchronous and side-effect free apart from the group-name draw,
//! which takes its randomness from the caller.

use crate::domain::entities::{CategorySource, IntakeData, MatchResult, Peer};
use crate::domain::roster::{GROUP_NAMES, Roster};
use crate::domain::taxonomy::{Category, Hobby};
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::cmp::Reverse;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Number of peers in a circle (not counting the user).
pub const CIRCLE_SIZE: usize = 3;

/// One keyword alternation per category, in taxonomy order.
///
/// Case folding and `\b` are ASCII-only: "exé" ends a word, `K` (Kelvin sign) is not `k`.
static CATEGORY_PATTERNS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Category::PostpartumDepression,
            Regex::new(r"(?i-u)postpartum|baby|birth|pregnancy|pregnant|nursing|breastfeed|newborn|maternity")
                .expect("Invalid regex: postpartum keywords"),
        ),
        (
            Category::RelationshipIssues,
            Regex::new(r"(?i-u)partner|husband|wife|spouse|boyfriend|girlfriend|break up|divorce|lonely|dating|marriage|couple|fight|argue|love|toxic|ex\b|separate")
                .expect("Invalid regex: relationship keywords"),
        ),
        (
            Category::WorkplaceStress,
            Regex::new(r"(?i-u)work|job|boss|career|office|deadline|burnout|exhausted|salary|colleague|project|manager|promotion|fired|layoff|employment")
                .expect("Invalid regex: workplace keywords"),
        ),
        (
            Category::GriefSupport,
            Regex::new(r"(?i-u)grief|loss|died|death|passed|mourn|miss|sadness|cry|gone|memory|funeral|lost a")
                .expect("Invalid regex: grief keywords"),
        ),
        (
            Category::AnxietyManagement,
            Regex::new(r"(?i-u)anxious|anxiety|panic|fear|worry|nervous|overwhelm|shaking|scared|dread|unease|tension|heart racing")
                .expect("Invalid regex: anxiety keywords"),
        ),
    ]
});

/// Checked in order; the first group that matches wins.
static HOBBY_PATTERNS: LazyLock<Vec<(Hobby, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Hobby::Gaming,
            Regex::new(r"(?i-u)game|gaming|playstation|xbox|pc|nintendo")
                .expect("Invalid regex: gaming keywords"),
        ),
        (
            Hobby::Hiking,
            Regex::new(r"(?i-u)hike|walk|run|nature|outdoor|mountain|camp|forest")
                .expect("Invalid regex: hiking keywords"),
        ),
        (
            Hobby::Art,
            Regex::new(r"(?i-u)art|draw|paint|sketch|create|design|color|museum")
                .expect("Invalid regex: art keywords"),
        ),
        (
            Hobby::Reading,
            Regex::new(r"(?i-u)read|book|novel|write|poetry|story")
                .expect("Invalid regex: reading keywords"),
        ),
    ]
});

/// Every category whose keywords appear in `text`, in taxonomy order.
/// Never empty: falls back to [`Category::DEFAULT`].
pub fn infer_categories(text: &str) -> Vec<Category> {
    let detected: Vec<Category> = CATEGORY_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(category, _)| *category)
        .collect();
    if detected.is_empty() {
        vec![Category::DEFAULT]
    } else {
        detected
    }
}

/// Resolve a [`CategorySource`] to a non-empty, duplicate-free list.
pub fn resolve_categories(source: &CategorySource) -> Vec<Category> {
    match source {
        CategorySource::Inferred(text) => infer_categories(text),
        CategorySource::Provided(list) => {
            let mut unique: Vec<Category> = Vec::with_capacity(list.len());
            for category in list {
                if !unique.contains(category) {
                    unique.push(*category);
                }
            }
            if unique.is_empty() {
                unique.push(Category::DEFAULT);
            }
            unique
        }
    }
}

pub fn normalize_hobby(text: &str) -> Hobby {
    HOBBY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(hobby, _)| *hobby)
        .unwrap_or(Hobby::General)
}

pub fn icebreaker(hobby: Hobby) -> &'static str {
    match hobby {
        Hobby::Gaming => "What's the most relaxing game you've ever played?",
        Hobby::Hiking => "Where is your favorite place to find peace in nature?",
        Hobby::Art => "What colors represent your mood today?",
        Hobby::Reading => "What book has had the biggest impact on your life?",
        Hobby::General => "Share one small win from your week.",
    }
}

fn hobby_score(peer: &Peer, hobby: Hobby) -> u8 {
    u8::from(peer.hobby == hobby)
}

/// Highest hobby score wins; `min_by_key` keeps the first of equals, i.e. roster order.
fn best_of<'a>(pool: impl Iterator<Item = &'a Peer>, hobby: Hobby) -> Option<&'a Peer> {
    pool.min_by_key(|peer| Reverse(hobby_score(peer, hobby)))
}

/// Matches intake answers against a roster.
#[derive(Debug, Clone)]
pub struct Matcher {
    roster: Roster,
    group_names: Vec<String>,
}

impl Matcher {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            group_names: GROUP_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the group-name pool. An empty pool keeps the current one.
    pub fn with_group_names(mut self, names: Vec<String>) -> Self {
        if !names.is_empty() {
            self.group_names = names;
        }
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn find_matches(&self, intake: &IntakeData) -> MatchResult {
        self.find_matches_with(intake, &mut rand::thread_rng())
    }

    /// Like [`Matcher::find_matches`] with an explicit random source for the group name.
    pub fn find_matches_with<R: Rng + ?Sized>(&self, intake: &IntakeData, rng: &mut R) -> MatchResult {
        let source = intake.category_source();
        let user_categories = resolve_categories(&source);
        let user_hobby = normalize_hobby(&intake.hobby);
        debug!(
            provided = matches!(source, CategorySource::Provided(_)),
            categories = ?user_categories,
            hobby = %user_hobby,
            "resolved intake"
        );

        let peers = self.select_peers(&user_categories, user_hobby);

        MatchResult {
            group_name: self.pick_group_name(rng),
            peers,
            icebreaker: icebreaker(user_hobby).to_string(),
            user_categories,
        }
    }

    /// Round-robin over `categories`, one peer per slot, hobby match as tie-break.
    ///
    /// Slot `i` targets `categories[i % len]`. When that category has no unused peer left,
    /// the best unused peer of any category is taken instead. A slot is skipped only when
    /// the roster is exhausted, so the result is shorter than [`CIRCLE_SIZE`] only for
    /// rosters with fewer peers than that.
    pub fn select_peers(&self, categories: &[Category], hobby: Hobby) -> Vec<Peer> {
        let categories: &[Category] = if categories.is_empty() {
            &[Category::DEFAULT]
        } else {
            categories
        };
        let mut selected: Vec<Peer> = Vec::with_capacity(CIRCLE_SIZE);

        for slot in 0..CIRCLE_SIZE {
            let target = categories[slot % categories.len()];
            let unused = |peer: &&Peer| !selected.iter().any(|s| s.id == peer.id);

            let in_category = best_of(
                self.roster
                    .peers()
                    .iter()
                    .filter(|p| p.category == target)
                    .filter(unused),
                hobby,
            );
            let pick = match in_category {
                Some(peer) => Some(peer),
                None => {
                    debug!(slot, category = %target, "category exhausted, widening search");
                    best_of(self.roster.peers().iter().filter(unused), hobby)
                }
            };

            match pick {
                Some(peer) => selected.push(peer.clone()),
                None => warn!(slot, roster = self.roster.len(), "roster exhausted, circle is short"),
            }
        }
        selected
    }

    fn pick_group_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.group_names
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| GROUP_NAMES[0].to_string())
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Roster::builtin())
    }
}
