//! Core domain layer. No external I/O dependencies.
//!
//! Taxonomy, entities, the peer roster and the matcher live here. Dependencies flow inward.

pub mod brief;
pub mod entities;
pub mod errors;
pub mod matching;
pub mod roster;
pub mod taxonomy;

pub use brief::SessionBrief;
pub use entities::{
    CardDetails, CategorySource, IntakeData, Location, MatchResult, Peer, Receipt, UserProfile,
    WelcomeLetter,
};
pub use errors::DomainError;
pub use matching::Matcher;
pub use roster::Roster;
pub use taxonomy::{Category, Hobby};
