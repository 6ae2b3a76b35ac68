//! Orientation Engine - profile-based sector and job recommendation
//!
//! Turns quiz answers into a 7-dimensional aptitude profile, matches it against
//! sector and job reference profiles, and keeps only the jobs reachable from the
//! user's school track, substituting a fallback sector when none are.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    calculate_match_score, compute_profile, filter_eligible_jobs, normalize_title,
    resolve_fallback_sector, track_level, Matcher, Recommender,
};
pub use models::{
    Answer, AnswerMap, FallbackSector, JobMatch, Pace, Profile, Recommendation,
    RecommendationOutcome, SectorMatch, TrackLevel, UserProfile,
};
pub use registry::{ReferenceRegistry, RegistryError};
