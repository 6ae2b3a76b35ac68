// Core algorithm exports
pub mod fallback;
pub mod filters;
pub mod matcher;
pub mod profile;
pub mod recommender;
pub mod scoring;

pub use fallback::{resolve_fallback_sector, MIN_ELIGIBLE_JOBS};
pub use filters::{filter_eligible_jobs, normalize_title, track_level, Titled};
pub use matcher::Matcher;
pub use profile::compute_profile;
pub use recommender::Recommender;
pub use scoring::{calculate_match_score, pace_value};
