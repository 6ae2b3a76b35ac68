// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    clamp_dimension, Answer, AnswerMap, JobEligibility, JobReference, Pace, Profile,
    SectorJobConfig, SectorReference, TrackLevel, UserProfile,
};
pub use requests::{answers_from_raw, parse_answers_json};
pub use responses::{FallbackSector, JobMatch, Recommendation, RecommendationOutcome, SectorMatch};
