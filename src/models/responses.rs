use serde::{Deserialize, Serialize};
use crate::models::domain::{Profile, TrackLevel};

/// Score of a sector against a user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorMatch {
    pub sector_id: String,
    pub score: f64,
    /// Narrative text attached by the text-generation collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

impl SectorMatch {
    pub fn new(sector_id: impl Into<String>, score: f64) -> Self {
        Self {
            sector_id: sector_id.into(),
            score,
            resume: None,
        }
    }

    pub fn with_resume(mut self, resume: impl Into<String>) -> Self {
        self.resume = Some(resume.into());
        self
    }
}

/// Score of a job against a user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub job_id: String,
    pub title: String,
    pub score: f64,
}

/// Substitute sector chosen when the preferred one has no eligible jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackSector {
    pub sector_id: String,
    pub eligible_count: usize,
}

/// How a recommendation was reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecommendationOutcome {
    /// The best-scoring sector has eligible jobs
    Matched,
    /// The best-scoring sector had none; another sector was substituted
    #[serde(rename_all = "camelCase")]
    Fallback { sector_id: String, eligible_count: usize },
    /// No school level was supplied, so no job could be shown
    SchoolLevelMissing,
    /// No sector offers enough eligible jobs; the caller should ask for a manual choice
    NoEligibleSector,
}

/// Full result of the recommendation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub profile: Profile,
    pub track_level: TrackLevel,
    /// Best-scoring sector, `None` only when the registry has no sectors
    pub sector: Option<SectorMatch>,
    /// Eligible jobs of the sector the user ends up in
    pub jobs: Vec<JobMatch>,
    pub outcome: RecommendationOutcome,
}

impl Recommendation {
    /// Sector whose jobs are listed in `jobs`
    pub fn final_sector_id(&self) -> Option<&str> {
        match &self.outcome {
            RecommendationOutcome::Fallback { sector_id, .. } => Some(sector_id.as_str()),
            RecommendationOutcome::Matched => self.sector.as_ref().map(|s| s.sector_id.as_str()),
            _ => None,
        }
    }
}
