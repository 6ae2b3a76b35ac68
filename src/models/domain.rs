use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// Lower bound of every numeric profile dimension
pub const DIMENSION_MIN: f64 = 0.0;
/// Upper bound of every numeric profile dimension
pub const DIMENSION_MAX: f64 = 100.0;

/// Clamp a dimension value to [0, 100], mapping NaN to 0
#[inline]
pub fn clamp_dimension(value: f64) -> f64 {
    if value.is_nan() {
        return DIMENSION_MIN;
    }
    value.clamp(DIMENSION_MIN, DIMENSION_MAX)
}

/// Working rhythm of a user, sector or job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Slow,
    #[default]
    Moderate,
    Fast,
    Variable,
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pace::Slow => "slow",
            Pace::Moderate => "moderate",
            Pace::Fast => "fast",
            Pace::Variable => "variable",
        };
        f.write_str(s)
    }
}

/// A point in the 7-dimensional feature space shared by users, sectors and jobs
///
/// Numeric fields always lie in [0, 100]: both [`Profile::new`] and deserialization
/// go through [`clamp_dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProfileRecord")]
pub struct Profile {
    pub analysis: f64,
    pub execution: f64,
    pub creativity: f64,
    pub structure: f64,
    pub autonomy: f64,
    pub stress_tolerance: f64,
    pub pace: Pace,
}

/// Profile computed from a user's quiz answers
pub type UserProfile = Profile;

impl Profile {
    pub fn new(
        analysis: f64,
        execution: f64,
        creativity: f64,
        structure: f64,
        autonomy: f64,
        stress_tolerance: f64,
        pace: Pace,
    ) -> Self {
        Self {
            analysis: clamp_dimension(analysis),
            execution: clamp_dimension(execution),
            creativity: clamp_dimension(creativity),
            structure: clamp_dimension(structure),
            autonomy: clamp_dimension(autonomy),
            stress_tolerance: clamp_dimension(stress_tolerance),
            pace,
        }
    }

    /// All numeric dimensions at 0 with a moderate pace
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, Pace::Moderate)
    }

    /// Numeric dimensions in a fixed order
    pub fn dimensions(&self) -> [f64; 6] {
        [
            self.analysis,
            self.execution,
            self.creativity,
            self.structure,
            self.autonomy,
            self.stress_tolerance,
        ]
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Unchecked wire shape of a profile
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    analysis: f64,
    execution: f64,
    creativity: f64,
    structure: f64,
    autonomy: f64,
    stress_tolerance: f64,
    #[serde(default)]
    pace: Pace,
}

impl From<ProfileRecord> for Profile {
    fn from(r: ProfileRecord) -> Self {
        Profile::new(
            r.analysis,
            r.execution,
            r.creativity,
            r.structure,
            r.autonomy,
            r.stress_tolerance,
            r.pace,
        )
    }
}

/// A single quiz answer choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    A,
    B,
    C,
}

impl Answer {
    /// Lenient parse: surrounding whitespace and case are ignored
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" | "a" => Some(Answer::A),
            "B" | "b" => Some(Answer::B),
            "C" | "c" => Some(Answer::C),
            _ => None,
        }
    }
}

/// Question id -> chosen answer. Ordered so that accumulation is deterministic.
pub type AnswerMap = BTreeMap<String, Answer>;

/// School track, ordered from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TrackLevel {
    #[default]
    Vocational = 0,
    Technological = 1,
    General = 2,
}

impl TrackLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for TrackLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TrackLevel::Vocational),
            1 => Ok(TrackLevel::Technological),
            2 => Ok(TrackLevel::General),
            other => Err(format!("invalid track level {}, expected 0, 1 or 2", other)),
        }
    }
}

impl From<TrackLevel> for u8 {
    fn from(level: TrackLevel) -> Self {
        level.as_u8()
    }
}

/// Reference profile of a professional sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectorReference {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    pub profile: Profile,
}

/// Reference profile of a job, always attached to its owning sector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub sector_id: String,
    pub profile: Profile,
}

/// Minimum track required to see a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobEligibility {
    #[validate(length(min = 1))]
    pub title: String,
    pub min_track: TrackLevel,
}

impl JobEligibility {
    #[inline]
    pub fn is_eligible(&self, level: TrackLevel) -> bool {
        self.min_track <= level
    }
}

/// Track requirements for the jobs of one configured sector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectorJobConfig {
    #[validate(length(min = 1))]
    pub sector_id: String,
    #[validate(nested)]
    pub jobs: Vec<JobEligibility>,
}

impl SectorJobConfig {
    /// Number of jobs visible at the given track level
    pub fn eligible_count(&self, level: TrackLevel) -> usize {
        self.jobs.iter().filter(|j| j.is_eligible(level)).count()
    }
}
