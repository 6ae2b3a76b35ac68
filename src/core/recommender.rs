use crate::config::MatchingSettings;
use crate::core::{
    fallback::{resolve_fallback_sector, MIN_ELIGIBLE_JOBS},
    filters::{filter_eligible_jobs, track_level},
    matcher::Matcher,
    profile::compute_profile,
};
use crate::models::{AnswerMap, JobMatch, Profile, Recommendation, RecommendationOutcome};
use crate::registry::ReferenceRegistry;

/// End-to-end recommendation: answers -> profile -> sector -> eligible jobs
///
/// # Pipeline Stages
/// 1. Profile computation from the quiz answers
/// 2. Sector ranking against the registry
/// 3. Job ranking inside the best sector
/// 4. Track eligibility filtering
/// 5. Fallback sector resolution when nothing is eligible
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    registry: &'a ReferenceRegistry,
    min_eligible_jobs: usize,
    job_limit: Option<usize>,
}

impl<'a> Recommender<'a> {
    pub fn new(registry: &'a ReferenceRegistry) -> Self {
        Self {
            registry,
            min_eligible_jobs: MIN_ELIGIBLE_JOBS,
            job_limit: None,
        }
    }

    pub fn from_settings(registry: &'a ReferenceRegistry, settings: &MatchingSettings) -> Self {
        Self {
            registry,
            min_eligible_jobs: settings.min_eligible_jobs.unwrap_or(MIN_ELIGIBLE_JOBS),
            job_limit: settings.job_limit,
        }
    }

    pub fn with_job_limit(mut self, limit: usize) -> Self {
        self.job_limit = Some(limit);
        self
    }

    pub fn with_min_eligible_jobs(mut self, min_eligible_jobs: usize) -> Self {
        self.min_eligible_jobs = min_eligible_jobs;
        self
    }

    /// Recommend a sector and its eligible jobs
    ///
    /// # Arguments
    /// * `answers` - Quiz answers keyed by question id
    /// * `school_level` - Free-text school level from the user's profile
    ///
    /// # Returns
    /// A [`Recommendation`] whose `outcome` tells the caller whether the best sector
    /// was kept, replaced, or whether no job can be shown at all.
    pub fn recommend(&self, answers: &AnswerMap, school_level: Option<&str>) -> Recommendation {
        let matcher = Matcher::new(self.registry);
        let profile = compute_profile(answers);
        let level = track_level(school_level);

        let ranked_sectors = matcher.ranked_sectors(&profile);
        let sector = ranked_sectors.first().cloned();

        let best_sector_id = match &sector {
            Some(best) => best.sector_id.clone(),
            None => {
                tracing::warn!("Registry has no sectors, nothing to recommend");
                return Recommendation {
                    profile,
                    track_level: level,
                    sector: None,
                    jobs: Vec::new(),
                    outcome: RecommendationOutcome::NoEligibleSector,
                };
            }
        };

        let school_level_missing = school_level.map_or(true, |s| s.trim().is_empty());
        if school_level_missing {
            // The filter refuses to run; a fallback sector would be filtered the same way
            tracing::warn!("No school level supplied, withholding job recommendations");
            return Recommendation {
                profile,
                track_level: level,
                sector,
                jobs: Vec::new(),
                outcome: RecommendationOutcome::SchoolLevelMissing,
            };
        }

        let jobs = self.eligible_jobs(&matcher, &profile, &best_sector_id, school_level);
        if !jobs.is_empty() {
            return Recommendation {
                profile,
                track_level: level,
                sector,
                jobs,
                outcome: RecommendationOutcome::Matched,
            };
        }

        let remaining: Vec<String> = ranked_sectors
            .iter()
            .skip(1)
            .map(|s| s.sector_id.clone())
            .collect();

        match resolve_fallback_sector(self.registry, level, None, &remaining, self.min_eligible_jobs) {
            Some(fallback) => {
                let jobs = self.eligible_jobs(&matcher, &profile, &fallback.sector_id, school_level);
                Recommendation {
                    profile,
                    track_level: level,
                    sector,
                    jobs,
                    outcome: RecommendationOutcome::Fallback {
                        sector_id: fallback.sector_id,
                        eligible_count: fallback.eligible_count,
                    },
                }
            }
            None => Recommendation {
                profile,
                track_level: level,
                sector,
                jobs: Vec::new(),
                outcome: RecommendationOutcome::NoEligibleSector,
            },
        }
    }

    fn eligible_jobs(
        &self,
        matcher: &Matcher<'_>,
        profile: &Profile,
        sector_id: &str,
        school_level: Option<&str>,
    ) -> Vec<JobMatch> {
        let ranked = matcher.ranked_jobs(profile, sector_id);
        let mut eligible = filter_eligible_jobs(self.registry, sector_id, ranked, school_level);
        if let Some(limit) = self.job_limit {
            eligible.truncate(limit);
        }
        eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;

    fn answers(answer: Answer, count: usize) -> AnswerMap {
        (1..=count).map(|i| (format!("q{}", i), answer)).collect()
    }

    #[test]
    fn test_matched_in_unconfigured_sector() {
        let registry = ReferenceRegistry::builtin().unwrap();
        let recommender = Recommender::new(&registry);

        let result = recommender.recommend(&answers(Answer::C, 3), Some("Terminale générale"));

        assert_eq!(result.outcome, RecommendationOutcome::Matched);
        assert_eq!(result.final_sector_id(), Some("arts_design"));
        assert_eq!(result.jobs.len(), 3);
    }

    #[test]
    fn test_missing_school_level() {
        let registry = ReferenceRegistry::builtin().unwrap();
        let recommender = Recommender::new(&registry);

        let result = recommender.recommend(&answers(Answer::B, 3), None);

        assert_eq!(result.outcome, RecommendationOutcome::SchoolLevelMissing);
        assert!(result.jobs.is_empty());
        assert!(result.sector.is_some());
        assert_eq!(result.final_sector_id(), None);
    }

    #[test]
    fn test_job_limit() {
        let registry = ReferenceRegistry::builtin().unwrap();
        let recommender = Recommender::new(&registry).with_job_limit(1);

        let result = recommender.recommend(&answers(Answer::B, 3), Some("Terminale générale"));

        assert_eq!(result.outcome, RecommendationOutcome::Matched);
        assert_eq!(result.jobs.len(), 1);
    }

    #[test]
    fn test_fallback_when_best_sector_has_no_eligible_jobs() {
        let registry = ReferenceRegistry::builtin().unwrap();
        let recommender = Recommender::new(&registry);

        let result = recommender.recommend(&answers(Answer::B, 3), Some("Bac professionnel"));

        assert_eq!(result.sector.as_ref().unwrap().sector_id, "data_ia");
        assert_eq!(
            result.outcome,
            RecommendationOutcome::Fallback { sector_id: "batiment".to_string(), eligible_count: 4 }
        );
        assert_eq!(result.jobs.len(), 4);
    }

    #[test]
    fn test_no_eligible_sector() {
        let registry = ReferenceRegistry::builtin().unwrap();
        let recommender = Recommender::new(&registry).with_min_eligible_jobs(50);

        let result = recommender.recommend(&answers(Answer::B, 3), Some("CAP professionnel"));

        assert_eq!(result.outcome, RecommendationOutcome::NoEligibleSector);
        assert!(result.jobs.is_empty());
    }
}
