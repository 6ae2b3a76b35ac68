use std::cmp::Ordering;

use crate::core::scoring::calculate_match_score;
use crate::models::{JobMatch, Profile, SectorMatch};
use crate::registry::ReferenceRegistry;

/// Sector and job matching over a reference registry
///
/// # Tie-breaking
/// The registry yields sectors and jobs in ascending id order. `best_sector` keeps the
/// first strict maximum in that order; the ranked lists use a stable sort, so equal
/// scores stay in ascending id order too.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    registry: &'a ReferenceRegistry,
}

impl<'a> Matcher<'a> {
    pub fn new(registry: &'a ReferenceRegistry) -> Self {
        Self { registry }
    }

    /// Highest-scoring sector for the user, `None` if the registry has no sectors
    pub fn best_sector(&self, user: &Profile) -> Option<SectorMatch> {
        let mut best: Option<SectorMatch> = None;

        for sector in self.registry.sectors() {
            let score = calculate_match_score(user, &sector.profile);
            // Strictly greater: the first maximum seen is kept on ties
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(SectorMatch::new(sector.id.clone(), score));
            }
        }

        if let Some(b) = &best {
            tracing::debug!("Best sector {} (score {:.1})", b.sector_id, b.score);
        }

        best
    }

    /// Every sector, sorted by descending score
    pub fn ranked_sectors(&self, user: &Profile) -> Vec<SectorMatch> {
        let mut ranked: Vec<SectorMatch> = self
            .registry
            .sectors()
            .map(|sector| SectorMatch::new(sector.id.clone(), calculate_match_score(user, &sector.profile)))
            .collect();

        ranked.sort_by(|a, b| descending(a.score, b.score));
        ranked
    }

    /// Jobs owned by `sector_id`, sorted by descending score
    ///
    /// An empty list is returned for sectors without registered jobs.
    pub fn ranked_jobs(&self, user: &Profile, sector_id: &str) -> Vec<JobMatch> {
        let mut ranked: Vec<JobMatch> = self
            .registry
            .jobs_in_sector(sector_id)
            .map(|job| JobMatch {
                job_id: job.id.clone(),
                title: job.title.clone(),
                score: calculate_match_score(user, &job.profile),
            })
            .collect();

        if ranked.is_empty() {
            tracing::debug!("No jobs registered for sector {}", sector_id);
        }

        ranked.sort_by(|a, b| descending(a.score, b.score));
        ranked
    }
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pace;

    const REGISTRY: &str = r#"
        [[sectors]]
        id = "b_sector"
        name = "B"
        profile = { analysis = 50, execution = 50, creativity = 50, structure = 50, autonomy = 50, stressTolerance = 50, pace = "moderate" }

        [[sectors]]
        id = "a_sector"
        name = "A (same profile as B)"
        profile = { analysis = 50, execution = 50, creativity = 50, structure = 50, autonomy = 50, stressTolerance = 50, pace = "moderate" }

        [[sectors]]
        id = "creative"
        name = "Creative"
        profile = { analysis = 20, execution = 20, creativity = 100, structure = 10, autonomy = 90, stressTolerance = 40, pace = "variable" }

        [[jobs]]
        id = "painter"
        title = "Painter"
        sectorId = "creative"
        profile = { analysis = 20, execution = 30, creativity = 100, structure = 10, autonomy = 90, stressTolerance = 40, pace = "slow" }

        [[jobs]]
        id = "illustrator"
        title = "Illustrator"
        sectorId = "creative"
        profile = { analysis = 30, execution = 40, creativity = 80, structure = 30, autonomy = 70, stressTolerance = 40, pace = "moderate" }

        [[jobs]]
        id = "clerk"
        title = "Clerk"
        sectorId = "a_sector"
        profile = { analysis = 50, execution = 50, creativity = 50, structure = 50, autonomy = 50, stressTolerance = 50, pace = "moderate" }

        [fallback]
        safeSectors = ["a_sector", "a_sector", "a_sector"]
    "#;

    fn registry() -> ReferenceRegistry {
        ReferenceRegistry::from_toml_str(REGISTRY).unwrap()
    }

    #[test]
    fn test_best_sector() {
        let registry = registry();
        let matcher = Matcher::new(&registry);
        let user = Profile::new(20.0, 20.0, 100.0, 10.0, 90.0, 40.0, Pace::Moderate);

        let best = matcher.best_sector(&user).unwrap();
        assert_eq!(best.sector_id, "creative");
        assert!(best.resume.is_none());
    }

    #[test]
    fn test_tie_break_is_ascending_id() {
        let registry = registry();
        let matcher = Matcher::new(&registry);
        let user = Profile::new(50.0, 50.0, 50.0, 50.0, 50.0, 50.0, Pace::Moderate);

        let best = matcher.best_sector(&user).unwrap();
        assert_eq!(best.sector_id, "a_sector");
        assert_eq!(best.score, 100.0);

        let ranked = matcher.ranked_sectors(&user);
        assert_eq!(ranked[0].sector_id, "a_sector");
        assert_eq!(ranked[1].sector_id, "b_sector");
        assert_eq!(ranked[2].sector_id, "creative");
    }

    #[test]
    fn test_ranked_jobs_restricted_to_sector() {
        let registry = registry();
        let matcher = Matcher::new(&registry);
        let user = Profile::new(20.0, 30.0, 100.0, 10.0, 90.0, 40.0, Pace::Slow);

        let jobs = matcher.ranked_jobs(&user, "creative");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job_id, "painter");
        assert_eq!(jobs[1].job_id, "illustrator");
        assert!(jobs[0].score >= jobs[1].score);
    }

    #[test]
    fn test_ranked_jobs_empty_sector() {
        let registry = registry();
        let matcher = Matcher::new(&registry);

        assert!(matcher.ranked_jobs(&Profile::neutral(), "b_sector").is_empty());
        assert!(matcher.ranked_jobs(&Profile::neutral(), "unknown").is_empty());
    }
}
