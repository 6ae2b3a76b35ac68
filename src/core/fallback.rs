use crate::models::{FallbackSector, TrackLevel};
use crate::registry::ReferenceRegistry;

/// Smallest number of eligible jobs that makes a sector a viable choice
pub const MIN_ELIGIBLE_JOBS: usize = 3;

/// Pick a substitute sector when the preferred one offers no eligible jobs
///
/// Candidates are tried in order: `preferred`, then `ranked` (duplicates dropped),
/// then the safe sector for `level`. The first one with at least `min_eligible`
/// configured jobs reachable at `level` wins. `None` means no sector qualifies and the
/// caller has to fall back to a manual choice.
pub fn resolve_fallback_sector(
    registry: &ReferenceRegistry,
    level: TrackLevel,
    preferred: Option<&str>,
    ranked: &[String],
    min_eligible: usize,
) -> Option<FallbackSector> {
    let mut candidates: Vec<&str> = Vec::with_capacity(ranked.len() + 2);
    let safe = registry.safe_sector_for(level);

    for id in preferred
        .into_iter()
        .chain(ranked.iter().map(String::as_str))
        .chain(std::iter::once(safe))
    {
        if !candidates.contains(&id) {
            candidates.push(id);
        }
    }

    for sector_id in candidates {
        let eligible_count = registry.eligible_job_count(sector_id, level);
        if eligible_count >= min_eligible {
            tracing::info!(
                "Fallback sector {} selected for track {:?} ({} eligible jobs)",
                sector_id,
                level,
                eligible_count
            );
            return Some(FallbackSector {
                sector_id: sector_id.to_string(),
                eligible_count,
            });
        }
        tracing::debug!(
            "Sector {} skipped as fallback: {} eligible jobs for track {:?}",
            sector_id,
            eligible_count,
            level
        );
    }

    tracing::warn!("No fallback sector offers {} jobs for track {:?}", min_eligible, level);
    None
}
