use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use crate::models::{JobMatch, TrackLevel};
use crate::registry::ReferenceRegistry;

/// Anything that can be checked against a sector's job configuration by title
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for JobMatch {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for String {
    fn title(&self) -> &str {
        self
    }
}

impl Titled for &str {
    fn title(&self) -> &str {
        self
    }
}

/// Normalize a job title into a lookup key
///
/// Lowercases, strips accents (NFD then combining marks removed), replaces every run
/// of non-alphanumeric characters with a single space and trims. Idempotent.
pub fn normalize_title(title: &str) -> String {
    let folded: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let mut key = String::with_capacity(folded.len());
    let mut pending_space = false;
    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(c);
        } else {
            pending_space = true;
        }
    }
    key
}

/// Derive the track level from a free-text school level
///
/// Case-insensitive substring match; anything unrecognized, empty or missing maps to
/// the most restrictive level.
pub fn track_level(school_level: Option<&str>) -> TrackLevel {
    let text = match school_level {
        Some(text) => text.to_lowercase(),
        None => return TrackLevel::Vocational,
    };

    if text.contains("générale") || text.contains("generale") {
        TrackLevel::General
    } else if text.contains("technologique") {
        TrackLevel::Technological
    } else {
        // "professionnelle"/"professionnel" and unknown text alike
        TrackLevel::Vocational
    }
}

/// Keep the candidates whose minimum track is reachable at the user's level
///
/// - Missing or blank school level: refuse and return nothing.
/// - Sector absent from the job configuration: every candidate passes.
/// - Configured sector, title not listed: the job requires the general track.
///
/// Input order is preserved. This never substitutes another sector; an empty result
/// is for the caller to resolve.
pub fn filter_eligible_jobs<T: Titled>(
    registry: &ReferenceRegistry,
    sector_id: &str,
    candidates: Vec<T>,
    school_level: Option<&str>,
) -> Vec<T> {
    let school_level = match school_level {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            tracing::warn!(
                "Refusing to filter {} jobs for sector {}: school level missing",
                candidates.len(),
                sector_id
            );
            return Vec::new();
        }
    };

    let level = track_level(Some(school_level));

    if !registry.is_configured(sector_id) {
        tracing::debug!(
            "Sector {} has no job configuration, {} candidates pass unfiltered",
            sector_id,
            candidates.len()
        );
        return candidates;
    }

    let total = candidates.len();
    let eligible: Vec<T> = candidates
        .into_iter()
        .filter(|candidate| {
            let key = normalize_title(candidate.title());
            let min_track = registry.title_min_track(sector_id, &key).unwrap_or_else(|| {
                tracing::debug!(
                    "Job '{}' not configured for sector {}, requiring general track",
                    candidate.title(),
                    sector_id
                );
                TrackLevel::General
            });
            min_track <= level
        })
        .collect();

    if eligible.is_empty() {
        tracing::info!(
            "No eligible jobs in sector {} for track {:?} ({} candidates)",
            sector_id,
            level,
            total
        );
    } else {
        tracing::debug!(
            "{} of {} jobs eligible in sector {} for track {:?}",
            eligible.len(),
            total,
            sector_id,
            level
        );
    }

    eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"
        [[sectors]]
        id = "data_ia"
        name = "Data"
        profile = { analysis = 90, execution = 50, creativity = 50, structure = 70, autonomy = 60, stressTolerance = 50, pace = "moderate" }

        [[sectors]]
        id = "open"
        name = "Open"
        profile = { analysis = 50, execution = 50, creativity = 50, structure = 50, autonomy = 50, stressTolerance = 50, pace = "slow" }

        [[sectorJobs]]
        sectorId = "data_ia"
        jobs = [
            { title = "Data analyst", minTrack = 2 },
            { title = "Technicien de données", minTrack = 1 },
            { title = "Opérateur de saisie", minTrack = 0 },
        ]

        [fallback]
        safeSectors = ["data_ia", "data_ia", "data_ia"]
    "#;

    fn registry() -> ReferenceRegistry {
        ReferenceRegistry::from_toml_str(REGISTRY).unwrap()
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Développeur Backend"), "developpeur backend");
        assert_eq!(normalize_title("  Aide-soignant(e) "), "aide soignant e");
        assert_eq!(normalize_title("ÉLECTRICIEN"), "electricien");
        assert_eq!(normalize_title("---"), "");
    }

    #[test]
    fn test_normalize_title_idempotent() {
        for s in ["Développeur Backend", "  a--b  ", "Maçon/Coffreur", ""] {
            let once = normalize_title(s);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn test_track_level_parsing() {
        assert_eq!(track_level(Some("Terminale professionnelle")), TrackLevel::Vocational);
        assert_eq!(track_level(Some("Terminale générale")), TrackLevel::General);
        assert_eq!(track_level(Some("PREMIERE GENERALE")), TrackLevel::General);
        assert_eq!(track_level(Some("Bac technologique STI2D")), TrackLevel::Technological);
        assert_eq!(track_level(Some("Seconde")), TrackLevel::Vocational);
        assert_eq!(track_level(Some("")), TrackLevel::Vocational);
        assert_eq!(track_level(None), TrackLevel::Vocational);
    }

    #[test]
    fn test_filter_refuses_without_school_level() {
        let registry = registry();
        let candidates = vec!["Opérateur de saisie"];
        assert!(filter_eligible_jobs(&registry, "data_ia", candidates.clone(), Some("")).is_empty());
        assert!(filter_eligible_jobs(&registry, "data_ia", candidates.clone(), Some("   ")).is_empty());
        assert!(filter_eligible_jobs(&registry, "data_ia", candidates, None).is_empty());
    }

    #[test]
    fn test_filter_configured_sector() {
        let registry = registry();
        let candidates = vec!["Data analyst", "technicien de donnees", "Opérateur de saisie"];

        let vocational = filter_eligible_jobs(&registry, "data_ia", candidates.clone(), Some("Bac pro"));
        assert_eq!(vocational, vec!["Opérateur de saisie"]);

        let techno = filter_eligible_jobs(&registry, "data_ia", candidates.clone(), Some("Terminale technologique"));
        assert_eq!(techno, vec!["technicien de donnees", "Opérateur de saisie"]);

        let general = filter_eligible_jobs(&registry, "data_ia", candidates.clone(), Some("Terminale générale"));
        assert_eq!(general, candidates);
    }

    #[test]
    fn test_unknown_title_in_configured_sector_requires_general() {
        let registry = registry();
        let candidates = vec!["Chef de projet data"];

        let techno = filter_eligible_jobs(&registry, "data_ia", candidates.clone(), Some("Terminale technologique"));
        assert!(techno.is_empty());

        let general = filter_eligible_jobs(&registry, "data_ia", candidates, Some("Terminale générale"));
        assert_eq!(general.len(), 1);
    }

    #[test]
    fn test_unconfigured_sector_is_permissive() {
        let registry = registry();
        let candidates = vec!["Data analyst".to_string()];

        let result = filter_eligible_jobs(&registry, "open", candidates.clone(), Some("CAP professionnel"));
        assert_eq!(result, candidates);

        let blocked = filter_eligible_jobs(&registry, "data_ia", candidates, Some("CAP professionnel"));
        assert!(blocked.is_empty());
    }
}
