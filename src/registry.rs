use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::core::filters::normalize_title;
use crate::models::{JobReference, SectorJobConfig, SectorReference, TrackLevel};

/// Reference data bundled with the crate
const BUILTIN_REFERENCE: &str = include_str!("../config/reference.toml");

/// Errors that can occur while loading reference data
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{owner} references unknown sector: {sector_id}")]
    UnknownSector { owner: String, sector_id: String },
}

/// Safe sectors indexed by track level (vocational, technological, general)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackConfig {
    pub safe_sectors: [String; 3],
}

/// On-disk shape of the reference data
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDocument {
    #[serde(default)]
    #[validate(nested)]
    pub sectors: Vec<SectorReference>,
    #[serde(default)]
    #[validate(nested)]
    pub jobs: Vec<JobReference>,
    #[serde(default)]
    #[validate(nested)]
    pub sector_jobs: Vec<SectorJobConfig>,
    pub fallback: FallbackConfig,
}

/// Immutable sector/job reference tables
///
/// Built once at startup and passed by reference to the matching functions. Sectors
/// and jobs are keyed by id in ordered maps, so every scan runs in ascending id order.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    sectors: BTreeMap<String, SectorReference>,
    jobs: BTreeMap<String, JobReference>,
    sector_jobs: BTreeMap<String, SectorJobConfig>,
    // sector id -> normalized title -> min track
    title_index: HashMap<String, HashMap<String, TrackLevel>>,
    safe_sectors: [String; 3],
}

impl ReferenceRegistry {
    /// Build a registry from a parsed document, checking ids and cross references
    pub fn from_document(document: ReferenceDocument) -> Result<Self, RegistryError> {
        document.validate()?;

        let mut sectors = BTreeMap::new();
        for sector in document.sectors {
            if sectors.contains_key(&sector.id) {
                return Err(RegistryError::DuplicateId { kind: "sector", id: sector.id });
            }
            sectors.insert(sector.id.clone(), sector);
        }

        let mut jobs = BTreeMap::new();
        for job in document.jobs {
            if !sectors.contains_key(&job.sector_id) {
                return Err(RegistryError::UnknownSector {
                    owner: format!("job {}", job.id),
                    sector_id: job.sector_id,
                });
            }
            if jobs.contains_key(&job.id) {
                return Err(RegistryError::DuplicateId { kind: "job", id: job.id });
            }
            jobs.insert(job.id.clone(), job);
        }

        let mut sector_jobs = BTreeMap::new();
        let mut title_index = HashMap::new();
        for config in document.sector_jobs {
            if !sectors.contains_key(&config.sector_id) {
                return Err(RegistryError::UnknownSector {
                    owner: "job configuration".to_string(),
                    sector_id: config.sector_id,
                });
            }
            if sector_jobs.contains_key(&config.sector_id) {
                return Err(RegistryError::DuplicateId {
                    kind: "job configuration",
                    id: config.sector_id,
                });
            }

            let mut titles = HashMap::with_capacity(config.jobs.len());
            for job in &config.jobs {
                // First entry wins when two titles normalize to the same key
                titles.entry(normalize_title(&job.title)).or_insert(job.min_track);
            }
            title_index.insert(config.sector_id.clone(), titles);
            sector_jobs.insert(config.sector_id.clone(), config);
        }

        for sector_id in &document.fallback.safe_sectors {
            if !sectors.contains_key(sector_id) {
                return Err(RegistryError::UnknownSector {
                    owner: "fallback table".to_string(),
                    sector_id: sector_id.clone(),
                });
            }
        }

        tracing::info!(
            "Reference registry loaded: {} sectors, {} jobs, {} configured sectors",
            sectors.len(),
            jobs.len(),
            sector_jobs.len()
        );

        Ok(Self {
            sectors,
            jobs,
            sector_jobs,
            title_index,
            safe_sectors: document.fallback.safe_sectors,
        })
    }

    /// Parse reference data from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, RegistryError> {
        let document: ReferenceDocument = toml::from_str(source)?;
        Self::from_document(document)
    }

    /// Load reference data from a TOML file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loading reference data from {}", path.as_ref().display());
        Self::from_toml_str(&source)
    }

    /// Reference data bundled with the crate
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUILTIN_REFERENCE)
    }

    /// All sectors in ascending id order
    pub fn sectors(&self) -> impl Iterator<Item = &SectorReference> {
        self.sectors.values()
    }

    pub fn sector(&self, sector_id: &str) -> Option<&SectorReference> {
        self.sectors.get(sector_id)
    }

    pub fn job(&self, job_id: &str) -> Option<&JobReference> {
        self.jobs.get(job_id)
    }

    /// Jobs owned by a sector, in ascending id order
    pub fn jobs_in_sector<'a>(&'a self, sector_id: &'a str) -> impl Iterator<Item = &'a JobReference> + 'a {
        self.jobs.values().filter(move |job| job.sector_id == sector_id)
    }

    pub fn sector_job_config(&self, sector_id: &str) -> Option<&SectorJobConfig> {
        self.sector_jobs.get(sector_id)
    }

    /// Whether the sector has a job configuration at all
    pub fn is_configured(&self, sector_id: &str) -> bool {
        self.sector_jobs.contains_key(sector_id)
    }

    /// Min track of a configured job, looked up by normalized title
    pub fn title_min_track(&self, sector_id: &str, normalized_title: &str) -> Option<TrackLevel> {
        self.title_index
            .get(sector_id)
            .and_then(|titles| titles.get(normalized_title))
            .copied()
    }

    /// Number of configured jobs visible at the given level; 0 for unconfigured sectors
    pub fn eligible_job_count(&self, sector_id: &str, level: TrackLevel) -> usize {
        self.sector_jobs
            .get(sector_id)
            .map(|config| config.eligible_count(level))
            .unwrap_or(0)
    }

    /// Default sector known to offer jobs at the given level
    pub fn safe_sector_for(&self, level: TrackLevel) -> &str {
        &self.safe_sectors[level.index()]
    }
}
