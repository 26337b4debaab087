//! Process-wide resource cache
//!
//! Loaded on first use, never reloaded. A failed load is cached too: the
//! operator has to fix the artifacts and restart the process.

use once_cell::sync::OnceCell;

use super::storage::{load_resources, ArtifactPaths, Resources};
use super::ArtifactError;
use crate::error::EvaluationError;

pub struct ResourceCache {
    paths: ArtifactPaths,
    cell: OnceCell<Result<Resources, ArtifactError>>,
}

impl ResourceCache {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self { paths, cell: OnceCell::new() }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Load on first call, then return the cached outcome
    pub fn get(&self) -> Result<&Resources, &ArtifactError> {
        self.cell
            .get_or_init(|| {
                log::info!("Loading artifacts from {}", self.paths.model.display());
                let outcome = load_resources(&self.paths);
                match &outcome {
                    Ok(resources) => log::info!(
                        "Loaded {} with {} background rows (layout {})",
                        resources.info.model_structure,
                        resources.info.background_rows,
                        resources.info.layout_hash
                    ),
                    Err(e) => log::error!("Artifacts unavailable: {}", e),
                }
                outcome
            })
            .as_ref()
    }

    /// Resources, or `ResourcesUnavailable` carrying the load failure
    pub fn require(&self) -> Result<&Resources, EvaluationError> {
        self.get().map_err(|e| EvaluationError::ResourcesUnavailable(e.to_string()))
    }

    /// Cached outcome without triggering a load
    pub fn peek(&self) -> Option<Result<&Resources, &ArtifactError>> {
        self.cell.get().map(Result::as_ref)
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn is_available(&self) -> bool {
        self.get().is_ok()
    }
}
