//! Artifact status

use std::path::Path;

use hfpef_risk_core::artifacts::{ArtifactError, ResourceInfo};
use hfpef_risk_core::{ArtifactPaths, Resources};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Pending,
    Loaded,
    Unavailable,
}

impl LoadState {
    pub fn of(outcome: Option<Result<&Resources, &ArtifactError>>) -> Self {
        match outcome {
            None => LoadState::Pending,
            Some(Ok(_)) => LoadState::Loaded,
            Some(Err(_)) => LoadState::Unavailable,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArtifactLocations {
    pub model: String,
    pub background: String,
    pub features: String,
}

impl From<&ArtifactPaths> for ArtifactLocations {
    fn from(paths: &ArtifactPaths) -> Self {
        let show = |p: &Path| p.display().to_string();
        Self {
            model: show(&paths.model),
            background: show(&paths.background),
            features: show(&paths.features),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub status: LoadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ResourceInfo>,
    pub artifacts: ArtifactLocations,
    pub engine_version: &'static str,
}
