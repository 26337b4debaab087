//! Artifact storage - reads the three training artifacts from disk

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::background::{BackgroundSample, RawBackground};
use super::ArtifactError;
use crate::constants::{DEFAULT_BACKGROUND_FILE, DEFAULT_FEATURES_FILE, DEFAULT_MODEL_FILE};
use crate::features::FeatureLayout;
use crate::model::Classifier;

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub background: PathBuf,
    pub features: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(DEFAULT_MODEL_FILE),
            background: dir.join(DEFAULT_BACKGROUND_FILE),
            features: dir.join(DEFAULT_FEATURES_FILE),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [self.model.as_path(), self.background.as_path(), self.features.as_path()].into_iter()
    }

    pub fn missing(&self) -> Vec<PathBuf> {
        self.iter().filter(|p| !p.exists()).map(Path::to_path_buf).collect()
    }
}

/// SHA-256 of one artifact file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactFingerprint {
    pub file: String,
    pub sha256: String,
    pub bytes: usize,
}

impl ArtifactFingerprint {
    fn of(path: &Path, data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self {
            file: path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            sha256: hex::encode(hasher.finalize()),
            bytes: data.len(),
        }
    }
}

/// Facts about the loaded artifacts
#[derive(Debug, Clone, Serialize)]
pub struct ResourceInfo {
    pub model_kind: &'static str,
    pub model_structure: String,
    pub feature_names: Vec<&'static str>,
    pub layout_hash: String,
    pub background_rows: usize,
    pub fingerprints: Vec<ArtifactFingerprint>,
    pub loaded_at: DateTime<Utc>,
}

/// Classifier, background sample and feature order, loaded together
#[derive(Debug, Clone)]
pub struct Resources {
    pub classifier: Classifier,
    pub background: BackgroundSample,
    pub layout: FeatureLayout,
    pub info: ResourceInfo,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<(T, ArtifactFingerprint), ArtifactError> {
    let data = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&data).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((value, ArtifactFingerprint::of(path, &data)))
}

/// Load all three artifacts. Missing files are reported together.
pub fn load_resources(paths: &ArtifactPaths) -> Result<Resources, ArtifactError> {
    let missing = paths.missing();
    if !missing.is_empty() {
        return Err(ArtifactError::Missing(missing));
    }

    let (names, features_print): (Vec<String>, _) = read_json(&paths.features)?;
    let layout = FeatureLayout::from_names(&names)?;

    let (classifier, model_print): (Classifier, _) = read_json(&paths.model)?;

    let (raw, background_print): (RawBackground, _) = read_json(&paths.background)?;
    let background = BackgroundSample::from_raw(raw, &layout)?;

    let info = ResourceInfo {
        model_kind: classifier.kind(),
        model_structure: classifier.describe(),
        feature_names: layout.names(),
        layout_hash: format!("{:08x}", layout.hash()),
        background_rows: background.rows(),
        fingerprints: vec![model_print, background_print, features_print],
        loaded_at: Utc::now(),
    };

    Ok(Resources { classifier, background, layout, info })
}
