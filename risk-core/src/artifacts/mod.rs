//! Artifacts Module - Resource Loader
//!
//! - `storage` - reads classifier, background sample and feature order
//! - `background` - background sample shapes
//! - `cache` - load-once, read-many cache

pub mod background;
pub mod cache;
pub mod storage;


use std::path::PathBuf;

use thiserror::Error;

use crate::features::LayoutError;

// Re-export common types
pub use background::BackgroundSample;
pub use cache::ResourceCache;
pub use storage::{load_resources, ArtifactFingerprint, ArtifactPaths, ResourceInfo, Resources};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact files not found: {}", display_paths(.0))]
    Missing(Vec<PathBuf>),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid feature list: {0}")]
    Layout(#[from] LayoutError),

    #[error("invalid background sample: {0}")]
    InvalidBackground(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
