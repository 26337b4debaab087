//! Feature Layout - column order of the trained model
//!
//! The training run records the order of its feature matrix columns in
//! `feature_names.json`. Every row handed to the classifier is arranged in
//! this order, never in form order.
//!
//! ## Rules:
//! 1. The layout must name each catalog feature exactly once.
//! 2. The CRC32 layout hash changes whenever the order changes.

use crc32fast::Hasher;
use serde::Serialize;
use thiserror::Error;

use super::catalog::{FeatureId, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unknown feature '{0}' in feature list")]
    UnknownFeature(String),

    #[error("feature '{0}' listed more than once")]
    Duplicate(String),

    #[error("feature list is missing: {}", .0.join(", "))]
    Missing(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLayout {
    ids: Vec<FeatureId>,
}

impl FeatureLayout {
    /// Build from the recorded identifier list
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, LayoutError> {
        let mut ids = Vec::with_capacity(FEATURE_COUNT);

        for name in names {
            let name = name.as_ref();
            let id = FeatureId::from_name(name)
                .ok_or_else(|| LayoutError::UnknownFeature(name.to_string()))?;
            if ids.contains(&id) {
                return Err(LayoutError::Duplicate(name.to_string()));
            }
            ids.push(id);
        }

        let missing: Vec<String> = FeatureId::ALL
            .iter()
            .filter(|id| !ids.contains(id))
            .map(|id| id.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LayoutError::Missing(missing));
        }

        Ok(Self { ids })
    }

    /// Layout identical to form order
    pub fn form_order() -> Self {
        Self { ids: FeatureId::ALL.to_vec() }
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.ids
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.ids.iter().map(|id| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Column of `id`
    pub fn position(&self, id: FeatureId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    /// CRC32 over the ordered identifiers
    pub fn hash(&self) -> u32 {
        let mut hasher = Hasher::new();
        for id in &self.ids {
            hasher.update(id.as_str().as_bytes());
            hasher.update(&[0]); // Separator
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names_permutation() {
        let mut names: Vec<&str> = FeatureId::ALL.iter().map(|id| id.as_str()).collect();
        names.reverse();

        let layout = FeatureLayout::from_names(&names).unwrap();
        assert_eq!(layout.len(), FEATURE_COUNT);
        assert_eq!(layout.ids()[0], FeatureId::HsCrp);
        assert_eq!(layout.position(FeatureId::Egfr), Some(FEATURE_COUNT - 1));
        assert_eq!(layout.names(), names);
    }

    #[test]
    fn test_reject_unknown_feature() {
        let err = FeatureLayout::from_names(&["egfr", "bmi"]).unwrap_err();
        assert_eq!(err, LayoutError::UnknownFeature("bmi".to_string()));
    }

    #[test]
    fn test_reject_duplicate() {
        let err = FeatureLayout::from_names(&["egfr", "egfr"]).unwrap_err();
        assert_eq!(err, LayoutError::Duplicate("egfr".to_string()));
    }

    #[test]
    fn test_reject_missing() {
        let names: Vec<&str> = FeatureId::ALL[..8].iter().map(|id| id.as_str()).collect();
        match FeatureLayout::from_names(&names) {
            Err(LayoutError::Missing(missing)) => {
                assert_eq!(missing, vec!["homocysteine".to_string(), "hs_crp".to_string()]);
            }
            other => panic!("Expected Missing error, got {:?}", other),
        }
    }

    #[test]
    fn test_hash_tracks_order() {
        let forward = FeatureLayout::form_order();
        let mut names = forward.names();
        assert_eq!(FeatureLayout::from_names(&names).unwrap().hash(), forward.hash());

        names.swap(0, 1);
        let swapped = FeatureLayout::from_names(&names).unwrap();
        assert_ne!(swapped.hash(), forward.hash());
    }
}
