//! Background sample artifact
//!
//! Accepted JSON shapes:
//! - rows of numbers, columns ordered like `feature_names.json`
//! - rows of objects keyed by feature identifier

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2};
use serde::Deserialize;

use super::ArtifactError;
use crate::features::FeatureLayout;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawBackground {
    Rows(Vec<Vec<f64>>),
    Records(Vec<BTreeMap<String, f64>>),
}

/// Immutable reference distribution for attribution
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundSample {
    matrix: Array2<f64>,
}

impl BackgroundSample {
    pub fn new(matrix: Array2<f64>) -> Self {
        Self { matrix }
    }

    pub fn from_raw(raw: RawBackground, layout: &FeatureLayout) -> Result<Self, ArtifactError> {
        match raw {
            RawBackground::Rows(rows) => Self::from_rows(rows),
            RawBackground::Records(records) => Self::from_records(records, layout),
        }
    }

    /// Rows must be rectangular; their width is checked against the model later
    fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ArtifactError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ArtifactError::InvalidBackground(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                width
            )));
        }

        let height = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| ArtifactError::InvalidBackground(e.to_string()))?;
        Ok(Self { matrix })
    }

    fn from_records(records: Vec<BTreeMap<String, f64>>, layout: &FeatureLayout) -> Result<Self, ArtifactError> {
        let mut flat = Vec::with_capacity(records.len() * layout.len());
        for (i, record) in records.iter().enumerate() {
            for name in layout.names() {
                let value = record.get(name).ok_or_else(|| {
                    ArtifactError::InvalidBackground(format!("record {} has no '{}'", i, name))
                })?;
                flat.push(*value);
            }
        }

        let matrix = Array2::from_shape_vec((records.len(), layout.len()), flat)
            .map_err(|e| ArtifactError::InvalidBackground(e.to_string()))?;
        Ok(Self { matrix })
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn columns(&self) -> usize {
        self.matrix.ncols()
    }
}
