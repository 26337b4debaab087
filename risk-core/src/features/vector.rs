//! Feature Vector - one patient row in model column order

use ndarray::{Array1, Array2};
use serde::Serialize;

use super::catalog::FeatureId;
use super::input::PatientInput;
use super::layout::FeatureLayout;

/// Immutable row arranged by a `FeatureLayout`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    ids: Vec<FeatureId>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Reorder the input by name into the layout's column order
    pub fn arrange(input: &PatientInput, layout: &FeatureLayout) -> Self {
        let ids = layout.ids().to_vec();
        let values = ids.iter().map(|&id| input.get(id)).collect();
        Self { ids, values }
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.ids
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<f64> {
        self.ids.iter().position(|&i| i == id).map(|i| self.values[i])
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(self.values.clone())
    }

    /// Single-row matrix, shape `(1, n)`
    pub fn to_row(&self) -> Array2<f64> {
        self.to_array().insert_axis(ndarray::Axis(0))
    }

    /// JSON form for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = self.ids.iter()
            .zip(self.values.iter())
            .map(|(id, value)| (id.as_str().to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(named)
    }
}
