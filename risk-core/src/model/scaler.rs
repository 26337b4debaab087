//! Standardization transform fitted at training time

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::inference::ModelError;
use super::linear::check_width;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// `(x - mean) / scale`, column-wise. Zero scales act as 1.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if self.scale.len() != self.mean.len() {
            return Err(ModelError::MalformedStep(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        check_width(x, self.n_features())?;

        let mean = ArrayView1::from(&self.mean[..]);
        let scale: Array1<f64> = self.scale.iter()
            .map(|&s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok((&x - &mean) / &scale)
    }
}
