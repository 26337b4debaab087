//! Evaluation response

use chrono::{DateTime, Utc};
use hfpef_risk_core::report::EvaluationReport;
use hfpef_risk_core::{Evaluation, Locale};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    #[serde(flatten)]
    pub report: EvaluationReport,
    /// Column order the model was scored in
    pub feature_order: Vec<&'static str>,
    pub inference_time_us: u64,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationResponse {
    pub fn new(evaluation: &Evaluation, locale: Locale) -> Self {
        Self {
            report: EvaluationReport::new(evaluation, locale),
            feature_order: evaluation.features.ids().iter().map(|id| id.as_str()).collect(),
            inference_time_us: evaluation.inference_time_us,
            evaluated_at: Utc::now(),
        }
    }
}
