//! Evaluation API handler

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use hfpef_risk_core::{evaluate, PatientInput};

use crate::{AppState, AppError, AppResult};
use crate::models::{EvaluationResponse, LangQuery};

/// Score one patient. Attribution failures are reported inside the body.
pub async fn evaluate_patient(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    payload: Result<Json<PatientInput>, JsonRejection>,
) -> AppResult<Json<EvaluationResponse>> {
    let Json(input) = payload.map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
    let locale = query.locale(state.config.default_locale);
    let resources = state.cache_ready().await?;
    let evaluation = evaluate(resources, &input)?;

    Ok(Json(EvaluationResponse::new(&evaluation, locale)))
}
