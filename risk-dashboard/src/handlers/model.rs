//! Model status handler

use axum::{extract::State, Json};
use hfpef_risk_core::constants::ENGINE_VERSION;

use crate::AppState;
use crate::models::{ArtifactLocations, LoadState, ModelStatus};

/// Artifact status, loading them if nothing was tried yet
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    state.load_artifacts().await;
    let outcome = state.cache.get();

    Json(ModelStatus {
        status: LoadState::of(Some(outcome)),
        reason: outcome.err().map(|e| e.to_string()),
        info: outcome.ok().map(|r| r.info.clone()),
        artifacts: ArtifactLocations::from(state.cache.paths()),
        engine_version: ENGINE_VERSION,
    })
}
