//! Feature catalog handler

use axum::{extract::{Query, State}, Json};

use crate::AppState;
use crate::models::{CatalogResponse, LangQuery};

/// Input controls, grouped and localized
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Json<CatalogResponse> {
    Json(CatalogResponse::new(query.locale(state.config.default_locale)))
}
