//! Resource guard middleware

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::Response,
};

use crate::{AppState, AppError};

/// Middleware: reject evaluation requests while the artifacts are unavailable.
/// Triggers the load on first use.
pub async fn require_resources(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    state.cache_ready().await?;
    Ok(next.run(req).await)
}
