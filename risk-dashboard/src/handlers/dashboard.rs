//! Dashboard page handlers

use axum::{
    extract::{rejection::FormRejection, Form, Query, State},
    http::StatusCode,
    response::Html,
};
use hfpef_risk_core::report::EvaluationReport;
use hfpef_risk_core::{evaluate, EvaluationError, Locale, PatientInput};

use crate::{AppState, AppError};
use crate::error::describe_validation;
use crate::models::LangQuery;
use crate::views::{Banner, BannerLevel, DashboardPage};

/// Localized banner for a failed evaluation
fn banner_for(err: &EvaluationError, locale: Locale) -> Banner {
    let strings = locale.strings();
    let message = match err {
        EvaluationError::ResourcesUnavailable(reason) => format!("{} ({})", strings.resources_unavailable, reason),
        EvaluationError::InvalidInput(errors) => format!("{}: {}", strings.invalid_input, describe_validation(errors)),
        EvaluationError::InferenceFailed(e) => format!("{}: {}", strings.inference_failed, e),
        EvaluationError::AttributionFailed(e) => format!("{}: {}", strings.attribution_failed, e),
    };
    let level = match err {
        EvaluationError::InvalidInput(_) => BannerLevel::Warning,
        _ => BannerLevel::Error,
    };
    Banner { level, message }
}

/// Form prefilled with defaults, or the unavailable banner
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> (StatusCode, Html<String>) {
    let locale = query.locale(state.config.default_locale);
    let input = PatientInput::default();

    let (status, banner) = match state.cache_ready().await {
        Ok(_) => (StatusCode::OK, None),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, Some(banner_for(&err, locale))),
    };

    let page = DashboardPage {
        locale,
        input: &input,
        evaluate_enabled: banner.is_none(),
        banner,
        report: None,
    };
    (status, Html(page.to_string()))
}

/// Evaluate the submitted form and render the results next to it
pub async fn submit(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    payload: Result<Form<PatientInput>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let locale = query.locale(state.config.default_locale);

    let input = match payload {
        Ok(Form(input)) => input,
        Err(rejection) => {
            let banner = Banner {
                level: BannerLevel::Warning,
                message: format!("{}: {}", locale.strings().unreadable_input, rejection.body_text()),
            };
            tracing::warn!("Form rejected: {}", banner.message);

            let input = PatientInput::default();
            let page = DashboardPage {
                locale,
                input: &input,
                banner: Some(banner),
                report: None,
                evaluate_enabled: true,
            };
            return (StatusCode::BAD_REQUEST, Html(page.to_string()));
        }
    };

    let outcome = match state.cache_ready().await {
        Ok(resources) => evaluate(resources, &input),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(evaluation) => {
            let report = EvaluationReport::new(&evaluation, locale);
            let page = DashboardPage {
                locale,
                input: &input,
                banner: None,
                report: Some(&report),
                evaluate_enabled: true,
            };
            (StatusCode::OK, Html(page.to_string()))
        }
        Err(err) => {
            let banner = banner_for(&err, locale);
            let evaluate_enabled = !matches!(err, EvaluationError::ResourcesUnavailable(_));
            let status = AppError::from(err).status();
            tracing::warn!("Evaluation rejected ({}): {}", status, banner.message);

            let page = DashboardPage {
                locale,
                input: &input,
                banner: Some(banner),
                report: None,
                evaluate_enabled,
            };
            (status, Html(page.to_string()))
        }
    }
}
