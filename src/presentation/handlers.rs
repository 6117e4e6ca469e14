// HTTP request handlers
use crate::domain::error::HliError;
use crate::domain::risk::{classify_risk, RiskTier};
use crate::domain::weather::WeatherObservation;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ClassifyQuery {
    pub hli: f64,
}

#[derive(Serialize)]
pub struct Classification {
    pub hli: f64,
    pub risk_tier: RiskTier,
    pub label: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

async fn respond<T: Serialize>(
    state: &AppState,
    headers: &HeaderMap,
    status: StatusCode,
    data: &T,
) -> Response {
    let compress = state.compress && accepts_brotli(headers);
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Invalid input is the caller's fault; anything else is ours.
async fn failure(state: &AppState, headers: &HeaderMap, err: anyhow::Error) -> Response {
    let status = if err.downcast_ref::<HliError>().is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        tracing::error!("Request failed: {:#}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let body = ErrorBody {
        error: format!("{:#}", err),
    };
    respond(state, headers, status, &body).await
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Scored observations for the configured source
pub async fn list_observations(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.scoring_service.score_source().await {
        Ok(report) => respond(&state, &headers, StatusCode::OK, &report.scored).await,
        Err(e) => failure(&state, &headers, e).await,
    }
}

/// Score a caller-supplied batch
pub async fn score_observations(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(observations): Json<Vec<WeatherObservation>>,
) -> Response {
    match state.scoring_service.score(observations).await {
        Ok(report) => respond(&state, &headers, StatusCode::OK, &report).await,
        Err(e) => failure(&state, &headers, e).await,
    }
}

pub async fn risk_summary(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.scoring_service.summary().await {
        Ok(summary) => respond(&state, &headers, StatusCode::OK, &summary).await,
        Err(e) => failure(&state, &headers, e).await,
    }
}

pub async fn hli_charts(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.scoring_service.charts().await {
        Ok(charts) => respond(&state, &headers, StatusCode::OK, &charts).await,
        Err(e) => failure(&state, &headers, e).await,
    }
}

pub async fn classify(
    Query(query): Query<ClassifyQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match classify_risk(query.hli) {
        Ok(risk_tier) => {
            let body = Classification {
                hli: query.hli,
                risk_tier,
                label: risk_tier.label(),
            };
            respond(&state, &headers, StatusCode::OK, &body).await
        }
        Err(e) => failure(&state, &headers, e.into()).await,
    }
}
