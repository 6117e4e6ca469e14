// HTTP routing
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    classify, health_check, hli_charts, list_observations, risk_summary, score_observations,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/observations", get(list_observations))
        .route("/score", post(score_observations))
        .route("/summary", get(risk_summary))
        .route("/chart", get(hli_charts))
        .route("/classify", get(classify))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
