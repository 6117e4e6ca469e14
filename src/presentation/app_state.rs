// Application state for HTTP handlers
use crate::application::scoring_service::ScoringService;

#[derive(Clone)]
pub struct AppState {
    pub scoring_service: ScoringService,
    pub compress: bool,
}
