pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_extract;
use crate::state::AppState;
use crate::validation::handlers::{handle_lexicon, handle_validate};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/validate", post(handle_validate))
        .route("/api/v1/extract", post(handle_extract))
        .route("/api/v1/lexicon", get(handle_lexicon))
        .with_state(state)
}
