use std::sync::Arc;

use crate::config::Config;
use crate::validation::slop::SlopDetector;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable slop detector. Default: PhraseSlopDetector.
    pub slop_detector: Arc<dyn SlopDetector>,
}
