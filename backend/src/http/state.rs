//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::RandomSource;
use crate::services::AggregationFacade;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Facade over the validated, read-only configuration
    pub facade: Arc<AggregationFacade>,
    /// How each request seeds its generators
    pub random: RandomSource,
}

impl AppState {
    /// Create a new application state with the given facade.
    pub fn new(facade: Arc<AggregationFacade>, random: RandomSource) -> Self {
        Self { facade, random }
    }
}
