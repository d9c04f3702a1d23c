use std::sync::Arc;

use crate::services::Recommender;

/// Shared application state
///
/// The recommender is immutable once built, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}
