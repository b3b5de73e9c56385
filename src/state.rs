use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{CourseStore, HealthCheck, UserStore};

/// Shared per-application state handed to every handler.
///
/// Stores are injected as trait objects so the router runs unchanged over
/// Postgres or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub health: Arc<dyn HealthCheck>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: UserStore + CourseStore + HealthCheck + 'static,
    {
        Self {
            users: store.clone(),
            courses: store.clone(),
            health: store,
            config: Arc::new(config),
        }
    }
}
