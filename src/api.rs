//! HTTP API for Aceso sessions

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::places::PlaceSearch;
use crate::runtime::SessionManager;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(places: Arc<dyn PlaceSearch>, session_idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(places).with_idle_timeout(session_idle_timeout)),
        }
    }
}
