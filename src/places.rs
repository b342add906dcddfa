//! Healthcare provider lookup
//!
//! Provides a common interface for place-search backends and the Google
//! Places text search implementation.

mod error;
mod google;
mod types;

pub use error::{LookupError, LookupErrorKind};
pub use google::GooglePlacesClient;
pub use types::Provider;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for provider search backends
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Look up providers near `location`, at most `MAX_PROVIDERS` of them
    async fn lookup(&self, location: &str) -> Result<Vec<Provider>, LookupError>;
}

#[async_trait]
impl<T: PlaceSearch + ?Sized> PlaceSearch for Arc<T> {
    async fn lookup(&self, location: &str) -> Result<Vec<Provider>, LookupError> {
        (**self).lookup(location).await
    }
}

/// Logging wrapper for place search backends
pub struct LoggingSearch {
    inner: Arc<dyn PlaceSearch>,
}

impl LoggingSearch {
    pub fn new(inner: Arc<dyn PlaceSearch>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PlaceSearch for LoggingSearch {
    async fn lookup(&self, location: &str) -> Result<Vec<Provider>, LookupError> {
        let start = std::time::Instant::now();
        let result = self.inner.lookup(location).await;
        let duration = start.elapsed();

        match &result {
            Ok(providers) => {
                tracing::info!(
                    location = %location,
                    duration_ms = %duration.as_millis(),
                    providers = providers.len(),
                    "Provider lookup completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    location = %location,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Provider lookup failed"
                );
            }
        }

        result
    }
}
