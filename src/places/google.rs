//! Google Places text search implementation

use super::types::TextSearchResponse;
use super::{LookupError, PlaceSearch, Provider};
use crate::config::PlacesConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Only the top results are shown to the user
pub const MAX_PROVIDERS: usize = 3;

const PLACE_TYPES: &str = "doctor|hospital";

/// Google Places service implementation
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn transport_error(&self, e: reqwest::Error) -> LookupError {
        // The request URL carries the API key
        let e = e.without_url();
        if e.is_timeout() {
            LookupError::timeout(format!("Provider search timed out after {:?}", self.timeout))
        } else if e.is_connect() {
            LookupError::network(format!("Connection failed: {e}"))
        } else {
            LookupError::network(format!("Request failed: {e}"))
        }
    }
}

/// Free-text query sent to the search endpoint
pub fn build_query(location: &str) -> String {
    format!("doctors OR hospitals near {location}")
}

fn check_payload_status(payload: &TextSearchResponse) -> Result<(), LookupError> {
    match payload.status.as_deref() {
        None | Some("OK" | "ZERO_RESULTS") => Ok(()),
        Some(status) => Err(LookupError::service(match &payload.error_message {
            Some(detail) => format!("{status}: {detail}"),
            None => status.to_string(),
        })),
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn lookup(&self, location: &str) -> Result<Vec<Provider>, LookupError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LookupError::configuration(
                "Google API key not found. Set GOOGLE_API_KEY to enable provider search.",
            ));
        };

        let query = build_query(location);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query.as_str()), ("key", api_key), ("type", PLACE_TYPES)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(LookupError::service(format!("HTTP {status}")));
        }

        let payload: TextSearchResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::invalid_response(format!("Failed to parse response: {e}")))?;
        check_payload_status(&payload)?;

        Ok(payload
            .results
            .into_iter()
            .take(MAX_PROVIDERS)
            .map(Provider::from)
            .collect())
    }
}
