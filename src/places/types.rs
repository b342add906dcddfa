//! Provider records and the Places text search payload

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_ADDRESS: &str = "Address not available";

/// A healthcare provider returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub address: String,
}

impl Provider {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.address)
    }
}

// Google Places API types

#[derive(Debug, Deserialize)]
pub(super) struct TextSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaceResult {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
}

impl From<PlaceResult> for Provider {
    fn from(place: PlaceResult) -> Self {
        Provider {
            name: place.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            address: place
                .formatted_address
                .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        }
    }
}
