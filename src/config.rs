//! Service configuration from the environment

use std::fmt;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Configuration for the provider lookup
#[derive(Clone)]
pub struct PlacesConfig {
    /// Google Places API key; `None` when unset or empty
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_PLACES_URL.to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Sessions idle this long are dropped when the next one is created
    pub session_idle_timeout: Duration,
    pub places: PlacesConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = var("GOOGLE_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = var("ACESO_PLACES_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLACES_URL.to_string());

        let port = parse_or("ACESO_PORT", var("ACESO_PORT"), DEFAULT_PORT);

        let timeout = positive_secs("ACESO_LOOKUP_TIMEOUT_SECS", var("ACESO_LOOKUP_TIMEOUT_SECS"))
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT);

        let session_idle_timeout =
            positive_secs("ACESO_SESSION_IDLE_SECS", var("ACESO_SESSION_IDLE_SECS"))
                .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT);

        Self {
            port,
            session_idle_timeout,
            places: PlacesConfig {
                api_key,
                base_url,
                timeout,
            },
        }
    }
}

/// A whole number of seconds; zero and garbage count as unset
fn positive_secs(name: &str, raw: Option<String>) -> Option<Duration> {
    raw.map(|raw| parse_or(name, Some(raw), 0u64))
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

fn parse_or<T: std::str::FromStr + Copy + fmt::Display>(name: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(variable = name, value = %raw, default = %default, "Ignoring unparsable setting");
        default
    })
}
