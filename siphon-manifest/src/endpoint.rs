use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;

/// The `[endpoint]` table: where GraphQL requests go.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    /// GraphQL endpoint URL
    pub url: String,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// User agent string
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

impl EndpointConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub(crate) fn has_http_scheme(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}
