//! Loader configuration.

use serde::{Deserialize, Serialize};

use crate::domain::AllowList;
use crate::errors::ConfigError;

/// Shadow DOM and custom elements polyfill loaded when the page has no native
/// `attachShadow`.
pub const DEFAULT_POLYFILL_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/webcomponentsjs/1.0.14/webcomponents-sd-ce.js";

/// Settings shared by every handle a loader creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    /// Hosts allowed to run the loader. Empty means any host.
    pub allowed_domains: AllowList,
    /// Script fetched to provide shadow DOM support.
    pub polyfill_url: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            allowed_domains: AllowList::unrestricted(),
            polyfill_url: DEFAULT_POLYFILL_URL.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the loader to the given hosts.
    pub fn secure<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = AllowList::new(domains);
        self
    }

    /// Use a different polyfill script.
    pub fn with_polyfill_url(mut self, url: impl Into<String>) -> Self {
        self.polyfill_url = url.into();
        self
    }

    /// Parse configuration from JSON text. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
