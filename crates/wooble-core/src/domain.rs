//! Hostname allow-list.

use serde::{Deserialize, Serialize};

/// The hostnames a loader may run on.
///
/// An empty list places no restriction. Matching is exact, the way the page
/// reports `location.hostname`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowList(Vec<String>);

impl AllowList {
    /// An allow-list that permits every host.
    pub fn unrestricted() -> Self {
        Self(Vec::new())
    }

    /// Restrict to the given hosts.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(domains.into_iter().map(Into::into).collect())
    }

    /// Whether `hostname` may activate the loader.
    pub fn permits(&self, hostname: &str) -> bool {
        self.0.is_empty() || self.0.iter().any(|d| d == hostname)
    }

    pub fn is_restricted(&self) -> bool {
        !self.0.is_empty()
    }

    /// Allowed hosts in configured order.
    pub fn domains(&self) -> &[String] {
        &self.0
    }
}
