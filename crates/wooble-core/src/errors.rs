//! Error types for the Wooble loader.

use thiserror::Error;

/// Failures the loader reports while constructing a handle or running `init`.
///
/// All variants are cheap to clone so a single outcome can be handed to every
/// caller waiting on the same polyfill load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("Domain restricted: {hostname} is not an allowed host")]
    DomainRestricted { hostname: String },

    #[error("Creation {id} not found")]
    UnknownComponentId { id: String },

    #[error("Element {selector} not found in the document")]
    TargetNotFound { selector: String },

    #[error("Failed to load polyfill from {url}: {reason}")]
    PolyfillLoadFailed { url: String, reason: String },

    #[error("Failed to instantiate creation {id}: {reason}")]
    Instantiation { id: String, reason: String },
}

impl LoaderError {
    /// The line written to the host console for this failure.
    ///
    /// Only the three conditions that abort before any asynchronous work have
    /// a console line; the others surface through the returned future.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            LoaderError::DomainRestricted { .. } => {
                Some("Wooble error : domain restricted".to_string())
            }
            LoaderError::UnknownComponentId { id } => {
                Some(format!("Wooble error : creation {} not found", id))
            }
            LoaderError::TargetNotFound { selector } => {
                Some(format!("Wooble error : Element {} not found in the document", selector))
            }
            LoaderError::PolyfillLoadFailed { .. } | LoaderError::Instantiation { .. } => None,
        }
    }
}

/// Errors while building a component registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Creation {id} is already registered")]
    DuplicateComponent { id: String },
}

/// Errors while reading loader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_lines() {
        let restricted = LoaderError::DomainRestricted { hostname: "evil.com".into() };
        insta::assert_snapshot!(
            restricted.diagnostic().unwrap(),
            @"Wooble error : domain restricted"
        );

        let unknown = LoaderError::UnknownComponentId { id: "slider".into() };
        insta::assert_snapshot!(
            unknown.diagnostic().unwrap(),
            @"Wooble error : creation slider not found"
        );

        let missing = LoaderError::TargetNotFound { selector: "#app".into() };
        insta::assert_snapshot!(
            missing.diagnostic().unwrap(),
            @"Wooble error : Element #app not found in the document"
        );
    }

    #[test]
    fn test_async_failures_have_no_console_line() {
        let polyfill = LoaderError::PolyfillLoadFailed {
            url: "https://cdn.example/sd.js".into(),
            reason: "network".into(),
        };
        assert!(polyfill.diagnostic().is_none());
        assert_eq!(
            polyfill.to_string(),
            "Failed to load polyfill from https://cdn.example/sd.js: network"
        );
    }
}
