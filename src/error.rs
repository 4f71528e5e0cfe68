// src/error.rs
// =============================================================================
// Typed errors for problems we can detect before a search starts.
//
// Everything that goes wrong *during* a search (timeouts, HTTP errors, broken
// HTML) is recovered inside the workers and never shows up here. A page that
// can't be fetched simply has zero links.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error for an enum
// - anyhow interop: these errors convert into anyhow::Error with `?`
// =============================================================================

use thiserror::Error;

/// Problems with the run configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required URL was blank
    #[error("{field} URL must not be empty")]
    EmptyUrl { field: &'static str },

    /// A URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ConfigError {
    /// Create an invalid-URL error from any displayable reason.
    pub fn invalid_url(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ConfigError::EmptyUrl { field: "start" };
        assert_eq!(err.to_string(), "start URL must not be empty");

        let err = ConfigError::invalid_url("nope", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Invalid URL 'nope': relative URL without a base"
        );
    }
}
