//! Error handling for scan configuration and setup.
//!
//! Lookups that fail during a scan are never surfaced through this type:
//! they are classified into a [`LookupOutcome`](crate::LookupOutcome) and
//! counted as registered. Only problems that must stop a scan before any
//! network activity end up here.

use thiserror::Error;

/// Main error type for domain sweep operations.
#[derive(Debug, Clone, Error)]
pub enum DomainSweepError {
    /// Name length outside the supported range
    #[error("Invalid name length {length}: only {min} to {max} letters are supported")]
    InvalidLength { length: usize, min: usize, max: usize },

    /// Malformed top-level domain
    #[error("Invalid TLD '{tld}': {reason}")]
    InvalidTld { tld: String, reason: String },

    /// No TLD left to scan after normalization
    #[error("At least one TLD must be selected")]
    EmptyTldSet,

    /// Batch size or worker count out of range
    #[error("Invalid strategy: {message}")]
    InvalidStrategy { message: String },

    /// Configuration errors (invalid settings, unparsable files, etc.)
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File I/O errors when reading configuration
    #[error("File error at '{path}': {message}")]
    FileError { path: String, message: String },

    /// Failure to build the HTTP client
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Generic internal errors that don't fit other categories
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainSweepError {
    /// Create a new invalid TLD error.
    pub fn invalid_tld<T: Into<String>, R: Into<String>>(tld: T, reason: R) -> Self {
        Self::InvalidTld {
            tld: tld.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid strategy error.
    pub fn invalid_strategy<M: Into<String>>(message: M) -> Self {
        Self::InvalidStrategy {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error was caused by caller-supplied settings.
    ///
    /// Configuration errors are blocking: they are reported before any lookup
    /// is issued and never produce partial results.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. }
                | Self::InvalidTld { .. }
                | Self::EmptyTldSet
                | Self::InvalidStrategy { .. }
                | Self::ConfigError { .. }
                | Self::FileError { .. }
        )
    }
}

impl From<reqwest::Error> for DomainSweepError {
    fn from(err: reqwest::Error) -> Self {
        Self::network(format!("Failed to create RDAP HTTP client: {}", err))
    }
}

impl From<toml::de::Error> for DomainSweepError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML configuration: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = DomainSweepError::InvalidLength {
            length: 5,
            min: 3,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "Invalid name length 5: only 3 to 4 letters are supported"
        );
        assert_eq!(
            DomainSweepError::invalid_tld("c-m.", "contains a dot").to_string(),
            "Invalid TLD 'c-m.': contains a dot"
        );
    }

    #[test]
    fn test_conversions() {
        let toml_err = toml::from_str::<toml::Table>("a = ").unwrap_err();
        let err = DomainSweepError::from(toml_err);
        assert!(matches!(err, DomainSweepError::ConfigError { .. }));

        let http_err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = DomainSweepError::from(http_err);
        assert!(matches!(err, DomainSweepError::NetworkError { .. }));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_classification() {
        assert!(DomainSweepError::EmptyTldSet.is_config_error());
        assert!(DomainSweepError::invalid_strategy("zero workers").is_config_error());
        assert!(!DomainSweepError::network("tls backend missing").is_config_error());
        assert!(!DomainSweepError::internal("boom").is_config_error());
    }
}
