//! Error taxonomy for the balance client.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the loaded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read or deserialized.
    #[error("failed to load config {path}: {source}")]
    Load {
        /// File the configuration was read from.
        path: PathBuf,
        /// Underlying loader error.
        #[source]
        source: ::config::ConfigError,
    },
    /// A required field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// A field holds a value that cannot be used.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable reason.
        reason: String,
    },
}

/// Fatal failures of a balance run.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Network failure talking to the billing API.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint that was being called.
        endpoint: &'static str,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },
    /// The billing API answered with a body that could not be decoded.
    #[error("malformed {endpoint} response: {source}")]
    Decode {
        /// Endpoint whose answer was malformed.
        endpoint: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The authentication endpoint returned a non-success status.
    #[error("authentication failed (code {code}): {message}")]
    AuthenticationFailed {
        /// Status code reported by the server.
        code: i64,
        /// Last error message reported by the server.
        message: String,
    },
    /// No contract number contains the configured filter.
    #[error("contract {0} not found")]
    ContractNotFound(String),
    /// The server returned no contracts at all.
    #[error("account has no contracts")]
    EmptyContractList,
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Session cache failures. Both variants are recoverable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cache file is absent, unreadable or malformed.
    #[error("no usable session cached at {path}: {reason}")]
    NotFound {
        /// Cache file location.
        path: PathBuf,
        /// Why the file could not be used.
        reason: String,
    },
    /// The cache file could not be written.
    #[error("failed to write session cache {path}: {source}")]
    Write {
        /// Cache file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for results carrying [`BalanceError`].
pub type Result<T, E = BalanceError> = std::result::Result<T, E>;
