//! Error types for tecnodns
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for tecnodns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for provider modules
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (registry, module construction, client setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config-block syntax errors, with the position of the offending token
    #[error("{file}:{line} - Error during parsing: {message}")]
    Syntax {
        /// Name of the file the token came from
        file: String,
        /// 1-based line of the token
        line: usize,
        /// Human-readable description
        message: String,
    },

    /// I/O errors (reading config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Zone or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// A record operation was called before `provision`
    #[error("Module not provisioned: {0}")]
    NotProvisioned(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a syntax error at the given position
    pub fn syntax(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a "not provisioned" error for the given module ID
    pub fn not_provisioned(module: impl Into<String>) -> Self {
        Self::NotProvisioned(module.into())
    }
}
