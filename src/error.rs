// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for limpet
//!
//! Every failure is surfaced to the immediate caller with enough context to
//! tell a configuration mistake (bad host, bad credentials) from a transient
//! network problem. Nothing is retried internally.

use thiserror::Error;

/// Result type alias for limpet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for limpet
#[derive(Error, Debug)]
pub enum Error {
    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Host is not usable as a base for request URLs
    #[error("Invalid host '{host}': {reason}")]
    Host { host: String, reason: String },

    /// Request construction failed
    #[error("Failed to build request: {0}")]
    Build(String),

    /// Network/connection error from the underlying client
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be fully read
    #[error("Failed to read response body from {url}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Login response lacked the expected session token
    #[error("Login to {url} rejected: no cookie matching '{cookie_name}' in response, possibly bad credentials")]
    AuthRejected { url: String, cookie_name: String },

    /// Relogin requested before any successful login
    #[error("No login credentials remembered; log in first")]
    NoCredentials,
}

impl Error {
    /// Create a host validation error
    pub fn host(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Host {
            host: host.into(),
            reason: reason.into(),
        }
    }

    /// Create a request construction error
    pub fn build<S: Into<String>>(msg: S) -> Self {
        Error::Build(msg.into())
    }

    /// Create a body read error
    pub fn body_read(url: impl Into<String>, source: reqwest::Error) -> Self {
        Error::BodyRead {
            url: url.into(),
            source,
        }
    }

    /// Create an authentication rejection error
    pub fn auth_rejected(url: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Error::AuthRejected {
            url: url.into(),
            cookie_name: cookie_name.into(),
        }
    }

    /// Check if this is a transport-level error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::BodyRead { .. })
    }

    /// Check if this is a rejected login
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Error::AuthRejected { .. })
    }

    /// Check if this is recoverable by retrying the call
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::BodyRead { .. } | Error::AuthRejected { .. }
        )
    }

    /// Get URL context if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::BodyRead { url, .. } => Some(url),
            Error::AuthRejected { url, .. } => Some(url),
            Error::Host { host, .. } => Some(host),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_rejected() {
        let err = Error::auth_rejected("https://example.com/login", "PHPSESSID");

        assert!(err.is_auth_rejected());
        assert!(err.is_recoverable());
        assert_eq!(err.url(), Some("https://example.com/login"));
        assert!(err.to_string().contains("PHPSESSID"));
    }

    #[test]
    fn test_host_error() {
        let err = Error::host("data:text/plain,hi", "expected scheme and authority");

        assert!(!err.is_transport());
        assert_eq!(err.url(), Some("data:text/plain,hi"));
    }

    #[test]
    fn test_no_credentials() {
        let err = Error::NoCredentials;

        assert!(!err.is_recoverable());
        assert_eq!(err.url(), None);
    }
}
