//! Error types for chart repository operations

use std::path::PathBuf;

use thiserror::Error;

/// Chart repository operation errors
///
/// A final HTTP response with a non-2xx status is never an error at this
/// level: callers receive the response and decide what to do with it.
#[derive(Debug, Error)]
pub enum RepoError {
    // ============ Configuration Errors ============
    #[error("Repository not found: {name}")]
    RepositoryNotFound { name: String },

    #[error("Invalid repository URL: {url} - {reason}")]
    InvalidRepositoryUrl { url: String, reason: String },

    #[error("Invalid client configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Network Errors ============
    #[error("Transport error: {message}")]
    Transport { message: String },

    // ============ Authentication Errors ============
    #[error("Malformed bearer auth challenge: {reason}")]
    MalformedChallenge { reason: String },

    #[error("Unable to retrieve auth token from {url}: 401 unauthorized")]
    TokenExchangeUnauthorized { url: String },

    #[error("Unexpected http code from token endpoint: {status}, URL: {url}")]
    TokenExchangeUnexpectedStatus { status: u16, url: String },

    #[error("Invalid token response: {message}")]
    TokenResponseParse { message: String },

    // ============ IO Errors ============
    #[error("Cannot read chart package {}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for chart repository operations
pub type Result<T> = std::result::Result<T, RepoError>;

impl RepoError {
    pub(crate) fn malformed_challenge(reason: impl Into<String>) -> Self {
        RepoError::MalformedChallenge {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        RepoError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for RepoError {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("Request timed out: {}", e)
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else {
            e.to_string()
        };
        RepoError::Transport { message }
    }
}

impl From<serde_yaml::Error> for RepoError {
    fn from(e: serde_yaml::Error) -> Self {
        RepoError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_status_message_names_url() {
        let err = RepoError::TokenExchangeUnexpectedStatus {
            status: 503,
            url: "https://auth.example.com/token?service=registry".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected http code from token endpoint: 503, URL: https://auth.example.com/token?service=registry"
        );
    }

    #[test]
    fn test_local_io_message() {
        let err = RepoError::LocalIo {
            path: PathBuf::from("/tmp/missing-1.0.0.tgz"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read chart package /tmp/missing-1.0.0.tgz: not found"
        );
    }
}
