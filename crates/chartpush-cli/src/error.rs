//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use chartpush_repo::RepoError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// User provided invalid input
    #[error("{message}")]
    #[diagnostic(code(chartpush::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Repository file or client option problem
    #[error("Configuration error: {message}")]
    #[diagnostic(code(chartpush::cli::config))]
    Config { message: String },

    /// Could not reach the repository or token endpoint
    #[error("Network error: {message}")]
    #[diagnostic(code(chartpush::cli::network))]
    Network { message: String },

    /// Authentication could not be completed
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(chartpush::cli::auth),
        help("Check --username/--password or --access-token, and whether the repository expects --use-token-auth")
    )]
    Auth { message: String },

    /// The repository answered with a non-success status
    #[error("Repository returned {status}: {message}")]
    #[diagnostic(code(chartpush::cli::remote))]
    Remote {
        status: u16,
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartpush::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::USAGE_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Network { .. } => exit_codes::NETWORK_ERROR,
            CliError::Auth { .. } => exit_codes::AUTH_ERROR,
            CliError::Remote { .. } => exit_codes::REMOTE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create an error for a final non-2xx repository response
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        let help = match status {
            409 => Some("Use --force to overwrite an existing chart version".to_string()),
            401 | 403 => Some("The repository rejected the supplied credentials".to_string()),
            _ => None,
        };
        Self::Remote {
            status,
            message: message.into(),
            help,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<RepoError> for CliError {
    fn from(err: RepoError) -> Self {
        let message = err.to_string();
        match err {
            RepoError::RepositoryNotFound { .. } => CliError::Input {
                message,
                help: Some(
                    "Add the repository to your repositories file, or pass its full URL"
                        .to_string(),
                ),
            },
            RepoError::InvalidRepositoryUrl { .. } => CliError::Input {
                message,
                help: None,
            },
            RepoError::InvalidConfig { .. } | RepoError::Serialization(_) => {
                CliError::Config { message }
            }
            RepoError::Transport { .. } => CliError::Network { message },
            RepoError::LocalIo { .. } | RepoError::Io(_) => CliError::Io { message },
            RepoError::MalformedChallenge { .. }
            | RepoError::TokenExchangeUnauthorized { .. }
            | RepoError::TokenExchangeUnexpectedStatus { .. }
            | RepoError::TokenResponseParse { .. } => CliError::Auth { message },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let err: CliError = RepoError::TokenExchangeUnauthorized {
            url: "https://auth/token?service=registry".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::AUTH_ERROR);

        let err: CliError = RepoError::Transport {
            message: "Connection failed".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::NETWORK_ERROR);

        let err: CliError = RepoError::RepositoryNotFound {
            name: "museum".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::USAGE_ERROR);
        assert_eq!(err.to_string(), "Repository not found: museum");
    }

    #[test]
    fn test_remote_conflict_suggests_force() {
        let err = CliError::remote(409, "file already exists");
        assert_eq!(err.exit_code(), exit_codes::REMOTE_ERROR);
        match err {
            CliError::Remote { help, .. } => assert!(help.unwrap().contains("--force")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
