//! Repository resolution and client options shared by all commands

use std::path::PathBuf;
use std::time::Duration;

use chartpush_repo::{ClientOptions, RepositoryEntry, RepositoryFile};
use clap::Args;

use crate::error::Result;

/// Global settings every command needs
#[derive(Debug, Clone)]
pub struct Context {
    pub debug: bool,
    pub repository_config: Option<PathBuf>,
}

impl Context {
    /// Load the repositories file (explicit path, or the default location)
    pub fn repositories(&self) -> Result<RepositoryFile> {
        let file = match &self.repository_config {
            Some(path) => RepositoryFile::load_or_default(path)?,
            None => RepositoryFile::load()?,
        };
        Ok(file)
    }

    /// Resolve a repository name or URL to an entry
    pub fn resolve(&self, name_or_url: &str) -> Result<RepositoryEntry> {
        let entry = self.repositories()?.resolve(name_or_url)?;
        tracing::debug!(repository = name_or_url, url = %entry.url, "Resolved repository");
        Ok(entry)
    }
}

/// Connection flags; each overrides what the repository entry provides
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Override HTTP basic auth username
    #[arg(short = 'u', long, env = "HELM_REPO_USERNAME")]
    pub username: Option<String>,

    /// Override HTTP basic auth password
    #[arg(short = 'p', long, env = "HELM_REPO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Send this token as a bearer token (or in --auth-header)
    #[arg(long, env = "HELM_REPO_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Header to carry the access token instead of `Authorization: Bearer`
    #[arg(long, env = "HELM_REPO_AUTH_HEADER")]
    pub auth_header: Option<String>,

    /// Context path of the repository server (e.g. /chartmuseum)
    #[arg(long, env = "HELM_REPO_CONTEXT_PATH")]
    pub context_path: Option<String>,

    /// Answer `WWW-Authenticate` bearer challenges with an exchanged token
    #[arg(long, env = "HELM_REPO_USE_TOKEN_AUTH")]
    pub use_token_auth: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,
}

impl ConnectionArgs {
    /// Combine a repository entry with the command-line overrides
    pub fn client_options(&self, entry: &RepositoryEntry, debug: bool) -> Result<ClientOptions> {
        let mut builder = entry
            .options_builder()
            .auto_token_auth(self.use_token_auth)
            .debug(debug)
            .timeout(Duration::from_secs(self.timeout));

        if let Some(username) = provided(&self.username) {
            builder = builder.username(username);
        }
        if let Some(password) = provided(&self.password) {
            builder = builder.password(password);
        }
        if let Some(token) = provided(&self.access_token) {
            builder = builder.access_token(token);
        }
        if let Some(header) = provided(&self.auth_header) {
            builder = builder.auth_header(header);
        }
        if let Some(context_path) = provided(&self.context_path) {
            builder = builder.context_path(context_path);
        }

        Ok(builder.build()?)
    }
}

/// Empty flag values (e.g. an exported but blank env var) are ignored
fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartpush_repo::AuthStrategy;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            username: None,
            password: None,
            access_token: None,
            auth_header: None,
            context_path: None,
            use_token_auth: false,
            timeout: 30,
        }
    }

    fn entry() -> RepositoryEntry {
        RepositoryEntry {
            name: "museum".to_string(),
            url: "https://charts.example.com".to_string(),
            username: Some("ci".to_string()),
            password: Some("s3cret".to_string()),
        }
    }

    #[test]
    fn test_entry_credentials_are_used() {
        let options = args().client_options(&entry(), false).unwrap();
        assert_eq!(
            options.auth_strategy(),
            AuthStrategy::Basic {
                username: "ci",
                password: "s3cret"
            }
        );
    }

    #[test]
    fn test_flags_override_entry() {
        let mut args = args();
        args.username = Some("override".to_string());
        args.access_token = Some("tok".to_string());
        args.context_path = Some("museum/".to_string());

        let options = args.client_options(&entry(), true).unwrap();
        assert_eq!(options.username(), Some("override"));
        assert_eq!(options.auth_strategy(), AuthStrategy::StaticToken("tok"));
        assert_eq!(options.context_path(), "/museum");
        assert!(options.debug());
    }

    #[test]
    fn test_empty_env_values_do_not_override() {
        let mut args = args();
        args.username = Some(String::new());

        let options = args.client_options(&entry(), false).unwrap();
        assert_eq!(options.username(), Some("ci"));
    }
}
