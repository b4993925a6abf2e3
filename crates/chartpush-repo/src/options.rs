//! Client configuration
//!
//! [`ClientOptions`] is built once and never mutated afterwards. Every
//! operation borrows it read-only, so one configured client can serve many
//! concurrent calls.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderName;
use url::Url;

use crate::error::{RepoError, Result};

/// Default transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable configuration for a chart repository client
#[derive(Clone)]
pub struct ClientOptions {
    url: Url,
    context_path: String,
    username: Option<String>,
    password: Option<String>,
    access_token: Option<String>,
    auth_header: Option<HeaderName>,
    auto_token_auth: bool,
    debug: bool,
    timeout: Duration,
}

impl ClientOptions {
    /// Start building options for a repository base URL
    pub fn builder(url: impl Into<String>) -> ClientOptionsBuilder {
        ClientOptionsBuilder::new(url)
    }

    /// Repository base URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Normalised context path: empty, or `/segment[/segment...]` without a
    /// trailing slash
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Custom header carrying the token instead of `Authorization: Bearer`
    pub fn auth_header(&self) -> Option<&HeaderName> {
        self.auth_header.as_ref()
    }

    pub fn auto_token_auth(&self) -> bool {
        self.auto_token_auth
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Username and password, only when both are set
    pub fn basic_credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    /// Select the credential strategy for one call
    ///
    /// Precedence: challenge-based token auth, then a static access token,
    /// then HTTP Basic, then anonymous.
    pub fn auth_strategy(&self) -> AuthStrategy<'_> {
        if self.auto_token_auth {
            AuthStrategy::Challenge
        } else if let Some(token) = self.access_token() {
            AuthStrategy::StaticToken(token)
        } else if let Some((username, password)) = self.basic_credentials() {
            AuthStrategy::Basic { username, password }
        } else {
            AuthStrategy::Anonymous
        }
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("url", &self.url.as_str())
            .field("context_path", &self.context_path)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("auth_header", &self.auth_header)
            .field("auto_token_auth", &self.auto_token_auth)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// How credentials are attached to a single logical operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy<'a> {
    /// Probe unauthenticated, answer a 401 challenge with an exchanged token
    Challenge,
    /// Pre-supplied bearer token
    StaticToken(&'a str),
    /// HTTP Basic
    Basic { username: &'a str, password: &'a str },
    /// No credentials
    Anonymous,
}

/// Builder for [`ClientOptions`]
///
/// Empty strings are treated as "not set", so values coming straight from
/// unset environment variables do not select a credential mode.
#[derive(Debug, Clone)]
pub struct ClientOptionsBuilder {
    url: String,
    context_path: String,
    username: Option<String>,
    password: Option<String>,
    access_token: Option<String>,
    auth_header: Option<String>,
    auto_token_auth: bool,
    debug: bool,
    timeout: Duration,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() { None } else { Some(value) }
}

impl ClientOptionsBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            context_path: String::new(),
            username: None,
            password: None,
            access_token: None,
            auth_header: None,
            auto_token_auth: false,
            debug: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = non_empty(username);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = non_empty(password);
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = non_empty(token);
        self
    }

    pub fn auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = non_empty(header);
        self
    }

    pub fn auto_token_auth(mut self, enabled: bool) -> Self {
        self.auto_token_auth = enabled;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate and freeze the options
    pub fn build(self) -> Result<ClientOptions> {
        let url = Url::parse(&self.url).map_err(|e| RepoError::InvalidRepositoryUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RepoError::InvalidRepositoryUrl {
                url: self.url,
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        let auth_header = self
            .auth_header
            .map(|name| {
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                    RepoError::invalid_config(format!("invalid auth header name: {:?}", name))
                })
            })
            .transpose()?;

        Ok(ClientOptions {
            url,
            context_path: normalize_context_path(&self.context_path),
            username: self.username,
            password: self.password,
            access_token: self.access_token,
            auth_header,
            auto_token_auth: self.auto_token_auth,
            debug: self.debug,
            timeout: self.timeout,
        })
    }
}

/// `sub/` and `/sub` both become `/sub`; `/` becomes empty
fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_path_normalization() {
        assert_eq!(normalize_context_path(""), "");
        assert_eq!(normalize_context_path("/"), "");
        assert_eq!(normalize_context_path("sub"), "/sub");
        assert_eq!(normalize_context_path("/sub/"), "/sub");
        assert_eq!(normalize_context_path("/a/b"), "/a/b");
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let err = ClientOptions::builder("oci://ghcr.io/org").build().unwrap_err();
        assert!(matches!(err, RepoError::InvalidRepositoryUrl { .. }));

        let err = ClientOptions::builder("not a url").build().unwrap_err();
        assert!(matches!(err, RepoError::InvalidRepositoryUrl { .. }));
    }

    #[test]
    fn test_builder_rejects_bad_header_name() {
        let err = ClientOptions::builder("https://charts.example.com")
            .auth_header("X Bad Header")
            .build()
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidConfig { .. }));
    }

    #[test]
    fn test_strategy_precedence() {
        let base = || {
            ClientOptions::builder("https://charts.example.com")
                .username("user")
                .password("pass")
        };

        let opts = base()
            .access_token("static")
            .auto_token_auth(true)
            .build()
            .unwrap();
        assert_eq!(opts.auth_strategy(), AuthStrategy::Challenge);

        let opts = base().access_token("static").build().unwrap();
        assert_eq!(opts.auth_strategy(), AuthStrategy::StaticToken("static"));

        let opts = base().build().unwrap();
        assert_eq!(
            opts.auth_strategy(),
            AuthStrategy::Basic {
                username: "user",
                password: "pass"
            }
        );

        let opts = ClientOptions::builder("https://charts.example.com")
            .username("user")
            .build()
            .unwrap();
        assert_eq!(opts.auth_strategy(), AuthStrategy::Anonymous);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let opts = ClientOptions::builder("https://charts.example.com")
            .username("")
            .password("")
            .access_token("")
            .auth_header("")
            .build()
            .unwrap();
        assert_eq!(opts.auth_strategy(), AuthStrategy::Anonymous);
        assert!(opts.auth_header().is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let opts = ClientOptions::builder("https://charts.example.com")
            .username("user")
            .password("hunter2")
            .access_token("tok-123")
            .build()
            .unwrap();
        let printed = format!("{:?}", opts);
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("tok-123"));
        assert!(printed.contains("user"));
    }
}
