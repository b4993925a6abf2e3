//! `WWW-Authenticate` bearer challenge parsing
//!
//! A registry that wants a token answers with
//! `Bearer realm="https://auth.example.com/token",service="registry",scope="repository:my-chart:pull,push"`.

use crate::error::{RepoError, Result};

/// Parameters of a bearer challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthChallenge {
    /// Token endpoint URL
    pub realm: String,
    /// Service identifier passed back to the token endpoint
    pub service: String,
    /// Requested scope; empty when the challenge carries none
    pub scope: String,
}

impl AuthChallenge {
    pub fn has_scope(&self) -> bool {
        !self.scope.is_empty()
    }
}

/// Parse a `WWW-Authenticate` header value into an [`AuthChallenge`]
///
/// Parameters may come in any order and unknown parameters are ignored.
/// `realm` and `service` are required; `scope` is optional.
pub fn parse_challenge(header: &str) -> Result<AuthChallenge> {
    let (_scheme, params) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| RepoError::malformed_challenge(format!("no parameters in {:?}", header)))?;

    let mut realm = String::new();
    let mut service = String::new();
    let mut scope = String::new();

    for segment in split_params(params) {
        let segment = segment.trim();
        if let Some(value) = segment.strip_prefix("realm=") {
            realm = unquote(value).to_string();
        } else if let Some(value) = segment.strip_prefix("service=") {
            service = unquote(value).to_string();
        } else if let Some(value) = segment.strip_prefix("scope=") {
            scope = unquote(value).to_string();
        }
    }

    if realm.is_empty() {
        return Err(RepoError::malformed_challenge(
            "missing realm in bearer auth challenge",
        ));
    }
    if service.is_empty() {
        return Err(RepoError::malformed_challenge(
            "missing service in bearer auth challenge",
        ));
    }

    Ok(AuthChallenge {
        realm,
        service,
        scope,
    })
}

/// Split on commas that are not inside a quoted value
fn split_params(params: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, ch) in params.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                segments.push(&params[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&params[start..]);
    segments
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"')
}
