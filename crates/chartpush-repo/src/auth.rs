//! Authenticated request execution
//!
//! One logical operation is at most two physical exchanges with the
//! repository (plus one with the token endpoint):
//!
//! 1. With challenge auth the request is first sent without credentials.
//!    Anything other than `401 Unauthorized` is handed back untouched.
//! 2. On `401` the `WWW-Authenticate` header is parsed, a token is
//!    exchanged at the realm and the request is rebuilt (fresh body) and
//!    sent once more with the token. Whatever that returns is final, even
//!    another `401`.
//!
//! Static tokens and Basic credentials are attached directly, no probe.

use reqwest::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::challenge::parse_challenge;
use crate::error::{RepoError, Result};
use crate::options::{AuthStrategy, ClientOptions};
use crate::request::ChartRequest;
use crate::token::exchange_token;

/// Execute a request, applying the credential strategy selected by `options`
pub async fn execute(
    http: &reqwest::Client,
    options: &ClientOptions,
    request: &ChartRequest,
) -> Result<Response> {
    match options.auth_strategy() {
        AuthStrategy::Challenge => execute_with_challenge(http, options, request).await,
        AuthStrategy::StaticToken(token) => {
            log_token(options, token);
            send(request, with_token(request.build(http)?, options, token)).await
        }
        AuthStrategy::Basic { username, password } => {
            send(
                request,
                request.build(http)?.basic_auth(username, Some(password)),
            )
            .await
        }
        AuthStrategy::Anonymous => send(request, request.build(http)?).await,
    }
}

async fn execute_with_challenge(
    http: &reqwest::Client,
    options: &ClientOptions,
    request: &ChartRequest,
) -> Result<Response> {
    let probe = send(request, request.build(http)?).await?;
    if probe.status() != StatusCode::UNAUTHORIZED {
        return Ok(probe);
    }

    let header = probe
        .headers()
        .get(WWW_AUTHENTICATE)
        .ok_or_else(|| RepoError::malformed_challenge("401 response without WWW-Authenticate"))?
        .to_str()
        .map_err(|_| RepoError::malformed_challenge("WWW-Authenticate is not valid text"))?
        .to_string();
    // Drain the probe so its connection goes back to the pool.
    let _ = probe.bytes().await;

    tracing::debug!(challenge = %header, "Received auth challenge");
    let challenge = parse_challenge(&header)?;
    let token = exchange_token(http, &challenge, options.basic_credentials()).await?;

    // Rebuilt from scratch: the probe consumed the original body.
    let retry = with_token(request.build(http)?, options, &token);
    log_token(options, &token);

    let response = send(request, retry).await?;
    if response.status() == StatusCode::UNAUTHORIZED {
        tracing::warn!(
            url = %request.url(),
            "Still unauthorized after token exchange"
        );
    }
    Ok(response)
}

/// Attach a token through the custom header, or `Authorization: Bearer`
fn with_token(builder: RequestBuilder, options: &ClientOptions, token: &str) -> RequestBuilder {
    match options.auth_header() {
        Some(name) if *name != AUTHORIZATION => builder.header(name.clone(), token),
        _ => builder.bearer_auth(token),
    }
}

fn log_token(options: &ClientOptions, token: &str) {
    if options.debug() {
        tracing::debug!(target: "chartpush_repo::auth", token = %token, "Using access token");
    }
}

async fn send(request: &ChartRequest, builder: RequestBuilder) -> Result<Response> {
    tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");
    Ok(builder.send().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_header(options: &ClientOptions) -> (String, String) {
        let http = reqwest::Client::new();
        let request = with_token(http.get("https://charts.example.com/index.yaml"), options, "abc123")
            .build()
            .unwrap();
        let (name, value) = request.headers().iter().next().unwrap();
        (name.to_string(), value.to_str().unwrap().to_string())
    }

    #[test]
    fn test_default_bearer_header() {
        let options = ClientOptions::builder("https://charts.example.com")
            .build()
            .unwrap();
        assert_eq!(
            token_header(&options),
            ("authorization".to_string(), "Bearer abc123".to_string())
        );
    }

    #[test]
    fn test_custom_header_carries_raw_token() {
        let options = ClientOptions::builder("https://charts.example.com")
            .auth_header("X-Registry-Token")
            .build()
            .unwrap();
        assert_eq!(
            token_header(&options),
            ("x-registry-token".to_string(), "abc123".to_string())
        );
    }

    #[test]
    fn test_authorization_as_custom_header_keeps_bearer_scheme() {
        let options = ClientOptions::builder("https://charts.example.com")
            .auth_header("Authorization")
            .build()
            .unwrap();
        assert_eq!(token_header(&options).1, "Bearer abc123");
    }
}
