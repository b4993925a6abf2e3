//! Bearer token exchange against a challenge realm

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::challenge::AuthChallenge;
use crate::error::{RepoError, Result};

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Build the token endpoint URL: realm plus `service` and, when present, `scope`
pub fn token_url(challenge: &AuthChallenge) -> Result<Url> {
    let mut url = Url::parse(&challenge.realm).map_err(|e| {
        RepoError::malformed_challenge(format!("invalid realm {:?}: {}", challenge.realm, e))
    })?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("service", &challenge.service);
        if challenge.has_scope() {
            query.append_pair("scope", &challenge.scope);
        }
    }
    Ok(url)
}

/// Largest token response accepted from the realm
const MAX_TOKEN_RESPONSE: u64 = 64 * 1024;

/// Exchange a challenge for a bearer token
///
/// Sends a body-less POST to the realm. When `credentials` are given they are
/// sent as HTTP Basic auth to the token endpoint. The status decides the
/// outcome; on error paths the body is drained on a best-effort basis so the
/// connection goes back to the pool.
pub async fn exchange_token(
    http: &reqwest::Client,
    challenge: &AuthChallenge,
    credentials: Option<(&str, &str)>,
) -> Result<String> {
    let url = token_url(challenge)?;

    let mut request = http.post(url.clone());
    if let Some((username, password)) = credentials {
        request = request.basic_auth(username, Some(password));
    }

    tracing::debug!(url = %url, "Requesting bearer token");
    let response = request.send().await?;

    match response.status() {
        StatusCode::OK => {}
        StatusCode::UNAUTHORIZED => {
            let _ = response.bytes().await;
            return Err(RepoError::TokenExchangeUnauthorized {
                url: url.to_string(),
            });
        }
        other => {
            let _ = response.bytes().await;
            return Err(RepoError::TokenExchangeUnexpectedStatus {
                status: other.as_u16(),
                url: url.to_string(),
            });
        }
    }

    if let Some(length) = response
        .content_length()
        .filter(|length| *length > MAX_TOKEN_RESPONSE)
    {
        return Err(RepoError::TokenResponseParse {
            message: format!("response of {} bytes exceeds {} bytes", length, MAX_TOKEN_RESPONSE),
        });
    }

    let parsed: TokenResponse = response.json().await.map_err(|e| {
        if e.is_decode() {
            RepoError::TokenResponseParse {
                message: e.to_string(),
            }
        } else {
            RepoError::from(e)
        }
    })?;

    if parsed.access_token.is_empty() {
        return Err(RepoError::TokenResponseParse {
            message: "empty access_token".to_string(),
        });
    }

    Ok(parsed.access_token)
}
