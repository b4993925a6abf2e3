//! Chart repository client
//!
//! Wraps one `reqwest::Client` (and its connection pool) together with the
//! immutable [`ClientOptions`]. Cloning is cheap and clones share the pool.

use std::path::Path;
use std::sync::Arc;

use reqwest::Response;

use crate::auth::execute;
use crate::error::{RepoError, Result};
use crate::options::ClientOptions;
use crate::request::ChartRequest;

/// Client for a ChartMuseum-compatible repository
#[derive(Debug, Clone)]
pub struct ChartRepositoryClient {
    http: reqwest::Client,
    options: Arc<ClientOptions>,
}

impl ChartRepositoryClient {
    /// Create a client for the given options
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout())
            .user_agent(concat!("chartpush/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| RepoError::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            options: Arc::new(options),
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Upload a packaged chart (`POST .../api/charts`)
    ///
    /// With `force`, an existing chart version is overwritten. The returned
    /// response may carry any status; a `409 Conflict` for an existing
    /// version is not an error here.
    pub async fn upload_chart_package(
        &self,
        chart_path: impl AsRef<Path>,
        force: bool,
    ) -> Result<Response> {
        let request = ChartRequest::upload(&self.options, chart_path.as_ref(), force);
        execute(&self.http, &self.options, &request).await
    }

    /// Download a file relative to the repository root, e.g. `index.yaml`
    pub async fn download_file(&self, file_path: &str) -> Result<Response> {
        let request = ChartRequest::download(&self.options, file_path);
        execute(&self.http, &self.options, &request).await
    }
}
