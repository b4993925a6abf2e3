//! Chartpush repository client
//!
//! Uploads chart packages to, and downloads files from, ChartMuseum-style
//! chart repositories:
//!
//! - **Upload**: `POST <context>/api/<path>/charts[?force]` with the archive
//!   as multipart field `chart`
//! - **Download**: `GET <context>/<path>/<file>`
//! - **Auth**: static bearer token, HTTP Basic, or automatic bearer token
//!   exchange driven by a `WWW-Authenticate` challenge
//!
//! ## Example
//!
//! ```rust,no_run
//! use chartpush_repo::{ChartRepositoryClient, ClientOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::builder("https://charts.example.com")
//!     .username("ci")
//!     .password("secret")
//!     .auto_token_auth(true)
//!     .build()?;
//!
//! let client = ChartRepositoryClient::new(options)?;
//! let response = client.upload_chart_package("mychart-1.0.0.tgz", false).await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Token exchange
//!
//! With `auto_token_auth` the first attempt goes out without credentials.
//! A `401` carrying `WWW-Authenticate: Bearer realm=...,service=...` triggers
//! one token request to the realm (with Basic credentials if configured) and
//! exactly one retry. Tokens are never cached between calls.

pub mod error;
pub mod options;
pub mod challenge;
pub mod token;
pub mod request;
pub mod auth;
pub mod client;
pub mod repository;

// Re-exports for convenience
pub use error::{RepoError, Result};
pub use options::{AuthStrategy, ClientOptions, ClientOptionsBuilder, DEFAULT_TIMEOUT};
pub use challenge::{AuthChallenge, parse_challenge};
pub use token::{exchange_token, token_url};
pub use request::{CHART_FIELD, ChartRequest, UploadBody, download_url, upload_url};
pub use auth::execute;
pub use client::ChartRepositoryClient;
pub use repository::{RepositoryEntry, RepositoryFile};
