//! Request builders for the chart repository API
//!
//! A [`ChartRequest`] describes *where* a call goes (method and URL) and
//! *how* to produce its body. It carries no credentials. The body is
//! produced fresh on every [`ChartRequest::build`] call, because a streamed
//! multipart body is gone once it has been sent.

use std::fs::File;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method, RequestBuilder};
use url::Url;

use crate::error::{RepoError, Result};
use crate::options::ClientOptions;

/// Multipart field the chart archive is sent in
pub const CHART_FIELD: &str = "chart";

/// One logical call against the repository, without credentials
#[derive(Debug, Clone)]
pub struct ChartRequest {
    method: Method,
    url: Url,
    upload: Option<UploadBody>,
}

impl ChartRequest {
    /// `GET <context>/<base path>/<file>`
    pub fn download(options: &ClientOptions, file_path: &str) -> Self {
        Self {
            method: Method::GET,
            url: download_url(options, file_path),
            upload: None,
        }
    }

    /// `POST <context>/api/<base path>/charts[?force]` with the chart as
    /// multipart field `chart`
    pub fn upload(options: &ClientOptions, chart_path: impl Into<PathBuf>, force: bool) -> Self {
        Self {
            method: Method::POST,
            url: upload_url(options, force),
            upload: Some(UploadBody::new(chart_path)),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Create a sendable request with a freshly encoded body
    ///
    /// Fails with [`RepoError::LocalIo`] if the chart archive cannot be
    /// opened, before anything touches the network.
    pub fn build(&self, http: &reqwest::Client) -> Result<RequestBuilder> {
        let builder = http.request(self.method.clone(), self.url.clone());
        match &self.upload {
            Some(upload) => Ok(builder.multipart(upload.form()?)),
            None => Ok(builder),
        }
    }
}

/// Body factory for a chart upload
#[derive(Debug, Clone)]
pub struct UploadBody {
    path: PathBuf,
}

impl UploadBody {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode the archive as a single-part form, streaming from disk
    pub fn form(&self) -> Result<Form> {
        let local_io = |source: std::io::Error| RepoError::LocalIo {
            path: self.path.clone(),
            source,
        };

        let file = File::open(&self.path).map_err(local_io)?;
        let length = file.metadata().map_err(local_io)?.len();
        let body = Body::from(tokio::fs::File::from_std(file));

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        let part = Part::stream_with_length(body, length)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;

        Ok(Form::new().part(CHART_FIELD, part))
    }
}

/// Download URL: context path, then the base URL path with the context
/// path stripped, then the file path
pub fn download_url(options: &ClientOptions, file_path: &str) -> Url {
    let context = options.context_path();
    let base_path = strip_context(options.url().path(), &encoded_path(options.url(), context));
    with_path(options.url(), &join_path(&[context, base_path, file_path]))
}

/// Upload URL: `<context>/api/<base path>/charts`, plus a bare `force`
/// query flag when an existing version should be overwritten
pub fn upload_url(options: &ClientOptions, force: bool) -> Url {
    let context = options.context_path();
    let base_path = strip_context(options.url().path(), &encoded_path(options.url(), context));
    let mut url = with_path(
        options.url(),
        &join_path(&[context, "api", base_path, "charts"]),
    );
    if force {
        url.set_query(Some("force"));
    }
    url
}

fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Percent-encode `path` the way [`Url::path`] reports it
fn encoded_path(base: &Url, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut url = base.clone();
    url.set_path(path);
    url.path().to_string()
}

/// Remove a leading context path, on a segment boundary only
///
/// Both sides must be in the same (percent-encoded) form.
fn strip_context<'a>(path: &'a str, context: &str) -> &'a str {
    if context.is_empty() {
        return path;
    }
    match path.strip_prefix(context) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Join path fragments into a clean absolute path
///
/// Empty segments and `.` are dropped, `..` pops the previous segment and
/// the result never ends in a slash.
fn join_path(parts: &[&str]) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in parts.iter().flat_map(|part| part.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
