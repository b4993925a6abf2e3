//! Fetch command - download a file from a repository

use std::io::Write;
use std::path::Path;

use chartpush_repo::{ChartRepositoryClient, RepoError};

use crate::connection::{ConnectionArgs, Context};
use crate::error::{CliError, Result};
use crate::util::{format_size, server_message};

/// Download `file` from the repository to `output`, or stdout
pub async fn run(
    ctx: &Context,
    repository: &str,
    file: &str,
    output: Option<&Path>,
    connection: &ConnectionArgs,
) -> Result<()> {
    let entry = ctx.resolve(repository)?;
    let options = connection.client_options(&entry, ctx.debug)?;
    let client = ChartRepositoryClient::new(options)?;

    let response = client.download_file(file).await?;
    let status = response.status();
    let data = response.bytes().await.map_err(RepoError::from)?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&data);
        return Err(CliError::remote(
            status.as_u16(),
            server_message(&body, status.canonical_reason()),
        ));
    }

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &data)?;
            eprintln!(
                "Saved {} to {} ({})",
                file,
                path.display(),
                format_size(data.len() as u64)
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
