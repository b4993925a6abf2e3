//! Push command - upload a packaged chart to a repository

use std::path::Path;

use chartpush_repo::{ChartRepositoryClient, RepoError};
use console::style;

use crate::connection::{ConnectionArgs, Context};
use crate::error::{CliError, Result};
use crate::util::{format_size, server_message};

/// Upload a chart archive
pub async fn run(
    ctx: &Context,
    chart: &Path,
    repository: &str,
    force: bool,
    connection: &ConnectionArgs,
) -> Result<()> {
    let metadata = std::fs::metadata(chart).map_err(|_| CliError::Input {
        message: format!("Chart package not found: {}", chart.display()),
        help: Some("Package the chart first, e.g. `helm package <dir>`".to_string()),
    })?;
    if !metadata.is_file() {
        return Err(CliError::Input {
            message: format!("{} is not a packaged chart archive", chart.display()),
            help: Some("Package the chart first, e.g. `helm package <dir>`".to_string()),
        });
    }

    let entry = ctx.resolve(repository)?;
    let options = connection.client_options(&entry, ctx.debug)?;
    let client = ChartRepositoryClient::new(options)?;

    println!(
        "Pushing {} ({}) to {}...",
        style(chart.display()).cyan(),
        format_size(metadata.len()),
        style(repository).cyan()
    );

    let response = client.upload_chart_package(chart, force).await?;
    let status = response.status();
    let body = response.text().await.map_err(RepoError::from)?;

    if !status.is_success() {
        return Err(CliError::remote(
            status.as_u16(),
            server_message(&body, status.canonical_reason()),
        ));
    }

    println!("{}", style("Done.").green().bold());
    Ok(())
}
