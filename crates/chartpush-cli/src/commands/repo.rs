//! Repository listing

use crate::connection::Context;
use crate::error::Result;

/// List repositories from the repositories file
pub fn list(ctx: &Context) -> Result<()> {
    let file = ctx.repositories()?;

    if file.repositories.is_empty() {
        println!("No repositories configured.");
        return Ok(());
    }

    println!("{:<20} {:<50} {}", "NAME", "URL", "AUTH");
    println!("{}", "-".repeat(80));

    for repo in &file.repositories {
        let auth = if repo.username.is_some() && repo.password.is_some() {
            "basic"
        } else {
            "none"
        };
        println!("{:<20} {:<50} {}", repo.name, repo.url, auth);
    }

    Ok(())
}
