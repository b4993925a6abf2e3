//! Chartpush CLI - push charts to ChartMuseum-compatible repositories

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod connection;
mod error;
mod exit_codes;
mod util;

use connection::{ConnectionArgs, Context};

#[derive(Parser)]
#[command(name = "chartpush")]
#[command(author = "Chartpush Contributors")]
#[command(version)]
#[command(about = "Push charts to ChartMuseum-compatible repositories", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output (includes resolved access tokens)
    #[arg(long, global = true)]
    debug: bool,

    /// Path to the repositories file
    #[arg(long, global = true, env = "HELM_REPOSITORY_CONFIG")]
    repository_config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a packaged chart
    Push {
        /// Chart archive (.tgz)
        chart: PathBuf,

        /// Repository name or URL
        repository: String,

        /// Overwrite the chart version if it already exists
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Download a file from a repository (e.g. index.yaml)
    Fetch {
        /// Repository name or URL
        repository: String,

        /// File path relative to the repository root
        file: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Inspect configured repositories
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// List configured repositories
    List,
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "chartpush=debug,chartpush_repo=debug"
    } else {
        "warn"
    };
    let mut filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    // --debug always shows the resolved token, whatever RUST_LOG says
    if debug {
        if let Ok(directive) = "chartpush_repo::auth=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let ctx = Context {
        debug: cli.debug,
        repository_config: cli.repository_config,
    };

    let result = match cli.command {
        Commands::Push {
            chart,
            repository,
            force,
            connection,
        } => commands::push::run(&ctx, &chart, &repository, force, &connection).await,

        Commands::Fetch {
            repository,
            file,
            output,
            connection,
        } => commands::fetch::run(&ctx, &repository, &file, output.as_deref(), &connection).await,

        Commands::Repo { command } => match command {
            RepoCommands::List => commands::repo::list(&ctx),
        },
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
