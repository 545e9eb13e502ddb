use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "sweep",
    about = "Stacksweep: reclaim stale versioned stacks and their DNS aliases",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reclaim superseded-version stacks.
    ///
    /// Reads the live version from each environment's status endpoint and
    /// deletes settled, superseded deployments past their embargo window.
    Versions {
        /// Path to the sweep configuration
        #[arg(short, long, default_value = "sweep.toml")]
        config: String,
        /// Decide and log, but delete nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Reclaim stacks whose pull request has closed
    Prs {
        /// Path to the sweep configuration
        #[arg(short, long, default_value = "sweep.toml")]
        config: String,
        /// Decide and log, but delete nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Write a starter sweep.toml
    Init {
        /// Directory to write the config into
        #[arg(short, long, default_value = ".")]
        path: String,
        /// Stack name prefix to scaffold with
        #[arg(short, long, default_value = "api")]
        base_name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sweep_core=info".parse()?)
                .add_directive("sweep_providers=info".parse()?)
                .add_directive("sweep_engine=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Versions { config, dry_run } => commands::run::versions(&config, dry_run).await,
        Commands::Prs { config, dry_run } => commands::run::prs(&config, dry_run).await,
        Commands::Init { path, base_name } => commands::init::init(&path, &base_name),
    }
}
