use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("harbor error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let parsed = cli::Cli::parse();
    init_tracing(parsed.quiet, parsed.verbose)?;

    let flags = parsed.global_flags();
    let config = harbor_config::HarborConfig::load_with_dotenv()?;

    let db_path = flags
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone());
    let service = harbor_db::service::HarborService::new_local(&db_path)
        .await
        .context("failed to open harbor database")?;

    match parsed.command {
        cli::Commands::Repo { action } => {
            commands::repo::handle(action, &service, &config, &flags).await
        }
        cli::Commands::Commit { action } => {
            commands::commit::handle(action, &service, &config, &flags).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HARBOR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
