//! PaperRank CLI
//!
//! Project-aware search and ranking over an arXiv paper corpus.

use anyhow::Result;
use clap::Parser;
use paperrank_core::error::exit_codes;
use paperrank_core::{Config, Database, PaperRankError};
use std::path::PathBuf;

mod app;
mod commands;
mod output;
mod services;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so --format json output stays parseable
    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path)?;

    // Open database (use PAPERRANK_DB env var if set, otherwise use default)
    let db_path = std::env::var("PAPERRANK_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Database::default_path());
    let db = Database::open(&db_path)?;
    db.initialize()?;

    let format = cli.format;
    match cli.command {
        Commands::Project(args) => commands::project::run(args, &db, &config, format).await,
        Commands::Search(args) => commands::search::run_search(args, &db, &config, format).await,
        Commands::Rank(args) => commands::search::run_rank(args, &db, &config, format).await,
        Commands::Ask(args) => commands::ask::run_ask(args, &db, &config, format).await,
        Commands::Summarize(args) => {
            commands::ask::run_summarize(args, &db, &config, format).await
        }
        Commands::Ingest(args) => commands::ingest::run(args, &config, format).await,
        Commands::Init(args) => commands::init::run(args, &config, &config_path).await,
        Commands::Status => commands::status::run(&db, &db_path, &config, &config_path, format).await,
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PaperRankError>()
        .map(PaperRankError::exit_code)
        .unwrap_or(exit_codes::GENERAL_ERROR)
}
