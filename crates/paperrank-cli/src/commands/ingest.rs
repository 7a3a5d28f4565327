//! Ingest command

use crate::app::{IngestArgs, OutputFormat};
use crate::services::Services;
use anyhow::Result;
use paperrank_core::{ingest_papers, load_papers, Config, IngestProgress};

pub async fn run(args: IngestArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let batch_size = args.batch_size.unwrap_or(config.ingest.batch_size);
    let papers = load_papers(&args.path)?;
    eprintln!("Loaded {} papers from {}", papers.len(), args.path.display());

    let services = Services::from_config(config)?;
    let embedder = services.retriever().embedder().clone();

    let stats = ingest_papers(
        embedder.as_ref(),
        services.index(),
        papers,
        batch_size,
        Some(Box::new(|progress: IngestProgress| {
            eprint!(
                "\rIndexed {}/{} papers   ",
                progress.processed, progress.total
            );
        })),
    )
    .await?;
    eprintln!();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => {
            println!("Ingest complete:");
            println!("  Read:       {}", stats.read);
            println!("  Upserted:   {}", stats.upserted);
            println!("  Duplicates: {}", stats.duplicates);
            println!("  Skipped:    {}", stats.skipped);
        }
    }
    Ok(())
}
