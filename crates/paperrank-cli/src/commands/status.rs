//! Status command

use crate::app::OutputFormat;
use crate::services::Services;
use anyhow::Result;
use paperrank_core::{Config, Database, VectorIndex};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Status {
    config_path: String,
    database_path: String,
    projects: usize,
    saved_papers: usize,
    llm_url: String,
    llm_model: String,
    embedding_model: String,
    index_url: String,
    collection: String,
    /// None when the index is unreachable or the collection is missing
    indexed_papers: Option<usize>,
}

pub async fn run(
    db: &Database,
    db_path: &Path,
    config: &Config,
    config_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let projects = db.list_projects()?;

    let services = Services::from_config(config)?;
    let indexed_papers = match services.index().count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!("Vector index unavailable: {}", e);
            None
        }
    };

    let status = Status {
        config_path: config_path.display().to_string(),
        database_path: db_path.display().to_string(),
        projects: projects.len(),
        saved_papers: projects.iter().map(|p| p.paper_count).sum(),
        llm_url: config.llm_service.url.clone(),
        llm_model: config.llm_service.model.clone(),
        embedding_model: config.llm_service.embedding_model.clone(),
        index_url: config.vector_index.url.clone(),
        collection: config.vector_index.collection.clone(),
        indexed_papers,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        _ => {
            println!("Config:          {}", status.config_path);
            println!("Database:        {}", status.database_path);
            println!("Projects:        {}", status.projects);
            println!("Saved papers:    {}", status.saved_papers);
            println!();
            println!("LLM:             {} ({})", status.llm_model, status.llm_url);
            println!("Embeddings:      {}", status.embedding_model);
            println!();
            println!("Index:           {}", status.index_url);
            println!("Collection:      {}", status.collection);
            match status.indexed_papers {
                Some(count) => println!("Indexed papers:  {}", count),
                None => println!("Indexed papers:  unavailable"),
            }
        }
    }
    Ok(())
}
