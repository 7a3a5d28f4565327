//! Init command

use crate::app::InitArgs;
use crate::services::Services;
use anyhow::Result;
use paperrank_core::{Config, Distance, VectorIndex};
use std::path::Path;

pub async fn run(args: InitArgs, config: &Config, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        println!("Config already exists at {}", config_path.display());
    } else {
        Config::read_file(config_path)?.save_to(config_path)?;
        println!("Wrote config to {}", config_path.display());
    }

    if args.no_collection {
        return Ok(());
    }

    let services = Services::from_config(config)?;
    services
        .index()
        .ensure_collection(config.llm_service.embedding_dimensions, Distance::Cosine)
        .await?;
    println!(
        "Collection '{}' ready ({} dimensions)",
        services.index().collection(),
        config.llm_service.embedding_dimensions
    );
    Ok(())
}
