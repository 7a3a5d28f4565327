//! Search and rank commands

use super::join_words;
use crate::app::{OutputFormat, RankArgs, SearchArgs};
use crate::output::{format_papers, format_ranked};
use crate::services::Services;
use anyhow::Result;
use paperrank_core::{Config, Database, RankRequest, SearchRequest};

pub async fn run_search(
    args: SearchArgs,
    db: &Database,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let request = SearchRequest::new(
        join_words(&args.query),
        args.top_k.unwrap_or(config.ranking.default_top_k),
    );
    request.validate(&config.ranking)?;
    if let Some(ref project_id) = args.project {
        db.require_project(project_id)?;
    }

    let services = Services::from_config(config)?;
    let papers = services
        .pipeline()
        .search_for_project(db, args.project.as_deref(), &request)
        .await?;

    print!("{}", format_papers(&papers, format));
    Ok(())
}

pub async fn run_rank(
    args: RankArgs,
    db: &Database,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let request = RankRequest::new(
        join_words(&args.query),
        args.top_k.unwrap_or(config.ranking.default_top_k),
        args.rerank_top_n
            .unwrap_or(config.ranking.default_rerank_top_n),
    );
    request.validate(&config.ranking)?;

    let services = Services::from_config(config)?;
    let results = services
        .pipeline()
        .search_and_rank_for_project(db, &args.project, &request)
        .await?;

    print!("{}", format_ranked(&results, format));
    Ok(())
}
