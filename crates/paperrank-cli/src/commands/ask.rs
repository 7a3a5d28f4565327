//! Question answering and summary commands

use super::join_words;
use crate::app::{AskArgs, OutputFormat, SummarizeArgs};
use crate::output::{format_answer, format_summary};
use crate::services::Services;
use anyhow::Result;
use paperrank_core::{Config, Database, ProjectStore};

pub async fn run_ask(
    args: AskArgs,
    db: &Database,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let question = join_words(&args.question);
    let num_papers = args.num_papers.unwrap_or(config.answer.default_num_papers);
    let project = args
        .project
        .as_deref()
        .map(|id| db.project_context(id))
        .transpose()?;

    let services = Services::from_config(config)?;
    let answer = services
        .answer_generator()
        .ask(&question, num_papers, project.as_ref())
        .await?;

    print!("{}", format_answer(&answer, format));
    Ok(())
}

pub async fn run_summarize(
    args: SummarizeArgs,
    db: &Database,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let project = db.project_context(&args.project_id)?;
    let saved = db.saved_papers(&args.project_id)?;

    let services = Services::from_config(config)?;
    let summary = services
        .answer_generator()
        .summarize(&project, &saved, args.focus.as_deref())
        .await?;

    print!("{}", format_summary(&summary, format));
    Ok(())
}
