//! Output formatters

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::app::OutputFormat;
use paperrank_core::{Answer, Project, RankedResults, SavedPaper, ScoredPaper, Summary};

/// Format plain search results
pub fn format_papers(papers: &[ScoredPaper], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(&papers),
        OutputFormat::Md => markdown::format_papers(papers),
        OutputFormat::Cli => terminal::format_papers(papers),
    }
}

/// Format ranked results
pub fn format_ranked(results: &RankedResults, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(results),
        OutputFormat::Md => markdown::format_ranked(results),
        OutputFormat::Cli => terminal::format_ranked(results),
    }
}

pub fn format_answer(answer: &Answer, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(answer),
        OutputFormat::Md => markdown::format_answer(answer),
        OutputFormat::Cli => terminal::format_answer(answer),
    }
}

pub fn format_summary(summary: &Summary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(summary),
        OutputFormat::Md => markdown::format_summary(summary),
        OutputFormat::Cli => terminal::format_summary(summary),
    }
}

pub fn format_projects(projects: &[Project], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(&projects),
        OutputFormat::Md => markdown::format_projects(projects),
        OutputFormat::Cli => terminal::format_projects(projects),
    }
}

pub fn format_project(project: &Project, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(project),
        OutputFormat::Md => markdown::format_projects(std::slice::from_ref(project)),
        OutputFormat::Cli => terminal::format_project(project),
    }
}

pub fn format_saved_papers(saved: &[SavedPaper], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format(&saved),
        OutputFormat::Md => markdown::format_saved_papers(saved),
        OutputFormat::Cli => terminal::format_saved_papers(saved),
    }
}
