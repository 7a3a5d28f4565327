//! Retrieval-augmented answers and saved-paper summaries
//!
//! Unlike ranking, each request here makes a single LLM call over the whole
//! batch of papers, so a failed call fails the request.

use crate::db::SavedPaper;
use crate::error::{PaperRankError, Result};
use crate::llm::{ChatMessage, LLMClient};
use crate::paper::{Paper, ProjectContext, ScoredPaper};
use crate::search::{validate_range, Retriever};
use serde::Serialize;
use std::sync::Arc;

const SEPARATOR_WIDTH: usize = 80;

/// Upper bound on papers fed to one answer prompt
pub const DEFAULT_MAX_PAPERS: usize = 10;

/// Generated answer with the papers it was grounded on
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub sources: Vec<ScoredPaper>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_context: Option<String>,
}

/// Overview of a project's saved papers
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub summary: String,
    pub papers_summarized: Vec<ScoredPaper>,
}

/// Question answering and summarisation over papers
pub struct AnswerGenerator {
    retriever: Retriever,
    client: Arc<dyn LLMClient>,
    max_papers: usize,
}

impl AnswerGenerator {
    pub fn new(retriever: Retriever, client: Arc<dyn LLMClient>) -> Self {
        Self {
            retriever,
            client,
            max_papers: DEFAULT_MAX_PAPERS,
        }
    }

    pub fn with_max_papers(mut self, max_papers: usize) -> Self {
        self.max_papers = max_papers;
        self
    }

    /// Answer `question` from the `num_papers` nearest papers, citing them by number
    pub async fn ask(
        &self,
        question: &str,
        num_papers: usize,
        project: Option<&ProjectContext>,
    ) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(PaperRankError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        validate_range("num_papers", num_papers, self.max_papers)?;

        tracing::info!("Searching for papers relevant to: {}", question);
        let sources = self.retriever.retrieve(question, num_papers).await?;
        if sources.is_empty() {
            return Err(PaperRankError::NoRelevantPapers);
        }

        let project_context = project.map(ProjectContext::render_for_answer);
        let papers: Vec<&Paper> = sources.iter().map(|s| &s.paper).collect();
        let prompt = build_answer_prompt(question, &papers, project_context.as_deref());

        tracing::info!("Generating answer from {} papers", sources.len());
        let answer = self.generate(prompt).await?;

        Ok(Answer {
            question: question.to_string(),
            answer,
            sources,
            project_context,
        })
    }

    /// Summarise the papers saved to a project, optionally focusing on a topic
    pub async fn summarize(
        &self,
        project: &ProjectContext,
        saved: &[SavedPaper],
        focus: Option<&str>,
    ) -> Result<Summary> {
        if saved.is_empty() {
            return Err(PaperRankError::NoSavedPapers(project.name.clone()));
        }

        let prompt = build_summary_prompt(project, saved, focus);

        tracing::info!("Summarizing {} papers for project {}", saved.len(), project.name);
        let summary = self.generate(prompt).await?;

        Ok(Summary {
            summary,
            papers_summarized: saved.iter().map(SavedPaper::to_scored).collect(),
        })
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let messages = vec![
            ChatMessage::system("You are an expert research assistant helping with academic research."),
            ChatMessage::user(prompt),
        ];
        let text = self
            .client
            .chat_completion(messages)
            .await
            .map_err(PaperRankError::generation)?;

        if text.trim().is_empty() {
            return Err(PaperRankError::Generation(
                "model returned an empty response".to_string(),
            ));
        }
        Ok(text)
    }
}

fn separator() -> String {
    format!("\n{}\n", "=".repeat(SEPARATOR_WIDTH))
}

/// Numbered paper blocks for the answer prompt
pub fn build_paper_context(papers: &[&Paper]) -> String {
    let blocks: Vec<String> = papers
        .iter()
        .enumerate()
        .map(|(i, paper)| {
            format!(
                "Paper {}:\nTitle: {}\nAuthors: {}\nArXiv ID: {}\nAbstract: {}\n",
                i + 1,
                paper.title,
                paper.short_authors(),
                paper.id,
                paper.abstract_text
            )
        })
        .collect();
    format!("{}{}", separator(), blocks.join(&separator()))
}

pub fn build_answer_prompt(question: &str, papers: &[&Paper], project_context: Option<&str>) -> String {
    format!(
        r#"Answer the following question based on the provided research papers.
{}
Question: {}

Research Papers Available:
{}

Instructions:
- Provide a comprehensive, well-structured answer based on the papers above
- Cite specific papers when making claims (e.g., "According to Smith et al. (Paper 1)...")
- Synthesize information across multiple papers when relevant
- If the papers don't fully answer the question, acknowledge this and answer what you can
- Be specific and technical, but also clear
- Highlight key findings, methodologies, or insights
- If there are conflicting viewpoints in the papers, mention them

Answer:"#,
        project_context.unwrap_or(""),
        question,
        build_paper_context(papers)
    )
}

pub fn build_summary_prompt(
    project: &ProjectContext,
    saved: &[SavedPaper],
    focus: Option<&str>,
) -> String {
    let blocks: Vec<String> = saved
        .iter()
        .map(|s| {
            format!(
                "Paper: {}\nAuthors: {}\nArXiv ID: {}\nAbstract: {}\nNotes: {}\n",
                s.paper.title,
                s.paper.short_authors(),
                s.paper.id,
                s.paper.abstract_text,
                s.notes.as_deref().unwrap_or("None")
            )
        })
        .collect();

    let focus_instruction = focus
        .filter(|f| !f.trim().is_empty())
        .map(|f| format!("\nPay special attention to: {}\n", f))
        .unwrap_or_default();

    format!(
        r#"Provide a comprehensive summary of papers collected for this research project.

Project: {}
Project Context: {}
Research Questions: {}

Papers in Collection ({} papers):
{}{}
{}
Instructions:
- Provide an overview of how these papers relate to the project goals
- Highlight main themes and findings across the papers
- Identify which papers address which research questions
- Note methodologies and approaches that could be useful
- Suggest any gaps in the current collection
- Keep it structured and actionable

Summary:"#,
        project.name,
        project.context,
        project.research_questions.join(", "),
        saved.len(),
        separator(),
        blocks.join(&separator()),
        focus_instruction
    )
}
