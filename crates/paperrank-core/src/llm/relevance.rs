//! LLM relevance scoring of papers against a research project

use super::{ChatMessage, LLMClient, Relevance, RelevanceScorer, ScoringFailure};
use crate::paper::Paper;
use async_trait::async_trait;
use std::sync::Arc;

/// Explanation used when the model returns a bare score
pub const NO_EXPLANATION: &str = "No explanation provided";

/// Relevance scorer backed by a chat completion model
pub struct LlmRelevanceScorer {
    client: Arc<dyn LLMClient>,
}

impl LlmRelevanceScorer {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RelevanceScorer for LlmRelevanceScorer {
    async fn score(
        &self,
        project_context: &str,
        paper: &Paper,
    ) -> Result<Relevance, ScoringFailure> {
        let messages = vec![
            ChatMessage::system(
                "You rate research papers for relevance. Answer in the form SCORE|EXPLANATION.",
            ),
            ChatMessage::user(build_relevance_prompt(project_context, paper)),
        ];

        let response = self
            .client
            .chat_completion(messages)
            .await
            .map_err(|e| ScoringFailure::Llm(e.to_string()))?;

        parse_relevance_response(&response)
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

pub fn build_relevance_prompt(project_context: &str, paper: &Paper) -> String {
    format!(
        r#"Given this research project:
{}

Rate how relevant this research paper is to the project on a scale of 0-100, where:
- 0 = Completely irrelevant
- 50 = Somewhat relevant
- 100 = Highly relevant and directly applicable

Paper Title: {}
Paper Abstract: {}

Respond with ONLY a number between 0-100, followed by a brief one-sentence explanation.
Format to respond with: SCORE|EXPLANATION, where SCORE is the numerical score
Example Response: 85|This paper directly addresses the privacy-preserving techniques needed for your healthcare AI project.
"#,
        project_context, paper.title, paper.abstract_text
    )
}

/// Parse a `SCORE|EXPLANATION` response.
///
/// Without a `|`, the first whitespace-delimited token is taken as the score.
/// An empty explanation is replaced by [`NO_EXPLANATION`]. Scores are clamped
/// to 0-100.
pub fn parse_relevance_response(response: &str) -> Result<Relevance, ScoringFailure> {
    let response = response.trim();
    if response.is_empty() {
        return Err(ScoringFailure::EmptyResponse);
    }

    let (score_str, explanation) = match response.split_once('|') {
        Some((score, explanation)) => (score.trim(), explanation.trim()),
        None => (response.split_whitespace().next().unwrap_or(""), ""),
    };

    let score = score_str
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())
        .ok_or_else(|| ScoringFailure::InvalidScore(score_str.to_string()))?;

    let explanation = if explanation.is_empty() {
        NO_EXPLANATION.to_string()
    } else {
        explanation.to_string()
    };

    Ok(Relevance {
        score: score.clamp(0.0, 100.0),
        explanation,
    })
}
