//! LLM trait definitions

use crate::error::Result;
use crate::paper::Paper;
use async_trait::async_trait;
use thiserror::Error;

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for batch of texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Relevance judgement for one (project, paper) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    /// 0-100
    pub score: f64,
    pub explanation: String,
}

/// Per-paper scoring failure.
///
/// Never surfaced to callers of the ranking pipeline; the paper falls back
/// to its vector score instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringFailure {
    #[error("empty response from relevance model")]
    EmptyResponse,

    #[error("could not parse relevance score from {0:?}")]
    InvalidScore(String),

    #[error("relevance model call failed: {0}")]
    Llm(String),
}

/// Project-aware paper relevance scoring
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    /// Score one paper against the rendered project context
    async fn score(
        &self,
        project_context: &str,
        paper: &Paper,
    ) -> std::result::Result<Relevance, ScoringFailure>;

    /// Get model name
    fn model_name(&self) -> &str;
}
