//! Paper search and relevance ranking
//!
//! Provides:
//! - Vector retrieval (embed the query, nearest neighbors from the index)
//! - Plain search annotated with project membership
//! - Two-tier ranking: LLM relevance for the head, vector score for the tail

mod pipeline;
mod retriever;

pub use pipeline::RankingPipeline;
pub use retriever::Retriever;

use crate::config::RankingConfig;
use crate::error::{PaperRankError, Result};

/// Plain vector search request
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    /// Number of papers to retrieve
    pub top_k: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize) -> Self {
        Self {
            query: query.into(),
            top_k,
        }
    }

    /// Check bounds before any network call is made
    pub fn validate(&self, limits: &RankingConfig) -> Result<()> {
        validate_query(&self.query)?;
        validate_range("top_k", self.top_k, limits.max_top_k)
    }
}

/// Search-and-rank request
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub query: String,
    /// Size of the candidate pool
    pub top_k: usize,
    /// How many of the best candidates get LLM relevance scoring
    pub rerank_top_n: usize,
}

impl RankRequest {
    pub fn new(query: impl Into<String>, top_k: usize, rerank_top_n: usize) -> Self {
        Self {
            query: query.into(),
            top_k,
            rerank_top_n,
        }
    }

    /// Check bounds before any network call is made.
    ///
    /// `rerank_top_n` may exceed `top_k`; the whole pool is then scored.
    pub fn validate(&self, limits: &RankingConfig) -> Result<()> {
        validate_query(&self.query)?;
        validate_range("top_k", self.top_k, limits.max_top_k)?;
        validate_range("rerank_top_n", self.rerank_top_n, limits.max_rerank_top_n)
    }
}

fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(PaperRankError::InvalidInput("query must not be empty".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_range(name: &str, value: usize, max: usize) -> Result<()> {
    if value == 0 || value > max {
        return Err(PaperRankError::InvalidInput(format!(
            "{} must be between 1 and {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}
