//! Query embedding and nearest-neighbor retrieval

use crate::error::{PaperRankError, Result};
use crate::index::VectorIndex;
use crate::llm::Embedder;
use crate::paper::ScoredPaper;
use std::sync::Arc;

/// Embeds queries and fetches the candidate pool from the vector index.
///
/// Upstream embedding or index failures are a [`PaperRankError::Retrieval`]
/// for the whole request. A missing or misconfigured collection and bad
/// input pass through unchanged, since retrying cannot fix them.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn index(&self) -> &Arc<dyn VectorIndex> {
        &self.index
    }

    /// Candidate pool for `query`: at most `limit` papers, best first
    pub async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<ScoredPaper>> {
        let query_vector = self
            .embedder
            .embed(query)
            .await
            .map_err(upstream)?;

        let hits = self
            .index
            .search(&query_vector, limit)
            .await
            .map_err(upstream)?;

        tracing::debug!(query, limit, found = hits.len(), "vector search finished");

        Ok(hits
            .into_iter()
            .map(|hit| ScoredPaper::new(hit.paper, hit.score))
            .collect())
    }
}

fn upstream(err: PaperRankError) -> PaperRankError {
    match err {
        PaperRankError::Index(_) | PaperRankError::Config(_) | PaperRankError::InvalidInput(_) => {
            err
        }
        other => PaperRankError::retrieval(other),
    }
}
