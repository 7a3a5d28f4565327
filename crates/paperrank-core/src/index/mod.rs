//! Vector index adapters
//!
//! The paper corpus lives in a named collection of a vector index. Points are
//! keyed by [`crate::paper::point_id`], so upserts are idempotent.

mod memory;
mod qdrant;

pub use memory::MemoryIndex;
pub use qdrant::QdrantIndex;

use crate::error::Result;
use crate::paper::Paper;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Similarity metric of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Cosine,
    Dot,
    Euclid,
}

impl Distance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distance::Cosine => "Cosine",
            Distance::Dot => "Dot",
            Distance::Euclid => "Euclid",
        }
    }
}

/// A point to write into the index
#[derive(Debug, Clone)]
pub struct IndexPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub paper: Paper,
}

impl IndexPoint {
    /// Build a point keyed by the paper's deterministic id
    pub fn new(paper: Paper, vector: Vec<f32>) -> Self {
        Self {
            id: paper.point_id(),
            vector,
            paper,
        }
    }
}

/// A search hit, in descending similarity order within a result list
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub paper: Paper,
    pub score: f32,
}

/// Nearest-neighbor index over paper vectors
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the collection if missing; no-op when it already matches.
    ///
    /// An existing collection with a different dimension or metric is a
    /// configuration error.
    async fn ensure_collection(&self, dimensions: usize, distance: Distance) -> Result<()>;

    /// Whether the collection exists
    async fn collection_exists(&self) -> Result<bool>;

    /// Insert or overwrite points by id
    async fn upsert(&self, points: Vec<IndexPoint>) -> Result<()>;

    /// Top `limit` papers by similarity to `vector`, best first
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<SearchHit>>;

    /// Exact lookup by paper accession id (payload field `id`)
    async fn find_paper(&self, paper_id: &str) -> Result<Option<Paper>>;

    /// Number of points in the collection
    async fn count(&self) -> Result<usize>;
}

/// Cosine similarity between two vectors (0 for mismatched or zero vectors)
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
