//! In-process vector index with brute-force similarity search

use super::{cosine_similarity, Distance, IndexPoint, SearchHit, VectorIndex};
use crate::error::{PaperRankError, Result};
use crate::paper::Paper;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

struct Collection {
    dimensions: usize,
    distance: Distance,
    points: HashMap<String, (Vec<f32>, Paper)>,
}

/// Vector index held in memory.
///
/// Same contract as the Qdrant adapter; ties in similarity are ordered by
/// point id so results are deterministic.
#[derive(Default)]
pub struct MemoryIndex {
    collection: RwLock<Option<Collection>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err<T>(e: std::sync::PoisonError<T>) -> PaperRankError {
        PaperRankError::Index(format!("memory index lock poisoned: {}", e))
    }
}

fn similarity(distance: Distance, a: &[f32], b: &[f32]) -> f32 {
    match distance {
        Distance::Cosine => cosine_similarity(a, b),
        Distance::Dot => a.iter().zip(b).map(|(x, y)| x * y).sum(),
        Distance::Euclid => -a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt(),
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn ensure_collection(&self, dimensions: usize, distance: Distance) -> Result<()> {
        let mut guard = self.collection.write().map_err(Self::lock_err)?;
        match guard.as_ref() {
            Some(existing) if existing.dimensions == dimensions && existing.distance == distance => {
                Ok(())
            }
            Some(existing) => Err(PaperRankError::Config(format!(
                "collection exists with {} dimensions ({}), requested {} ({})",
                existing.dimensions,
                existing.distance.as_str(),
                dimensions,
                distance.as_str()
            ))),
            None => {
                *guard = Some(Collection {
                    dimensions,
                    distance,
                    points: HashMap::new(),
                });
                tracing::info!(dimensions, "created in-memory collection");
                Ok(())
            }
        }
    }

    async fn collection_exists(&self) -> Result<bool> {
        Ok(self.collection.read().map_err(Self::lock_err)?.is_some())
    }

    async fn upsert(&self, points: Vec<IndexPoint>) -> Result<()> {
        let mut guard = self.collection.write().map_err(Self::lock_err)?;
        let collection = guard
            .as_mut()
            .ok_or_else(|| PaperRankError::Index("collection does not exist".to_string()))?;

        if let Some(bad) = points.iter().find(|p| p.vector.len() != collection.dimensions) {
            return Err(PaperRankError::Index(format!(
                "point {} has {} dimensions, collection expects {}",
                bad.id,
                bad.vector.len(),
                collection.dimensions
            )));
        }

        for point in points {
            collection.points.insert(point.id, (point.vector, point.paper));
        }
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        let guard = self.collection.read().map_err(Self::lock_err)?;
        let collection = guard
            .as_ref()
            .ok_or_else(|| PaperRankError::Index("collection does not exist".to_string()))?;

        if vector.len() != collection.dimensions {
            return Err(PaperRankError::Index(format!(
                "query has {} dimensions, collection expects {}",
                vector.len(),
                collection.dimensions
            )));
        }

        let mut scored: Vec<(&String, f32, &Paper)> = collection
            .points
            .iter()
            .map(|(id, (v, paper))| (id, similarity(collection.distance, vector, v), paper))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, score, paper)| SearchHit {
                paper: paper.clone(),
                score,
            })
            .collect())
    }

    async fn find_paper(&self, paper_id: &str) -> Result<Option<Paper>> {
        let guard = self.collection.read().map_err(Self::lock_err)?;
        Ok(guard.as_ref().and_then(|c| {
            c.points
                .values()
                .find(|(_, paper)| paper.id == paper_id)
                .map(|(_, paper)| paper.clone())
        }))
    }

    async fn count(&self) -> Result<usize> {
        let guard = self.collection.read().map_err(Self::lock_err)?;
        Ok(guard.as_ref().map(|c| c.points.len()).unwrap_or(0))
    }
}
