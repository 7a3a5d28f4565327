//! Corpus loading and indexing
//!
//! Paper records come from a JSON array or a JSON Lines file. Abstracts are
//! embedded in batches and upserted under their deterministic point ids, so
//! re-running an ingest over the same file is a no-op for the index.

use crate::error::{PaperRankError, Result};
use crate::index::{Distance, IndexPoint, VectorIndex};
use crate::llm::Embedder;
use crate::paper::Paper;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ingestion progress, reported after each batch
#[derive(Debug, Clone)]
pub struct IngestProgress {
    pub total: usize,
    pub processed: usize,
}

/// Ingestion statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    /// Records read from the source
    pub read: usize,
    /// Records dropped as repeats of an earlier accession id
    pub duplicates: usize,
    /// Records dropped for an empty id or abstract
    pub skipped: usize,
    /// Points written to the index
    pub upserted: usize,
    pub batches: usize,
}

/// Read paper records from a JSON array or JSON Lines file
pub fn load_papers(path: impl AsRef<Path>) -> Result<Vec<Paper>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        PaperRankError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read paper file {:?}: {}", path, e),
        ))
    })?;
    parse_papers(&content)
        .map_err(|e| PaperRankError::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Parse a JSON array of papers, or one paper object per line
pub fn parse_papers(content: &str) -> std::result::Result<Vec<Paper>, String> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| format!("invalid JSON array: {}", e));
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| format!("line {}: {}", idx + 1, e))
        })
        .collect()
}

/// Drop repeated accession ids (first occurrence wins) and unusable records
fn dedup(papers: Vec<Paper>, stats: &mut IngestStats) -> Vec<Paper> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(papers.len());

    for paper in papers {
        if paper.id.trim().is_empty() || paper.abstract_text.trim().is_empty() {
            tracing::warn!(id = %paper.id, "skipping paper without id or abstract");
            stats.skipped += 1;
            continue;
        }
        if !seen.insert(paper.id.clone()) {
            stats.duplicates += 1;
            continue;
        }
        kept.push(paper);
    }
    kept
}

/// Embed abstracts and upsert papers into the index in batches of `batch_size`
pub async fn ingest_papers(
    embedder: &dyn Embedder,
    index: &dyn VectorIndex,
    papers: Vec<Paper>,
    batch_size: usize,
    progress: Option<Box<dyn Fn(IngestProgress) + Send + Sync>>,
) -> Result<IngestStats> {
    if batch_size == 0 {
        return Err(PaperRankError::InvalidInput(
            "batch_size must be at least 1".to_string(),
        ));
    }

    let mut stats = IngestStats {
        read: papers.len(),
        ..Default::default()
    };
    let papers = dedup(papers, &mut stats);
    if papers.is_empty() {
        return Ok(stats);
    }

    index
        .ensure_collection(embedder.dimensions(), Distance::Cosine)
        .await?;

    let total = papers.len();
    for batch in papers.chunks(batch_size) {
        let texts: Vec<String> = batch.iter().map(|p| p.abstract_text.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;
        if vectors.len() != batch.len() {
            return Err(PaperRankError::Llm(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                vectors.len()
            )));
        }

        let points: Vec<IndexPoint> = batch
            .iter()
            .cloned()
            .zip(vectors)
            .map(|(paper, vector)| IndexPoint::new(paper, vector))
            .collect();
        index.upsert(points).await?;

        stats.upserted += batch.len();
        stats.batches += 1;
        tracing::debug!(batch = stats.batches, upserted = stats.upserted, "upserted batch");

        if let Some(ref cb) = progress {
            cb(IngestProgress {
                total,
                processed: stats.upserted,
            });
        }
    }

    tracing::info!(
        upserted = stats.upserted,
        duplicates = stats.duplicates,
        skipped = stats.skipped,
        "ingest finished"
    );
    Ok(stats)
}
