//! Stub services shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use paperrank_core::error::{PaperRankError, Result};
use paperrank_core::{
    ChatMessage, Distance, Embedder, IndexPoint, LLMClient, Paper, Relevance, RelevanceScorer,
    ScoringFailure, SearchHit, VectorIndex,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn paper(id: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: format!("Paper {}", id),
        abstract_text: format!("Abstract of {}", id),
        url: format!("http://arxiv.org/abs/{}", id),
        authors: vec!["A. Author".to_string(), "B. Author".to_string()],
        category: Some("cs.LG".to_string()),
    }
}

/// Returns the same vector for every text
pub struct ConstantEmbedder {
    pub vector: Vec<f32>,
}

#[async_trait]
impl Embedder for ConstantEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.vector.clone())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| self.vector.clone()).collect())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }

    fn model_name(&self) -> &str {
        "constant"
    }
}

/// Embedding service that is down
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(PaperRankError::ExternalError("connection refused".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(PaperRankError::ExternalError("connection refused".to_string()))
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "down"
    }
}

/// Index returning a fixed list of (paper, score) hits in the given order
pub struct FixedIndex {
    pub hits: Vec<(Paper, f32)>,
}

impl FixedIndex {
    pub fn new(hits: &[(&str, f32)]) -> Self {
        Self {
            hits: hits.iter().map(|(id, s)| (paper(id), *s)).collect(),
        }
    }
}

#[async_trait]
impl VectorIndex for FixedIndex {
    async fn ensure_collection(&self, _dimensions: usize, _distance: Distance) -> Result<()> {
        Ok(())
    }

    async fn collection_exists(&self) -> Result<bool> {
        Ok(true)
    }

    async fn upsert(&self, _points: Vec<IndexPoint>) -> Result<()> {
        Err(PaperRankError::Index("read-only".to_string()))
    }

    async fn search(&self, _vector: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        Ok(self
            .hits
            .iter()
            .take(limit)
            .map(|(paper, score)| SearchHit {
                paper: paper.clone(),
                score: *score,
            })
            .collect())
    }

    async fn find_paper(&self, paper_id: &str) -> Result<Option<Paper>> {
        Ok(self
            .hits
            .iter()
            .find(|(p, _)| p.id == paper_id)
            .map(|(p, _)| p.clone()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.hits.len())
    }
}

/// Scorer with a fixed score per paper id; ids without a score fail
pub struct TableScorer {
    pub scores: HashMap<String, f64>,
    pub calls: AtomicUsize,
    pub contexts: Mutex<Vec<String>>,
}

impl TableScorer {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores.iter().map(|(id, s)| (id.to_string(), *s)).collect(),
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RelevanceScorer for TableScorer {
    async fn score(
        &self,
        project_context: &str,
        paper: &Paper,
    ) -> std::result::Result<Relevance, ScoringFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(project_context.to_string());
        match self.scores.get(&paper.id) {
            Some(score) => Ok(Relevance {
                score: *score,
                explanation: format!("stub score for {}", paper.id),
            }),
            None => Err(ScoringFailure::Llm("model timed out".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "table"
    }
}

/// Scorer that answers each paper after its own delay and records the
/// order in which calls finish. Papers with no score fail after the delay.
pub struct DelayedScorer {
    pub plan: HashMap<String, (u64, Option<f64>)>,
    pub finished: Mutex<Vec<String>>,
}

impl DelayedScorer {
    /// `(paper id, delay in ms, score)`
    pub fn new(plan: &[(&str, u64, Option<f64>)]) -> Self {
        Self {
            plan: plan
                .iter()
                .map(|(id, delay, score)| (id.to_string(), (*delay, *score)))
                .collect(),
            finished: Mutex::new(Vec::new()),
        }
    }

    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelevanceScorer for DelayedScorer {
    async fn score(
        &self,
        _project_context: &str,
        paper: &Paper,
    ) -> std::result::Result<Relevance, ScoringFailure> {
        let (delay, score) = self.plan.get(&paper.id).copied().unwrap_or((0, None));
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.finished.lock().unwrap().push(paper.id.clone());
        match score {
            Some(score) => Ok(Relevance {
                score,
                explanation: format!("scored after {}ms", delay),
            }),
            None => Err(ScoringFailure::Llm("connection reset".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "delayed"
    }
}

/// Chat model that records prompts and replies with a canned answer
pub struct CannedLlm {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl CannedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_user_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .and_then(|messages| messages.iter().find(|m| m.role == "user"))
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLMClient for CannedLlm {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.prompts.lock().unwrap().push(messages);
        self.reply
            .clone()
            .ok_or_else(|| PaperRankError::Llm("502 Bad Gateway".to_string()))
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn embedding_dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "canned"
    }
}
