//! PaperRank Core Library
//!
//! Project-aware ranking of research papers.
//!
//! # Features
//! - Vector retrieval over an arXiv corpus (Qdrant or in-memory)
//! - Two-tier ranking: LLM relevance scores for the head of the pool,
//!   vector similarity for the tail
//! - Retrieval-augmented answers and project summaries
//! - SQLite storage for research projects and saved papers
//! - JSON / JSON Lines corpus ingestion with deterministic point ids

pub mod answer;
pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod ingest;
pub mod llm;
pub mod paper;
pub mod search;

pub use answer::{Answer, AnswerGenerator, Summary};
pub use config::{Config, LLMServiceConfig, VectorIndexConfig};
pub use db::{Database, NewProject, Project, ProjectStore, SavedPaper};
pub use error::{Error, PaperRankError, Result};
pub use index::{Distance, IndexPoint, MemoryIndex, QdrantIndex, SearchHit, VectorIndex};
pub use ingest::{ingest_papers, load_papers, IngestProgress, IngestStats};
pub use llm::{
    ChatMessage, Embedder, HttpEmbedder, LLMClient, LlmRelevanceScorer, OpenAiClient, Relevance,
    RelevanceScorer, ScoringFailure,
};
pub use paper::{point_id, Paper, ProjectContext, RankedResults, ScoredPaper};
pub use search::{RankRequest, RankingPipeline, Retriever, SearchRequest};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "paperrank";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "paperrank";
