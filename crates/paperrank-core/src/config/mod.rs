//! Configuration management

use crate::error::{PaperRankError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration (chat completions and embeddings)
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Vector index configuration
    #[serde(default)]
    pub vector_index: VectorIndexConfig,

    /// Ranking pipeline limits and defaults
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Augmented answer limits and defaults
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Corpus loading
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the OpenAI-compatible service for chat completions
    pub url: String,

    /// Model name for chat completions (relevance scoring, answers)
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for embeddings service (can be different from LLM URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions, constant across the corpus
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature for chat completions
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl LLMServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            model: default_chat_model(),
            embedding_url: None,
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            api_key: None,
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
        }
    }
}

fn default_chat_model() -> String {
    "meta-llama/Llama-3.1-8B-Instruct".to_string()
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-mpnet-base-v2".to_string()
}

fn default_embedding_dimensions() -> usize {
    768
}

fn default_timeout() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.2
}

/// Vector index (Qdrant) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    /// Base URL of the Qdrant REST API
    #[serde(default = "default_index_url")]
    pub url: String,

    /// Collection holding the paper corpus
    #[serde(default = "default_collection")]
    pub collection: String,

    /// API key (optional)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            collection: default_collection(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_index_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_collection() -> String {
    "all_papers".to_string()
}

/// Ranking pipeline bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub default_top_k: usize,
    pub max_top_k: usize,
    pub default_rerank_top_n: usize,
    pub max_rerank_top_n: usize,
    /// Concurrent relevance scoring calls per request (1 = serial)
    pub scoring_concurrency: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_top_k: 10,
            max_top_k: 100,
            default_rerank_top_n: 5,
            max_rerank_top_n: 20,
            scoring_concurrency: 1,
        }
    }
}

/// Augmented answer bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub default_num_papers: usize,
    pub max_num_papers: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            default_num_papers: 5,
            max_num_papers: 10,
        }
    }
}

/// Corpus loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Points per upsert request
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

impl Config {
    /// Load config from default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load config from a specific path (defaults if it does not exist)
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Config as written on disk (defaults if absent), without environment
    /// overrides. Use this when persisting so env-supplied API keys stay out
    /// of the file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path())
    }

    /// Save config to a specific path, creating parent directories
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Apply `PAPERRANK_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        let llm = &mut self.llm_service;
        if let Ok(val) = std::env::var("PAPERRANK_LLM_URL") {
            llm.url = val;
        }
        if let Ok(val) = std::env::var("PAPERRANK_LLM_MODEL") {
            llm.model = val;
        }
        if let Ok(val) = std::env::var("PAPERRANK_LLM_API_KEY") {
            llm.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("PAPERRANK_EMBEDDING_URL") {
            llm.embedding_url = Some(val);
        }
        if let Ok(val) = std::env::var("PAPERRANK_EMBEDDING_MODEL") {
            llm.embedding_model = val;
        }
        if let Some(dims) = std::env::var("PAPERRANK_EMBEDDING_DIMS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            llm.embedding_dimensions = dims;
        }

        let index = &mut self.vector_index;
        if let Ok(val) = std::env::var("PAPERRANK_QDRANT_URL") {
            index.url = val;
        }
        if let Ok(val) = std::env::var("PAPERRANK_QDRANT_API_KEY") {
            index.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("PAPERRANK_COLLECTION") {
            index.collection = val;
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.llm_service.embedding_dimensions == 0 {
            return Err(PaperRankError::Config(
                "llm_service.embedding_dimensions must be positive".to_string(),
            ));
        }
        if self.vector_index.collection.trim().is_empty() {
            return Err(PaperRankError::Config(
                "vector_index.collection must not be empty".to_string(),
            ));
        }
        let r = &self.ranking;
        if r.default_top_k == 0 || r.default_top_k > r.max_top_k {
            return Err(PaperRankError::Config(format!(
                "ranking.default_top_k must be within 1..={}",
                r.max_top_k
            )));
        }
        if r.default_rerank_top_n == 0 || r.default_rerank_top_n > r.max_rerank_top_n {
            return Err(PaperRankError::Config(format!(
                "ranking.default_rerank_top_n must be within 1..={}",
                r.max_rerank_top_n
            )));
        }
        if r.scoring_concurrency == 0 {
            return Err(PaperRankError::Config(
                "ranking.scoring_concurrency must be at least 1".to_string(),
            ));
        }
        let a = &self.answer;
        if a.default_num_papers == 0 || a.default_num_papers > a.max_num_papers {
            return Err(PaperRankError::Config(format!(
                "answer.default_num_papers must be within 1..={}",
                a.max_num_papers
            )));
        }
        if self.ingest.batch_size == 0 {
            return Err(PaperRankError::Config(
                "ingest.batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
