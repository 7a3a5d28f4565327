//! HTTP-based embedder using external LLM service

use super::{Embedder, LLMClient};
use crate::config::LLMServiceConfig;
use crate::error::{PaperRankError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Embedder that uses external HTTP service (vLLM, OpenAI, etc.)
///
/// Every returned vector is checked against the configured dimensionality so
/// a misconfigured model cannot write mixed-size vectors into the corpus.
pub struct HttpEmbedder {
    client: Arc<dyn LLMClient>,
    model: String,
}

impl HttpEmbedder {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let model = config.embedding_model.clone();
        let client = super::OpenAiClient::new(config)?;
        Ok(Self::new(Arc::new(client), model))
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        let expected = self.client.embedding_dimensions();
        if embedding.len() != expected {
            return Err(PaperRankError::Config(format!(
                "Embedding model {} returned {} dimensions, expected {}",
                self.model,
                embedding.len(),
                expected
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.client.embed(text).await?;
        self.check_dimensions(&embedding)?;
        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.client.embed_batch(texts).await?;
        for embedding in &embeddings {
            self.check_dimensions(embedding)?;
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.client.embedding_dimensions()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
