//! Wiring of the HTTP-backed services from configuration

use paperrank_core::{
    AnswerGenerator, Config, HttpEmbedder, LLMClient, LlmRelevanceScorer, OpenAiClient,
    QdrantIndex, RankingPipeline, Result, Retriever, VectorIndex,
};
use std::sync::Arc;

/// LLM client, embedder and vector index built once per command.
///
/// Construction makes no network calls.
pub struct Services {
    client: Arc<dyn LLMClient>,
    index: Arc<QdrantIndex>,
    retriever: Retriever,
    scoring_concurrency: usize,
    max_num_papers: usize,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client: Arc<dyn LLMClient> = Arc::new(OpenAiClient::new(config.llm_service.clone())?);
        let embedder = Arc::new(HttpEmbedder::new(
            client.clone(),
            config.llm_service.embedding_model.clone(),
        ));
        let index = Arc::new(QdrantIndex::new(&config.vector_index)?);
        let retriever = Retriever::new(embedder, index.clone() as Arc<dyn VectorIndex>);

        Ok(Self {
            client,
            index,
            retriever,
            scoring_concurrency: config.ranking.scoring_concurrency,
            max_num_papers: config.answer.max_num_papers,
        })
    }

    pub fn index(&self) -> &QdrantIndex {
        &self.index
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    pub fn pipeline(&self) -> RankingPipeline {
        let scorer = Arc::new(LlmRelevanceScorer::new(self.client.clone()));
        RankingPipeline::new(self.retriever.clone(), scorer)
            .with_scoring_concurrency(self.scoring_concurrency)
    }

    pub fn answer_generator(&self) -> AnswerGenerator {
        AnswerGenerator::new(self.retriever.clone(), self.client.clone())
            .with_max_papers(self.max_num_papers)
    }
}
