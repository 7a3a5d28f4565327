//! LLM integration
//!
//! Provides traits and implementations for:
//! - Embedding generation via external services (vLLM, OpenAI, etc.)
//! - Chat completions for relevance scoring and answer generation
//! - Relevance scoring of papers against a project

mod client;
mod http_embedder;
mod relevance;
mod traits;

pub use client::{ChatMessage, LLMClient, OpenAiClient};
pub use http_embedder::HttpEmbedder;
pub use relevance::{
    build_relevance_prompt, parse_relevance_response, LlmRelevanceScorer, NO_EXPLANATION,
};
pub use traits::*;
