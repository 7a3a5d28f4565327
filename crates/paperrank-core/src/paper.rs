//! Paper records, scored results and project context

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Explanation attached when the relevance scorer failed for a head paper
pub const FALLBACK_EXPLANATION: &str = "Auto-scored based on vector similarity";

/// Explanation attached to papers outside the rerank budget
pub const NOT_RERANKED_EXPLANATION: &str = "Not re-ranked (outside top N)";

/// A paper as stored in the vector index payload.
///
/// `id` is the source accession string (arXiv short id such as `2401.01234v1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Paper {
    /// Deterministic vector index point id for this paper
    pub fn point_id(&self) -> String {
        point_id(&self.id)
    }

    /// Author list for prompts: first three names, `...` when truncated
    pub fn short_authors(&self) -> String {
        let shown = self.authors.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
        if self.authors.len() > 3 {
            format!("{}...", shown)
        } else {
            shown
        }
    }
}

/// Derive the vector index point id from a source accession string.
///
/// The first 16 bytes of the SHA-256 digest are read as a UUID, so the
/// same accession always maps to the same point and re-ingesting a paper
/// overwrites it.
pub fn point_id(accession: &str) -> String {
    let digest = Sha256::digest(accession.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Uuid::from_bytes(bytes).to_string()
}

/// A paper annotated with retrieval and relevance scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPaper {
    #[serde(flatten)]
    pub paper: Paper,
    /// Cosine similarity returned by the vector index
    pub vector_score: f32,
    /// 0-100, present once the paper went through ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_explanation: Option<String>,
    /// Whether the paper is saved to the project the query ran for
    #[serde(default)]
    pub is_saved: bool,
}

impl ScoredPaper {
    pub fn new(paper: Paper, vector_score: f32) -> Self {
        Self {
            paper,
            vector_score,
            relevance_score: None,
            relevance_explanation: None,
            is_saved: false,
        }
    }

    /// Vector similarity mapped onto the 0-100 relevance scale
    pub fn scaled_vector_score(&self) -> f64 {
        self.vector_score as f64 * 100.0
    }

    /// Score used for the final ordering of ranked results
    pub fn effective_score(&self) -> f64 {
        self.relevance_score
            .unwrap_or_else(|| self.scaled_vector_score())
    }

    /// Attach a vector-derived relevance score with the given explanation
    pub fn with_vector_relevance(mut self, explanation: &str) -> Self {
        self.relevance_score = Some(self.scaled_vector_score());
        self.relevance_explanation = Some(explanation.to_string());
        self
    }
}

/// Research project description consumed by ranking and answering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub name: String,
    pub context: String,
    #[serde(default)]
    pub research_questions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ProjectContext {
    /// Text block given to the relevance scorer and returned with ranked results
    pub fn render(&self) -> String {
        format!(
            "\nProject: {}\nContext: {}\nResearch Questions: {}\nKeywords: {}\n",
            self.name,
            self.context,
            self.research_questions.join(", "),
            self.keywords.join(", ")
        )
    }

    /// Text block used as optional context for augmented answers
    pub fn render_for_answer(&self) -> String {
        format!(
            "\nProject Context:\n- Project: {}\n- Focus: {}\n- Research Questions: {}\n- Keywords: {}\n",
            self.name,
            self.context,
            self.research_questions.join(", "),
            self.keywords.join(", ")
        )
    }
}

/// Output of the ranking pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResults {
    pub query: String,
    pub project_context: String,
    pub ranked_papers: Vec<ScoredPaper>,
    pub total_results: usize,
}
