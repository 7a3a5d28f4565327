//! Error types for paperrank

use thiserror::Error;

/// Result type alias using PaperRankError
pub type Result<T> = std::result::Result<T, PaperRankError>;

/// Error type alias for convenience
pub type Error = PaperRankError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const UNAVAILABLE: i32 = 4;
    pub const CONFLICT: i32 = 5;
}

/// Main error type for paperrank
#[derive(Debug, Error)]
pub enum PaperRankError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Paper not found: {0}")]
    PaperNotFound(String),

    #[error("Paper {paper_id} is not saved to project {project_id}")]
    PaperNotInProject {
        project_id: String,
        paper_id: String,
    },

    #[error("Paper {paper_id} is already saved to project {project_id}")]
    AlreadySaved {
        project_id: String,
        paper_id: String,
    },

    #[error("No relevant papers found")]
    NoRelevantPapers,

    #[error("No papers saved to project {0}")]
    NoSavedPapers(String),

    /// Embedding service or vector index unreachable during a query
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// Single-call LLM generation (answer, summary) failed
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalError(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl PaperRankError {
    /// Wrap an upstream error raised while embedding or searching
    pub fn retrieval(err: impl std::fmt::Display) -> Self {
        Self::Retrieval(err.to_string())
    }

    /// Wrap an upstream error raised by a whole-request generation call
    pub fn generation(err: impl std::fmt::Display) -> Self {
        Self::Generation(err.to_string())
    }

    /// Whether the failure came from an upstream service and may succeed on retry.
    ///
    /// Missing entities, empty result pools and bad input are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Retrieval(_) | Self::Generation(_) | Self::Http(_) | Self::ExternalError(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProjectNotFound(_)
            | Self::PaperNotFound(_)
            | Self::PaperNotInProject { .. }
            | Self::NoRelevantPapers
            | Self::NoSavedPapers(_) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            Self::AlreadySaved { .. } => exit_codes::CONFLICT,
            Self::Retrieval(_) | Self::Generation(_) | Self::Http(_) | Self::ExternalError(_) => {
                exit_codes::UNAVAILABLE
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
