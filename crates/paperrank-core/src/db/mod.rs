//! Database layer for paperrank
//!
//! SQLite storage for research projects and the papers saved to them. The
//! ranking core reads it through [`ProjectStore`].

mod projects;
mod saved_papers;
mod schema;

pub use projects::{NewProject, Project};
pub use saved_papers::SavedPaper;
pub use schema::Database;

use crate::error::Result;
use crate::paper::ProjectContext;
use std::collections::HashSet;
use std::path::PathBuf;

/// Read-only view of project data used by the ranking core
pub trait ProjectStore {
    /// Context of a project; `ProjectNotFound` if it does not exist
    fn project_context(&self, project_id: &str) -> Result<ProjectContext>;

    /// Accession ids of the papers saved to a project
    fn saved_paper_ids(&self, project_id: &str) -> Result<HashSet<String>>;
}

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("projects.sqlite")
    }
}
