//! Papers saved to projects

use super::Database;
use crate::error::{PaperRankError, Result};
use crate::index::VectorIndex;
use crate::paper::{Paper, ScoredPaper};
use chrono::Utc;
use rusqlite::params;

/// A paper saved to a project, with the payload captured at save time
#[derive(Debug, Clone, serde::Serialize)]
pub struct SavedPaper {
    pub project_id: String,
    pub paper: Paper,
    pub notes: Option<String>,
    pub added_at: String,
}

impl SavedPaper {
    /// Saved papers carry no query score
    pub fn to_scored(&self) -> ScoredPaper {
        let mut scored = ScoredPaper::new(self.paper.clone(), 0.0);
        scored.is_saved = true;
        scored
    }
}

impl Database {
    /// Save a paper from the vector index to a project.
    ///
    /// Fails with `ProjectNotFound`, `AlreadySaved` (nothing is written) or
    /// `PaperNotFound` when the index has no paper with that id.
    pub async fn save_paper(
        &self,
        index: &dyn VectorIndex,
        project_id: &str,
        paper_id: &str,
        notes: Option<&str>,
    ) -> Result<SavedPaper> {
        self.require_project(project_id)?;

        if self.is_paper_saved(project_id, paper_id)? {
            return Err(PaperRankError::AlreadySaved {
                project_id: project_id.to_string(),
                paper_id: paper_id.to_string(),
            });
        }

        let paper = index
            .find_paper(paper_id)
            .await?
            .ok_or_else(|| PaperRankError::PaperNotFound(paper_id.to_string()))?;

        self.insert_saved_paper(project_id, paper, notes)
    }

    /// Store a paper snapshot under a project
    pub fn insert_saved_paper(
        &self,
        project_id: &str,
        paper: Paper,
        notes: Option<&str>,
    ) -> Result<SavedPaper> {
        let now = Utc::now().to_rfc3339();
        let result = self.conn.execute(
            "INSERT INTO project_papers (id, project_id, paper_id, paper_data, notes, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                uuid::Uuid::now_v7().to_string(),
                project_id,
                paper.id,
                serde_json::to_string(&paper)?,
                notes,
                now
            ],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(PaperRankError::AlreadySaved {
                    project_id: project_id.to_string(),
                    paper_id: paper.id,
                });
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(project = %project_id, paper = %paper.id, "saved paper");

        Ok(SavedPaper {
            project_id: project_id.to_string(),
            paper,
            notes: notes.map(str::to_string),
            added_at: now,
        })
    }

    /// Whether a paper is already saved to a project
    pub fn is_paper_saved(&self, project_id: &str, paper_id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM project_papers WHERE project_id = ?1 AND paper_id = ?2",
            params![project_id, paper_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All papers saved to a project, in the order they were added
    pub fn saved_papers(&self, project_id: &str) -> Result<Vec<SavedPaper>> {
        self.require_project(project_id)?;

        let mut stmt = self.conn.prepare(
            "SELECT paper_data, notes, added_at FROM project_papers
             WHERE project_id = ?1 ORDER BY rowid",
        )?;

        let rows = stmt
            .query_map(params![project_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(data, notes, added_at)| -> Result<SavedPaper> {
                Ok(SavedPaper {
                    project_id: project_id.to_string(),
                    paper: serde_json::from_str(&data)?,
                    notes,
                    added_at,
                })
            })
            .collect()
    }

    /// Remove a paper from a project
    pub fn remove_saved_paper(&self, project_id: &str, paper_id: &str) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM project_papers WHERE project_id = ?1 AND paper_id = ?2",
            params![project_id, paper_id],
        )?;

        if rows == 0 {
            return Err(PaperRankError::PaperNotInProject {
                project_id: project_id.to_string(),
                paper_id: paper_id.to_string(),
            });
        }
        Ok(())
    }
}
