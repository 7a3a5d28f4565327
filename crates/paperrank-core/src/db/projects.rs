//! Project operations

use super::{Database, ProjectStore};
use crate::error::{PaperRankError, Result};
use crate::paper::ProjectContext;
use chrono::Utc;
use rusqlite::{params, Row};
use std::collections::HashSet;

/// Project info
#[derive(Debug, Clone, serde::Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub context: String,
    pub research_questions: Vec<String>,
    pub keywords: Vec<String>,
    pub created_at: String,
    pub paper_count: usize,
}

impl Project {
    pub fn to_context(&self) -> ProjectContext {
        ProjectContext {
            name: self.name.clone(),
            context: self.context.clone(),
            research_questions: self.research_questions.clone(),
            keywords: self.keywords.clone(),
        }
    }
}

/// Fields supplied when creating a project
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub context: String,
    pub research_questions: Vec<String>,
    pub keywords: Vec<String>,
}

const SELECT_PROJECT: &str = "SELECT p.id, p.name, p.context, p.research_questions, p.keywords,
        p.created_at,
        (SELECT COUNT(*) FROM project_papers pp WHERE pp.project_id = p.id)
 FROM projects p";

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let questions: String = row.get(3)?;
    let keywords: String = row.get(4)?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        context: row.get(2)?,
        research_questions: serde_json::from_str(&questions).unwrap_or_default(),
        keywords: serde_json::from_str(&keywords).unwrap_or_default(),
        created_at: row.get(5)?,
        paper_count: row.get::<_, i64>(6)? as usize,
    })
}

impl Database {
    /// Create a project and return it
    pub fn create_project(&self, new: NewProject) -> Result<Project> {
        if new.name.trim().is_empty() {
            return Err(PaperRankError::InvalidInput(
                "project name must not be empty".to_string(),
            ));
        }

        let id = uuid::Uuid::now_v7().to_string();
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO projects (id, name, context, research_questions, keywords, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                new.name,
                new.context,
                serde_json::to_string(&new.research_questions)?,
                serde_json::to_string(&new.keywords)?,
                now
            ],
        )?;

        tracing::info!(project = %id, name = %new.name, "created project");

        Ok(Project {
            id,
            name: new.name,
            context: new.context,
            research_questions: new.research_questions,
            keywords: new.keywords,
            created_at: now,
            paper_count: 0,
        })
    }

    /// List all projects with saved paper counts, oldest first
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY p.rowid", SELECT_PROJECT))?;

        let results = stmt
            .query_map([], project_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }

    /// Get project by id
    pub fn get_project(&self, project_id: &str) -> Result<Option<Project>> {
        let result = self.conn.query_row(
            &format!("{} WHERE p.id = ?1", SELECT_PROJECT),
            params![project_id],
            project_from_row,
        );
        match result {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get project by id, `ProjectNotFound` if missing
    pub fn require_project(&self, project_id: &str) -> Result<Project> {
        self.get_project(project_id)?
            .ok_or_else(|| PaperRankError::ProjectNotFound(project_id.to_string()))
    }

    /// Delete a project and all papers saved to it
    pub fn delete_project(&self, project_id: &str) -> Result<()> {
        self.require_project(project_id)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM project_papers WHERE project_id = ?1",
            params![project_id],
        )?;
        tx.execute("DELETE FROM projects WHERE id = ?1", params![project_id])?;
        tx.commit()?;

        tracing::info!(project = %project_id, "deleted project");
        Ok(())
    }
}

impl ProjectStore for Database {
    fn project_context(&self, project_id: &str) -> Result<ProjectContext> {
        Ok(self.require_project(project_id)?.to_context())
    }

    fn saved_paper_ids(&self, project_id: &str) -> Result<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT paper_id FROM project_papers WHERE project_id = ?1")?;

        let ids = stmt
            .query_map(params![project_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<HashSet<_>, _>>()?;

        Ok(ids)
    }
}
