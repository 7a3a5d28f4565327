//! Project management commands

use crate::app::{OutputFormat, ProjectAction, ProjectArgs};
use crate::output::{format_project, format_projects, format_saved_papers};
use crate::services::Services;
use anyhow::Result;
use paperrank_core::{Config, Database, NewProject};

pub async fn run(
    args: ProjectArgs,
    db: &Database,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    match args.action {
        ProjectAction::Create {
            name,
            context,
            questions,
            keywords,
        } => {
            let project = db.create_project(NewProject {
                name,
                context,
                research_questions: questions,
                keywords,
            })?;
            match format {
                OutputFormat::Cli => println!("Created project '{}' ({})", project.name, project.id),
                _ => print!("{}", format_project(&project, format)),
            }
        }
        ProjectAction::List => {
            let projects = db.list_projects()?;
            print!("{}", format_projects(&projects, format));
        }
        ProjectAction::Show { project_id } => {
            let project = db.require_project(&project_id)?;
            print!("{}", format_project(&project, format));
        }
        ProjectAction::Delete { project_id } => {
            db.delete_project(&project_id)?;
            println!("Deleted project {}", project_id);
        }
        ProjectAction::Papers { project_id } => {
            let saved = db.saved_papers(&project_id)?;
            print!("{}", format_saved_papers(&saved, format));
        }
        ProjectAction::Save {
            project_id,
            paper_id,
            notes,
        } => {
            // Checked here so an unknown project never reaches the index
            db.require_project(&project_id)?;
            let services = Services::from_config(config)?;
            let saved = db
                .save_paper(services.index(), &project_id, &paper_id, notes.as_deref())
                .await?;
            println!("Saved {} to project {}", saved.paper.id, project_id);
        }
        ProjectAction::Remove {
            project_id,
            paper_id,
        } => {
            db.remove_saved_paper(&project_id, &paper_id)?;
            println!("Removed {} from project {}", paper_id, project_id);
        }
    }
    Ok(())
}
