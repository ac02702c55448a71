use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::store::Store;
use crate::types::Project;

use super::open_store;
use super::validation::validate_project_name;

#[derive(Serialize)]
struct ProjectOutput {
    id: String,
    name: String,
    directory: String,
    command: String,
    tokens: i64,
    created_at: String,
}

pub fn run_project_create(
    database: PathBuf,
    name: String,
    directory: PathBuf,
    command: String,
) -> anyhow::Result<()> {
    validate_project_name(&name).map_err(anyhow::Error::msg)?;

    let store = open_store(&database)?;

    if !directory.exists() {
        anyhow::bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }
    let directory = directory.canonicalize()?;

    let project = Project {
        id: Uuid::new_v4().to_string(),
        name,
        directory: directory.to_string_lossy().into_owned(),
        command,
        created_at: Utc::now(),
    };
    store.create_project(&project)?;

    println!(
        "Created project '{}' in {}",
        project.name, project.directory
    );

    Ok(())
}

pub fn run_project_list(database: PathBuf, json: bool) -> anyhow::Result<()> {
    let store = open_store(&database)?;

    let projects = store
        .list_projects()?
        .into_iter()
        .map(|p| {
            let tokens = store.count_project_tokens(&p.id)?;
            Ok(ProjectOutput {
                id: p.id,
                name: p.name,
                directory: p.directory,
                command: p.command,
                tokens,
                created_at: p.created_at.to_rfc3339(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!();
    for project in &projects {
        println!(
            "  {}  {}  `{}`  {} token(s)",
            project.name, project.directory, project.command, project.tokens
        );
    }
    println!();

    Ok(())
}
