//! `folio query`: print portfolio queries as pretty JSON.

use crate::{cli::QueryCommand, data::ContentStore};
use anyhow::{Result, bail};
use serde_json::{Value, to_value};

/// Run `query` against `store` and print the result to stdout.
///
/// `featured_limit` applies when `query featured` is given no `--limit`.
pub fn run_query(store: &ContentStore, query: &QueryCommand, featured_limit: usize) -> Result<()> {
    let value = query_value(store, query, featured_limit)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn query_value(store: &ContentStore, query: &QueryCommand, featured_limit: usize) -> Result<Value> {
    let value = match query {
        QueryCommand::Project { id } => match store.project_by_id(id) {
            Some(project) => to_value(project)?,
            None => bail!("project `{id}` not found"),
        },
        QueryCommand::Projects { category: None } => to_value(store.projects())?,
        QueryCommand::Projects {
            category: Some(category),
        } => to_value(store.projects_by_category(category.parse()?))?,
        QueryCommand::Featured { limit } => {
            to_value(store.featured_projects(limit.unwrap_or(featured_limit)))?
        }
        QueryCommand::Categories => to_value(store.skill_categories())?,
        QueryCommand::Skills { category: None } => to_value(store.skills())?,
        QueryCommand::Skills {
            category: Some(category),
        } => to_value(store.skills_by_category(category.parse()?))?,
    };
    Ok(value)
}
