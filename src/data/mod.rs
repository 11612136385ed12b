//! Portfolio content: the two static datasets and the queries over them.
//!
//! # Architecture
//!
//! ```text
//! data/projects.json ─┐
//!                     ├─► ContentStore::load() ─► init_content() ─► &'static ContentStore
//! data/skills.json ───┘         (validate)          (OnceLock)              │
//!                                                                           ▼
//!                                          project_by_id / projects_by_category /
//!                                          featured_projects / skills_by_category
//! ```
//!
//! The store is loaded exactly once per process. A missing or malformed file
//! aborts startup; nothing is built or served from partial data.

mod error;
mod query;
mod store;
mod types;

pub use error::DataError;
pub use query::DEFAULT_FEATURED_LIMIT;
pub use store::{ContentStore, PROJECTS_FILE, SKILLS_FILE, content, init_content};
pub use types::{Project, ProjectCategory, ProjectStatus, Skill, SkillCategory, SkillsData};

#[cfg(test)]
pub(crate) use store::tests as fixtures;
