//! Read-only queries over a [`ContentStore`].
//!
//! Every query borrows from the store and preserves dataset declaration
//! order. "Not found" is `None` and "nothing matched" is an empty result;
//! neither is an error.

use super::{
    store::ContentStore,
    types::{Project, ProjectCategory, Skill, SkillCategory},
};

/// Number of featured projects shown when no limit is configured.
pub const DEFAULT_FEATURED_LIMIT: usize = 3;

impl ContentStore {
    /// Look up a project by its id.
    pub fn project_by_id(&self, id: &str) -> Option<&Project> {
        self.position_of(id).map(|pos| &self.projects()[pos])
    }

    /// Projects in `category`, in dataset order.
    pub fn projects_by_category(&self, category: ProjectCategory) -> Vec<&Project> {
        self.projects()
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// The first `limit` live projects, in dataset order.
    ///
    /// Selection is positional only; nothing is ranked or shuffled.
    pub fn featured_projects(&self, limit: usize) -> Vec<&Project> {
        self.projects()
            .iter()
            .filter(|p| p.is_featured())
            .take(limit)
            .collect()
    }

    /// Every skill category key, regardless of dataset content.
    pub fn skill_categories(&self) -> &'static [SkillCategory] {
        SkillCategory::all()
    }

    /// Skills declared under `category`. Empty when the category has no entries.
    pub fn skills_by_category(&self, category: SkillCategory) -> &[Skill] {
        self.skills().get(category)
    }
}
