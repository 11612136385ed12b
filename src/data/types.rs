//! Content types loaded from `projects.json` and `skills.json`.
//!
//! Field names follow the camelCase layout of the data files.

use super::error::DataError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ============================================================================
// Closed Sets
// ============================================================================

/// Publication status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Live,
    InDevelopment,
    Archived,
}

/// Gallery category of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    Web,
    Mobile,
    FullStack,
    Other,
}

/// Fixed grouping key of the skills dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Mobile,
    Tools,
    Languages,
}

impl ProjectStatus {
    pub const ALL: [Self; 3] = [Self::Live, Self::InDevelopment, Self::Archived];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::InDevelopment => "in-development",
            Self::Archived => "archived",
        }
    }

    /// Human readable label for badges.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::InDevelopment => "In Development",
            Self::Archived => "Archived",
        }
    }
}

impl ProjectCategory {
    pub const ALL: [Self; 4] = [Self::Web, Self::Mobile, Self::FullStack, Self::Other];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::FullStack => "full-stack",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Mobile => "Mobile",
            Self::FullStack => "Full Stack",
            Self::Other => "Other",
        }
    }
}

impl SkillCategory {
    /// Declaration order of the skills dataset, which is also display order.
    pub const ALL: [Self; 5] = [
        Self::Frontend,
        Self::Backend,
        Self::Mobile,
        Self::Tools,
        Self::Languages,
    ];

    /// Every skill category key, independent of dataset content.
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Mobile => "mobile",
            Self::Tools => "tools",
            Self::Languages => "languages",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Mobile => "Mobile",
            Self::Tools => "Tools",
            Self::Languages => "Languages",
        }
    }
}

/// Implements `Display` and `FromStr` over `ALL` / `as_str` for a closed set.
macro_rules! closed_set_str {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = DataError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| DataError::InvalidArgument {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

closed_set_str!(ProjectStatus, "project status");
closed_set_str!(ProjectCategory, "project category");
closed_set_str!(SkillCategory, "skill category");

// ============================================================================
// Records
// ============================================================================

/// One portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Project {
    /// URL-safe slug, unique across the collection.
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub thumbnail: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub status: ProjectStatus,
    pub start_date: String,
    /// Absent (or equal to `start_date`) for ongoing work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub category: ProjectCategory,
}

impl Project {
    /// Whether the project is shown in the featured section.
    pub fn is_featured(&self) -> bool {
        self.status == ProjectStatus::Live
    }

    /// Whether work on the project is still ongoing.
    pub fn is_ongoing(&self) -> bool {
        self.end_date
            .as_deref()
            .is_none_or(|end| end == self.start_date)
    }

    /// Site-relative URL of the project detail page.
    pub fn url_path(&self) -> String {
        format!("/projects/{}/", self.id)
    }
}

/// One technology proficiency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    /// Proficiency percentage, validated to `0..=100` at load.
    pub level: u8,
    /// Display glyph key. Unknown keys display as themselves.
    pub icon: String,
}

/// Skills grouped by the five fixed category keys.
///
/// Every key must be present in `skills.json`; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillsData {
    pub frontend: Vec<Skill>,
    pub backend: Vec<Skill>,
    pub mobile: Vec<Skill>,
    pub tools: Vec<Skill>,
    pub languages: Vec<Skill>,
}

impl SkillsData {
    pub fn get(&self, category: SkillCategory) -> &[Skill] {
        match category {
            SkillCategory::Frontend => &self.frontend,
            SkillCategory::Backend => &self.backend,
            SkillCategory::Mobile => &self.mobile,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Languages => &self.languages,
        }
    }

    /// Iterate `(category, skills)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &[Skill])> {
        SkillCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, skills)| skills.len()).sum()
    }
}
