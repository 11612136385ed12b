//! Process-wide content store.
//!
//! Both datasets are read and validated once at startup, then installed into
//! a `OnceLock`. There is no write path afterwards, so rendering workers and
//! the HTTP thread share `&'static ContentStore` without locking.

use super::{
    error::DataError,
    types::{Project, SkillsData},
};
use crate::utils::date::PartialDate;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use std::{fs, path::Path, sync::OnceLock};

/// Project collection file inside the data directory.
pub const PROJECTS_FILE: &str = "projects.json";
/// Skills file inside the data directory.
pub const SKILLS_FILE: &str = "skills.json";

static CONTENT: OnceLock<ContentStore> = OnceLock::new();

/// Immutable, validated snapshot of the portfolio datasets.
#[derive(Debug, Default)]
pub struct ContentStore {
    projects: Vec<Project>,
    skills: SkillsData,
    /// Project id → position in `projects`.
    index: FxHashMap<String, usize>,
}

impl ContentStore {
    /// Load `projects.json` and `skills.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, DataError> {
        let (projects, skills) = rayon::join(
            || read_json::<Vec<Project>>(&dir.join(PROJECTS_FILE)),
            || read_json::<SkillsData>(&dir.join(SKILLS_FILE)),
        );
        Self::from_parts(projects?, skills?)
    }

    /// Build a store from in-memory datasets, applying load-time validation.
    pub fn from_parts(projects: Vec<Project>, skills: SkillsData) -> Result<Self, DataError> {
        let mut index = FxHashMap::default();
        for (pos, project) in projects.iter().enumerate() {
            validate_project(project)?;
            if index.insert(project.id.clone(), pos).is_some() {
                return Err(DataError::DuplicateId(project.id.clone()));
            }
        }
        validate_skills(&skills)?;

        Ok(Self {
            projects,
            skills,
            index,
        })
    }

    /// All projects in dataset declaration order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn skills(&self) -> &SkillsData {
        &self.skills
    }

    pub(super) fn position_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// Install the process-wide store. Fails if called more than once.
pub fn init_content(store: ContentStore) -> Result<&'static ContentStore, DataError> {
    CONTENT
        .set(store)
        .map_err(|_| DataError::AlreadyInitialized)?;
    content().ok_or(DataError::AlreadyInitialized)
}

/// The process-wide store, if [`init_content`] has run.
pub fn content() -> Option<&'static ContentStore> {
    CONTENT.get()
}

// ============================================================================
// Loading & Validation
// ============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Ids become URL path segments, so keep them to a conservative slug alphabet.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

fn validate_project(project: &Project) -> Result<(), DataError> {
    if !is_valid_id(&project.id) {
        return Err(DataError::InvalidId(project.id.clone()));
    }

    let parse = |field: &'static str, value: &str| {
        PartialDate::parse(value).ok_or_else(|| DataError::InvalidDate {
            id: project.id.clone(),
            field,
            value: value.to_owned(),
        })
    };

    let start = parse("startDate", &project.start_date)?;
    if let Some(end) = project.end_date.as_deref() {
        let end = parse("endDate", end)?;
        if end < start {
            return Err(DataError::DateOrder {
                id: project.id.clone(),
            });
        }
    }

    Ok(())
}

fn validate_skills(skills: &SkillsData) -> Result<(), DataError> {
    for (category, list) in skills.iter() {
        if let Some(skill) = list.iter().find(|s| s.level > 100) {
            return Err(DataError::LevelOutOfRange {
                category: category.as_str(),
                name: skill.name.clone(),
                level: skill.level,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::types::{ProjectCategory, ProjectStatus, Skill};
    use tempfile::TempDir;

    pub fn project(id: &str, status: ProjectStatus, category: ProjectCategory) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Title {id}"),
            tagline: "tagline".to_string(),
            description: "description".to_string(),
            thumbnail: format!("/images/{id}.png"),
            screenshots: vec![],
            demo_url: None,
            github_url: None,
            tech_stack: vec!["Rust".to_string()],
            features: vec![],
            highlights: vec![],
            status,
            start_date: "2024-01".to_string(),
            end_date: None,
            category,
        }
    }

    pub fn skill(name: &str, level: u8) -> Skill {
        Skill {
            name: name.to_string(),
            level,
            icon: name.to_ascii_lowercase(),
        }
    }

    const PROJECTS_JSON: &str = r#"[
        {
            "id": "proj-a",
            "title": "Project A",
            "tagline": "First",
            "description": "A live web project",
            "thumbnail": "/images/a.png",
            "techStack": ["Rust"],
            "status": "live",
            "startDate": "2024-01",
            "category": "web"
        },
        {
            "id": "proj-b",
            "title": "Project B",
            "tagline": "Second",
            "description": "An archived one",
            "thumbnail": "/images/b.png",
            "status": "archived",
            "startDate": "2022-03",
            "endDate": "2023-01-15",
            "category": "mobile"
        }
    ]"#;

    const SKILLS_JSON: &str = r#"{
        "frontend": [{ "name": "React", "level": 90, "icon": "react" }],
        "backend": [],
        "mobile": [],
        "tools": [{ "name": "Git", "level": 85, "icon": "git" }],
        "languages": [{ "name": "Rust", "level": 80, "icon": "rust" }]
    }"#;

    fn write_data(projects: &str, skills: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECTS_FILE), projects).unwrap();
        fs::write(dir.path().join(SKILLS_FILE), skills).unwrap();
        dir
    }

    #[test]
    fn test_load_from_dir() {
        let dir = write_data(PROJECTS_JSON, SKILLS_JSON);
        let store = ContentStore::load(dir.path()).unwrap();

        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.projects()[0].id, "proj-a");
        assert_eq!(store.projects()[1].end_date.as_deref(), Some("2023-01-15"));
        assert_eq!(store.skills().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SKILLS_FILE), SKILLS_JSON).unwrap();

        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Io { ref path, .. } if path.ends_with(PROJECTS_FILE)));
        assert!(err.is_startup());
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = write_data("[{ not json", SKILLS_JSON);
        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn test_load_schema_mismatch() {
        let bad_status = PROJECTS_JSON.replace(r#""archived""#, r#""retired""#);
        let dir = write_data(&bad_status, SKILLS_JSON);
        assert!(matches!(
            ContentStore::load(dir.path()).unwrap_err(),
            DataError::Json { .. }
        ));
    }

    #[test]
    fn test_load_skills_missing_key() {
        let skills = r#"{ "frontend": [], "backend": [], "mobile": [], "tools": [] }"#;
        let dir = write_data(PROJECTS_JSON, skills);
        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Json { ref path, .. } if path.ends_with(SKILLS_FILE)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let projects = vec![
            project("same", ProjectStatus::Live, ProjectCategory::Web),
            project("same", ProjectStatus::Archived, ProjectCategory::Other),
        ];
        let err = ContentStore::from_parts(projects, SkillsData::default()).unwrap_err();
        assert!(matches!(err, DataError::DuplicateId(id) if id == "same"));
    }

    #[test]
    fn test_invalid_ids_rejected() {
        for id in ["", "Has Caps", "a/b", "spaced id", "ünï"] {
            let projects = vec![project(id, ProjectStatus::Live, ProjectCategory::Web)];
            let err = ContentStore::from_parts(projects, SkillsData::default()).unwrap_err();
            assert!(matches!(err, DataError::InvalidId(_)), "accepted `{id}`");
        }
    }

    #[test]
    fn test_level_out_of_range_rejected() {
        let skills = SkillsData {
            backend: vec![skill("Go", 70), skill("Node", 101)],
            ..SkillsData::default()
        };
        let err = ContentStore::from_parts(vec![], skills).unwrap_err();
        assert!(matches!(
            err,
            DataError::LevelOutOfRange { category: "backend", level: 101, .. }
        ));
    }

    #[test]
    fn test_level_bounds_accepted() {
        let skills = SkillsData {
            tools: vec![skill("Zero", 0), skill("Full", 100)],
            ..SkillsData::default()
        };
        assert!(ContentStore::from_parts(vec![], skills).is_ok());
    }

    #[test]
    fn test_invalid_date_rejected() {
        let mut p = project("p", ProjectStatus::Live, ProjectCategory::Web);
        p.start_date = "January 2024".to_string();
        let err = ContentStore::from_parts(vec![p], SkillsData::default()).unwrap_err();
        assert!(matches!(err, DataError::InvalidDate { field: "startDate", .. }));

        let mut p = project("p", ProjectStatus::Live, ProjectCategory::Web);
        p.end_date = Some("2024-02-30".to_string());
        let err = ContentStore::from_parts(vec![p], SkillsData::default()).unwrap_err();
        assert!(matches!(err, DataError::InvalidDate { field: "endDate", .. }));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut p = project("p", ProjectStatus::Archived, ProjectCategory::Web);
        p.start_date = "2024-05".to_string();
        p.end_date = Some("2023-12".to_string());
        let err = ContentStore::from_parts(vec![p], SkillsData::default()).unwrap_err();
        assert!(matches!(err, DataError::DateOrder { id } if id == "p"));
    }

    #[test]
    fn test_end_equal_to_start_accepted() {
        let mut p = project("p", ProjectStatus::Live, ProjectCategory::Web);
        p.end_date = Some(p.start_date.clone());
        assert!(ContentStore::from_parts(vec![p], SkillsData::default()).is_ok());
    }

    #[test]
    fn test_empty_store() {
        let store = ContentStore::from_parts(vec![], SkillsData::default()).unwrap();
        assert!(store.projects().is_empty());
        assert_eq!(store.skills().len(), 0);
    }

    #[test]
    fn test_init_content_once() {
        let store = ContentStore::from_parts(
            vec![project("only", ProjectStatus::Live, ProjectCategory::Web)],
            SkillsData::default(),
        )
        .unwrap();

        // The singleton is process-wide; other tests never touch it.
        let installed = init_content(store).unwrap();
        assert_eq!(installed.projects()[0].id, "only");
        assert!(std::ptr::eq(installed, content().unwrap()));

        let again = init_content(ContentStore::default()).unwrap_err();
        assert!(matches!(again, DataError::AlreadyInitialized));
    }
}
