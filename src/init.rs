//! Site initialization module.
//!
//! Creates a new portfolio with default configuration and sample data.

use crate::{
    config::SiteConfig,
    data::{PROJECTS_FILE, SKILLS_FILE},
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
pub const CONFIG_FILE: &str = "folio.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["data", "assets/images", "assets/styles"];

const SAMPLE_PROJECTS: &str = r#"[
  {
    "id": "portfolio-site",
    "title": "Portfolio Site",
    "tagline": "This very website",
    "description": "A static portfolio generated from two JSON files.",
    "thumbnail": "/images/portfolio-site.png",
    "techStack": ["Rust", "HTML", "CSS"],
    "features": ["Featured projects", "Skill bars", "Contact form"],
    "highlights": ["Builds in milliseconds"],
    "status": "live",
    "startDate": "2024-01",
    "category": "web"
  },
  {
    "id": "habit-tracker",
    "title": "Habit Tracker",
    "tagline": "Small steps, every day",
    "description": "A mobile app for tracking daily habits.",
    "thumbnail": "/images/habit-tracker.png",
    "techStack": ["Flutter"],
    "status": "in-development",
    "startDate": "2024-06",
    "category": "mobile"
  }
]
"#;

const SAMPLE_SKILLS: &str = r#"{
  "frontend": [
    { "name": "React", "level": 85, "icon": "react" },
    { "name": "CSS", "level": 80, "icon": "css" }
  ],
  "backend": [
    { "name": "Node.js", "level": 75, "icon": "nodejs" }
  ],
  "mobile": [
    { "name": "Flutter", "level": 60, "icon": "flutter" }
  ],
  "tools": [
    { "name": "Git", "level": 90, "icon": "git" },
    { "name": "Docker", "level": 65, "icon": "docker" }
  ],
  "languages": [
    { "name": "Rust", "level": 80, "icon": "rust" },
    { "name": "TypeScript", "level": 85, "icon": "typescript" }
  ]
}
"#;

const SAMPLE_STYLESHEET: &str = "/* Site styles. Copied to /styles/site.css on build. */\n";

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name the site is created in place, which must be empty.
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_data(root)?;
    init_ignored_files(root, &config.build.output)?;

    log!("init"; "created {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

fn init_sample_data(root: &Path) -> Result<()> {
    let files = [
        (root.join("data").join(PROJECTS_FILE), SAMPLE_PROJECTS),
        (root.join("data").join(SKILLS_FILE), SAMPLE_SKILLS),
        (root.join("assets/styles/site.css"), SAMPLE_STYLESHEET),
    ];
    for (path, content) in files {
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Write a .gitignore listing the output directory
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let path = root.join(".gitignore");
    if path.exists() {
        return Ok(());
    }
    let output = output.strip_prefix(root).unwrap_or(output);
    fs::write(&path, format!("/{}/\n", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ContentStore;
    use tempfile::TempDir;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.build.output = root.join("public");
        config
    }

    #[test]
    fn test_new_site_scaffold() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("mysite");

        new_site(&config_at(&root), true).unwrap();

        assert!(root.join(CONFIG_FILE).is_file());
        assert!(root.join("assets/images").is_dir());
        assert!(root.join("assets/styles/site.css").is_file());
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "/public/\n"
        );
    }

    #[test]
    fn test_sample_data_loads() {
        let dir = TempDir::new().unwrap();
        new_site(&config_at(dir.path()), false).unwrap();

        let store = ContentStore::load(&dir.path().join("data")).unwrap();
        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.featured_projects(3).len(), 1);
        assert_eq!(store.skills().len(), 8);
    }

    #[test]
    fn test_default_config_parses() {
        let dir = TempDir::new().unwrap();
        new_site(&config_at(dir.path()), false).unwrap();

        let config = SiteConfig::from_path(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.serve.port, SiteConfig::default().serve.port);
    }

    #[test]
    fn test_init_in_place_requires_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let err = new_site(&config_at(dir.path()), false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_init_refuses_existing_structure() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site");
        fs::create_dir_all(root.join("data")).unwrap();

        assert!(new_site(&config_at(&root), true).is_err());
    }
}
