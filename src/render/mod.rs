//! HTML rendering for the generated site.
//!
//! ```text
//! ContentStore + SiteConfig ─► site_pages() ─► [Page] ─► Page::render() ─► HTML
//! ```
//!
//! Every page is a pure function of the store and the config, so pages can
//! be rendered in any order and in parallel.

mod components;
mod layout;
mod pages;

use crate::{
    config::SiteConfig,
    data::{ContentStore, Project},
    utils::date::PartialDate,
};
use std::path::{Path, PathBuf};

const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");
const CONTACT_SCRIPT: &str = include_str!("../embed/contact.js");

/// One output page of the site.
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    Home,
    Projects,
    Project(&'a Project),
    NotFound,
}

impl Page<'_> {
    /// Site-relative URL, e.g. `/projects/foo/`.
    pub fn url_path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Projects => "/projects/".to_owned(),
            Self::Project(project) => project.url_path(),
            Self::NotFound => "/404.html".to_owned(),
        }
    }

    /// File this page is written to under `output`.
    pub fn output_path(&self, output: &Path) -> PathBuf {
        match self {
            Self::NotFound => output.join("404.html"),
            _ => output
                .join(self.url_path().trim_start_matches('/'))
                .join("index.html"),
        }
    }

    /// Whether the page belongs in the sitemap.
    pub const fn is_indexable(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// Last modification date as `YYYY-MM-DD`, when the content carries one.
    ///
    /// Projects use their end date, falling back to the start date.
    pub fn lastmod(&self) -> Option<String> {
        let Self::Project(project) = self else {
            return None;
        };
        let date = project.end_date.as_deref().unwrap_or(&project.start_date);
        PartialDate::parse(date).map(PartialDate::to_ymd)
    }

    pub fn render(&self, store: &ContentStore, config: &SiteConfig) -> String {
        match self {
            Self::Home => pages::home(store, config),
            Self::Projects => pages::projects_index(store, config),
            Self::Project(project) => pages::project_detail(project, config),
            Self::NotFound => pages::not_found(config),
        }
    }
}

/// Every page of the site: home, project listing, one per project, not-found.
pub fn site_pages(store: &ContentStore) -> Vec<Page<'_>> {
    let mut pages = Vec::with_capacity(store.projects().len() + 3);
    pages.push(Page::Home);
    pages.push(Page::Projects);
    pages.extend(store.projects().iter().map(Page::Project));
    pages.push(Page::NotFound);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        ProjectCategory, ProjectStatus, SkillsData,
        fixtures::project,
    };

    fn store() -> ContentStore {
        let mut a = project("alpha", ProjectStatus::Live, ProjectCategory::Web);
        a.end_date = Some("2024-06-15".into());
        let b = project("beta", ProjectStatus::Archived, ProjectCategory::Other);
        ContentStore::from_parts(vec![a, b], SkillsData::default()).unwrap()
    }

    #[test]
    fn test_site_pages_order() {
        let store = store();
        let urls: Vec<_> = site_pages(&store).iter().map(Page::url_path).collect();

        assert_eq!(
            urls,
            ["/", "/projects/", "/projects/alpha/", "/projects/beta/", "/404.html"]
        );
    }

    #[test]
    fn test_output_paths() {
        let store = store();
        let out = Path::new("/site");
        let pages = site_pages(&store);

        assert_eq!(pages[0].output_path(out), Path::new("/site/index.html"));
        assert_eq!(pages[1].output_path(out), Path::new("/site/projects/index.html"));
        assert_eq!(
            pages[2].output_path(out),
            Path::new("/site/projects/alpha/index.html")
        );
        assert_eq!(pages[4].output_path(out), Path::new("/site/404.html"));
    }

    #[test]
    fn test_lastmod() {
        let store = store();
        let pages = site_pages(&store);

        assert_eq!(pages[0].lastmod(), None);
        assert_eq!(pages[2].lastmod().as_deref(), Some("2024-06-15"));
        // start date "2024-01" without an end date
        assert_eq!(pages[3].lastmod().as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_not_found_not_indexable() {
        let store = store();
        let indexable = site_pages(&store)
            .iter()
            .filter(|p| p.is_indexable())
            .count();
        assert_eq!(indexable, 4);
    }

    #[test]
    fn test_render_dispatch() {
        let store = store();
        let config = SiteConfig::default();
        let pages = site_pages(&store);

        assert!(pages[2].render(&store, &config).contains("<h1>Title alpha</h1>"));
        assert!(pages[4].render(&store, &config).contains("<h1>404</h1>"));
    }
}
