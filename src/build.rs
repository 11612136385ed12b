//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site(store, config)
//!     │
//!     ├── prepare_output()      clear (if clean) and create output dir
//!     │
//!     ├── rayon::join
//!     │     ├── write_pages()   render every Page in parallel → index.html files
//!     │     └── copy_assets()   assets/ → output/ verbatim
//!     │
//!     └── build_sitemap()       sitemap.xml (if enabled)
//! ```
//!
//! The store is passed in rather than read from the global, so the watcher
//! can rebuild from a freshly loaded snapshot.

use crate::{
    config::SiteConfig,
    data::ContentStore,
    generator::sitemap::build_sitemap,
    log,
    render::{Page, site_pages},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use walkdir::WalkDir;

/// Files never copied from the assets directory.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Build the whole site from `store` into `config.build.output`.
pub fn build_site(store: &ContentStore, config: &SiteConfig) -> Result<()> {
    let start = Instant::now();
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let pages = site_pages(store);
    let (pages_result, assets_result) = rayon::join(
        || write_pages(&pages, store, config),
        || copy_assets(&config.build.assets, output, config.build.clean),
    );
    pages_result?;
    let copied = assets_result?;

    build_sitemap(config, &pages)?;

    log!(
        "build";
        "{} projects, {} skills -> {} pages, {} assets in {}ms",
        store.projects().len(),
        store.skills().len(),
        pages.len(),
        copied,
        start.elapsed().as_millis()
    );
    Ok(())
}

/// Create the output directory, removing existing content first when `clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn write_pages(pages: &[Page<'_>], store: &ContentStore, config: &SiteConfig) -> Result<()> {
    pages.par_iter().try_for_each(|page| {
        let path = page.output_path(&config.build.output);
        let html = page.render(store, config);
        let html = minify(MinifyType::Html(html.as_bytes()), config);
        write_file(&path, &html)
    })
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Copy every file under `assets` into `output`, keeping relative paths.
///
/// A missing assets directory copies nothing. Returns the number of files
/// copied; up-to-date files are skipped unless `clean`.
fn copy_assets(assets: &Path, output: &Path, clean: bool) -> Result<usize> {
    if !assets.is_dir() {
        return Ok(0);
    }

    let files = collect_all_files(assets);
    let copied = files
        .par_iter()
        .map(|src| -> Result<usize> {
            let rel = src.strip_prefix(assets)?;
            let dest = output.join(rel);
            if !clean && is_up_to_date(src, &dest) {
                return Ok(0);
            }
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(src, &dest)
                .with_context(|| format!("Failed to copy asset {}", src.display()))?;
            Ok(1)
        })
        .collect::<Result<Vec<usize>>>()?
        .into_iter()
        .sum();

    Ok(copied)
}

fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Whether `dst` exists and is at least as new as `src`.
fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let modified = |p: &Path| p.metadata().and_then(|m| m.modified()).ok();
    match (modified(src), modified(dst)) {
        (Some(src_time), Some(dst_time)) => src_time <= dst_time,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ProjectCategory, ProjectStatus, SkillsData, fixtures::project};
    use tempfile::TempDir;

    fn site(dir: &Path) -> (ContentStore, SiteConfig) {
        let store = ContentStore::from_parts(
            vec![
                project("alpha", ProjectStatus::Live, ProjectCategory::Web),
                project("beta", ProjectStatus::Archived, ProjectCategory::Mobile),
            ],
            SkillsData::default(),
        )
        .unwrap();

        let mut config = SiteConfig::default();
        config.base.url = Some("https://alice.dev".into());
        config.build.output = dir.join("public");
        config.build.assets = dir.join("assets");
        config.build.sitemap.path = config.build.output.join("sitemap.xml");
        (store, config)
    }

    #[test]
    fn test_build_site_layout() {
        let dir = TempDir::new().unwrap();
        let (store, config) = site(dir.path());
        fs::create_dir_all(config.build.assets.join("images")).unwrap();
        fs::write(config.build.assets.join("images/a.png"), b"png").unwrap();
        fs::write(config.build.assets.join(".DS_Store"), b"junk").unwrap();

        build_site(&store, &config).unwrap();

        let out = &config.build.output;
        assert!(out.join("index.html").is_file());
        assert!(out.join("projects/index.html").is_file());
        assert!(out.join("projects/alpha/index.html").is_file());
        assert!(out.join("projects/beta/index.html").is_file());
        assert!(out.join("404.html").is_file());
        assert!(out.join("sitemap.xml").is_file());
        assert_eq!(fs::read(out.join("images/a.png")).unwrap(), b"png");
        assert!(!out.join(".DS_Store").exists());
    }

    #[test]
    fn test_build_site_without_assets_dir() {
        let dir = TempDir::new().unwrap();
        let (store, config) = site(dir.path());

        build_site(&store, &config).unwrap();
        assert!(config.build.output.join("index.html").is_file());
    }

    #[test]
    fn test_clean_removes_stale_files() {
        let dir = TempDir::new().unwrap();
        let (store, mut config) = site(dir.path());
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("stale.html"), "old").unwrap();

        build_site(&store, &config).unwrap();
        assert!(config.build.output.join("stale.html").exists());

        config.build.clean = true;
        build_site(&store, &config).unwrap();
        assert!(!config.build.output.join("stale.html").exists());
    }

    #[test]
    fn test_copy_assets_skips_up_to_date() {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("assets");
        let output = dir.path().join("out");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("site.css"), "body{}").unwrap();

        assert_eq!(copy_assets(&assets, &output, false).unwrap(), 1);
        assert_eq!(copy_assets(&assets, &output, false).unwrap(), 0);
        assert_eq!(copy_assets(&assets, &output, true).unwrap(), 1);
    }

    #[test]
    fn test_is_up_to_date_missing_dest() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "a").unwrap();

        assert!(!is_up_to_date(&src, &dir.path().join("missing.txt")));
    }
}
