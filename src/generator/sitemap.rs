//! Sitemap generation.
//!
//! Lists every indexable page of the site for search engines.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/projects/foo/</loc>
//!     <lastmod>2024-06-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    render::Page,
    utils::{
        escape::escape_xml,
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result};
use std::fs;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, pages: &[Page<'_>]) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }
    if config.base.url.is_none() {
        log!("warn"; "[base.url] not set, sitemap locations are root-relative");
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Sitemap::from_pages(config, pages, &today).write(config)
}

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// YYYY-MM-DD
    lastmod: String,
}

impl Sitemap {
    /// Collect indexable pages. Pages without a content date use `today`.
    fn from_pages(config: &SiteConfig, pages: &[Page<'_>], today: &str) -> Self {
        let urls = pages
            .iter()
            .filter(|page| page.is_indexable())
            .map(|page| UrlEntry {
                loc: config.url_for(&page.url_path()),
                lastmod: page.lastmod().unwrap_or_else(|| today.to_owned()),
            })
            .collect();

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 128);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = &config.build.sitemap.path;
        let count = self.urls.len();
        let xml = self.into_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{} urls", count);
        Ok(())
    }
}
