//! Page chrome shared by every generated page.

use super::LAYOUT_TEMPLATE;
use crate::{config::SiteConfig, utils::escape::escape_html as esc};

/// Primary navigation entries: (label, path).
const NAV: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Projects", "/projects/"),
    ("Contact", "/#contact"),
];

/// Per-page values substituted into the layout.
pub struct PageMeta<'a> {
    /// Page title; `None` uses the site title alone.
    pub title: Option<&'a str>,
    pub description: &'a str,
    /// Site path of the page, e.g. `/projects/`.
    pub path: &'a str,
}

/// Wrap page `content` in the site layout.
pub fn layout(config: &SiteConfig, meta: &PageMeta<'_>, content: &str) -> String {
    let site_title = site_title(config);
    let title = match meta.title {
        Some(title) => format!("{} | {}", esc(title), esc(site_title)),
        None => esc(site_title).into_owned(),
    };
    let description = if meta.description.is_empty() {
        config.base.description.as_str()
    } else {
        meta.description
    };

    let lang = esc(&config.base.language);
    let description = esc(description);
    let author = esc(config.owner_name());
    let canonical_url = config.url_for(meta.path);
    let canonical = esc(&canonical_url);
    let brand = esc(site_title);
    let nav = nav(meta.path);
    let copyright_text = copyright(config);
    let copyright = esc(&copyright_text);

    fill(LAYOUT_TEMPLATE, |slot| {
        Some(match slot {
            "lang" => &*lang,
            "title" => title.as_str(),
            "description" => &*description,
            "author" => &*author,
            "canonical" => &*canonical,
            "site_title" => &*brand,
            "nav" => nav.as_str(),
            "copyright" => &*copyright,
            "content" => content,
            _ => return None,
        })
    })
}

/// Fill `{slot}` markers in `template` in a single pass.
///
/// Substituted text is never rescanned, so values may contain braces.
/// Unknown slots are kept as written.
fn fill<'a>(template: &str, value: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len() * 4);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after
            .find('}')
            .and_then(|close| value(&after[..close]).map(|v| (close, v)));
        match filled {
            Some((close, v)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn site_title(config: &SiteConfig) -> &str {
    if config.base.title.is_empty() {
        config.owner_name()
    } else {
        &config.base.title
    }
}

fn copyright(config: &SiteConfig) -> String {
    if config.base.copyright.is_empty() {
        format!("© {}", config.owner_name())
    } else {
        config.base.copyright.clone()
    }
}

fn nav(current: &str) -> String {
    NAV.iter()
        .map(|(label, href)| {
            let active = if *href == current {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(r#"<a href="{href}"{active}>{label}</a>"#)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta<'a>(title: Option<&'a str>, path: &'a str) -> PageMeta<'a> {
        PageMeta {
            title,
            description: "",
            path,
        }
    }

    #[test]
    fn test_layout_fills_placeholders() {
        let mut config = SiteConfig::default();
        config.base.title = "Alice & Co".into();
        config.base.description = "Portfolio".into();
        config.base.url = Some("https://alice.dev/".into());

        let html = layout(&config, &meta(Some("Projects"), "/projects/"), "<p>body</p>");

        assert!(html.contains("<title>Projects | Alice &amp; Co</title>"));
        assert!(html.contains(r#"href="https://alice.dev/projects/""#));
        assert!(html.contains(r#"content="Portfolio""#));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"<a href="/projects/" aria-current="page">Projects</a>"#));
        assert!(!html.contains("{content}"));
    }

    #[test]
    fn test_layout_without_title_or_url() {
        let mut config = SiteConfig::default();
        config.base.title = "Folio".into();

        let html = layout(&config, &meta(None, "/"), "");

        assert!(html.contains("<title>Folio</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="/">"#));
    }

    #[test]
    fn test_layout_values_are_not_rescanned() {
        let mut config = SiteConfig::default();
        config.base.title = "Folio".into();
        let meta = PageMeta {
            title: Some("Docs for {copyright}"),
            description: "Templating with {content} and {nav}",
            path: "/projects/docs/",
        };

        let html = layout(&config, &meta, r#"<article class="project">body</article>"#);
        let (head, body) = html.split_once("</head>").unwrap();

        assert!(!head.contains("<article"));
        assert!(!head.contains("<a href"));
        assert!(head.contains("<title>Docs for {copyright} | Folio</title>"));
        assert!(head.contains(r#"content="Templating with {content} and {nav}""#));
        assert_eq!(body.matches("<article").count(), 1);
        assert_eq!(body.matches("<nav>").count(), 1);
    }

    #[test]
    fn test_fill_keeps_unknown_slots() {
        let filled = fill("a {x} {y} {z", |slot| (slot == "x").then_some("{y}"));
        assert_eq!(filled, "a {y} {y} {z");
    }

    #[test]
    fn test_copyright_fallback() {
        let mut config = SiteConfig::default();
        config.profile.name = "Bob".into();
        assert_eq!(copyright(&config), "© Bob");

        config.base.copyright = "2024 Bob".into();
        assert_eq!(copyright(&config), "2024 Bob");
    }
}
