//! Page bodies: home, project listing, project detail and not-found.

use super::{
    components::{
        contact_form, date_range, project_grid, skill_group, status_badge, tech_badges,
    },
    layout::{PageMeta, layout},
};
use crate::{
    config::{ProfileLink, SiteConfig},
    data::{ContentStore, Project, ProjectCategory},
    utils::escape::escape_html as esc,
};

pub fn home(store: &ContentStore, config: &SiteConfig) -> String {
    let mut body = String::with_capacity(16 * 1024);
    body.push_str(&hero(config));

    body.push_str(r#"<section id="featured"><h2>Featured Projects</h2>"#);
    let featured = store.featured_projects(config.build.featured);
    if featured.is_empty() {
        body.push_str(r#"<p class="empty">No live projects yet.</p>"#);
    } else {
        body.push_str(&project_grid(&featured));
    }
    body.push_str(r#"<p><a class="more" href="/projects/">All projects →</a></p></section>"#);

    body.push_str(r#"<section id="skills"><h2>Skills</h2>"#);
    for &category in store.skill_categories() {
        body.push_str(&skill_group(category, store.skills_by_category(category)));
    }
    body.push_str("</section>");

    body.push_str(r#"<section id="contact"><h2>Get in Touch</h2>"#);
    body.push_str(&contact_form(config));
    body.push_str("</section>");

    let meta = PageMeta {
        title: None,
        description: &config.profile.bio,
        path: "/",
    };
    layout(config, &meta, &body)
}

fn hero(config: &SiteConfig) -> String {
    let profile = &config.profile;
    let avatar = profile
        .avatar
        .as_deref()
        .map(|src| {
            format!(
                r#"<img class="avatar" src="{}" alt="{}">"#,
                esc(src),
                esc(config.owner_name())
            )
        })
        .unwrap_or_default();
    let location = if profile.location.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="location">{}</p>"#, esc(&profile.location))
    };

    format!(
        r#"<section class="hero">
  {avatar}
  <h1>{name}</h1>
  <p class="role">{role}</p>
  <p class="bio">{bio}</p>
  {location}
  {links}
</section>"#,
        name = esc(config.owner_name()),
        role = esc(&profile.role),
        bio = esc(&profile.bio),
        links = profile_links(&profile.links),
    )
}

fn profile_links(links: &[ProfileLink]) -> String {
    if links.is_empty() {
        return String::new();
    }
    let items: String = links
        .iter()
        .map(|link| {
            format!(
                r#"<li><a href="{}" rel="me noopener" target="_blank">{}</a></li>"#,
                esc(&link.url),
                esc(&link.label)
            )
        })
        .collect();
    format!(r#"<ul class="profile-links">{items}</ul>"#)
}

/// All projects grouped by category. Categories without projects are omitted.
pub fn projects_index(store: &ContentStore, config: &SiteConfig) -> String {
    let mut body = String::from("<h1>Projects</h1>");

    for category in ProjectCategory::ALL {
        let projects = store.projects_by_category(category);
        if projects.is_empty() {
            continue;
        }
        body.push_str(&format!(
            r#"<section class="category" id="{}"><h2>{}</h2>{}</section>"#,
            category.as_str(),
            category.label(),
            project_grid(&projects)
        ));
    }

    if store.projects().is_empty() {
        body.push_str(r#"<p class="empty">Nothing here yet.</p>"#);
    }

    let meta = PageMeta {
        title: Some("Projects"),
        description: "",
        path: "/projects/",
    };
    layout(config, &meta, &body)
}

pub fn project_detail(project: &Project, config: &SiteConfig) -> String {
    let mut body = String::with_capacity(8 * 1024);

    body.push_str(&format!(
        r#"<article class="project">
<header>
  <p class="breadcrumb"><a href="/projects/">Projects</a> / {category}</p>
  <h1>{title}</h1>
  {badge}
  <p class="tagline">{tagline}</p>
  {dates}
  {links}
</header>
<img class="hero-image" src="{thumb}" alt="{title}">
<p class="description">{description}</p>
{tech}"#,
        category = project.category.label(),
        title = esc(&project.title),
        badge = status_badge(project.status),
        tagline = esc(&project.tagline),
        dates = date_range(project),
        links = project_links(project),
        thumb = esc(&project.thumbnail),
        description = esc(&project.description),
        tech = tech_badges(&project.tech_stack),
    ));

    body.push_str(&bullet_section("Features", &project.features));
    body.push_str(&bullet_section("Highlights", &project.highlights));

    if !project.screenshots.is_empty() {
        body.push_str(r#"<section class="screenshots"><h2>Screenshots</h2>"#);
        for (i, shot) in project.screenshots.iter().enumerate() {
            body.push_str(&format!(
                r#"<img src="{}" alt="{} screenshot {}" loading="lazy">"#,
                esc(shot),
                esc(&project.title),
                i + 1
            ));
        }
        body.push_str("</section>");
    }
    body.push_str("</article>");

    let path = project.url_path();
    let meta = PageMeta {
        title: Some(&project.title),
        description: &project.tagline,
        path: &path,
    };
    layout(config, &meta, &body)
}

fn project_links(project: &Project) -> String {
    let demo = project.demo_url.as_deref().map(|url| ("Live demo", url));
    let source = project.github_url.as_deref().map(|url| ("Source", url));
    let items: String = [demo, source]
        .into_iter()
        .flatten()
        .map(|(label, url)| {
            format!(
                r#"<a class="button" href="{}" target="_blank" rel="noopener">{label}</a>"#,
                esc(url)
            )
        })
        .collect();

    if items.is_empty() {
        items
    } else {
        format!(r#"<p class="links">{items}</p>"#)
    }
}

fn bullet_section(heading: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let lis: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", esc(item)))
        .collect();
    format!(r#"<section><h2>{heading}</h2><ul>{lis}</ul></section>"#)
}

pub fn not_found(config: &SiteConfig) -> String {
    let body = r#"<section class="not-found">
  <h1>404</h1>
  <p>This page doesn't exist.</p>
  <p><a href="/">Back home</a> or browse <a href="/projects/">all projects</a>.</p>
</section>"#;
    let meta = PageMeta {
        title: Some("Not Found"),
        description: "",
        path: "/404.html",
    };
    layout(config, &meta, body)
}
