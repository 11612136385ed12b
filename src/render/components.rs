//! Reusable HTML fragments: cards, badges, skill bars, the contact form.

use crate::{
    config::{ContactMode, SiteConfig},
    data::{Project, ProjectStatus, Skill, SkillCategory},
    utils::{date::format_range, escape::escape_html as esc},
};

/// Simulated submissions resolve after this many milliseconds.
const SIMULATED_DELAY_MS: u32 = 1500;

/// Relay endpoint the contact script posts to.
const RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Known skill icon keys and their display glyphs.
const SKILL_ICONS: &[(&str, &str)] = &[
    ("react", "⚛️"),
    ("nextjs", "▲"),
    ("vue", "🟩"),
    ("typescript", "TS"),
    ("javascript", "JS"),
    ("html", "🌐"),
    ("css", "🎨"),
    ("tailwind", "🌊"),
    ("nodejs", "⬢"),
    ("python", "🐍"),
    ("rust", "🦀"),
    ("go", "🐹"),
    ("java", "☕"),
    ("database", "🗄️"),
    ("postgresql", "🐘"),
    ("mongodb", "🍃"),
    ("docker", "🐳"),
    ("git", "🔀"),
    ("figma", "✏️"),
    ("flutter", "🦋"),
    ("android", "🤖"),
    ("apple", "🍎"),
];

/// Display glyph for a skill icon key. Unknown keys display as the key itself.
pub fn skill_icon(key: &str) -> &str {
    SKILL_ICONS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map_or(key, |(_, glyph)| glyph)
}

pub fn status_badge(status: ProjectStatus) -> String {
    format!(
        r#"<span class="badge badge-{}">{}</span>"#,
        status.as_str(),
        status.label()
    )
}

pub fn tech_badges(tech: &[String]) -> String {
    if tech.is_empty() {
        return String::new();
    }
    let items: String = tech
        .iter()
        .map(|t| format!(r#"<li class="tech">{}</li>"#, esc(t)))
        .collect();
    format!(r#"<ul class="tech-stack">{items}</ul>"#)
}

/// Card linking to a project's detail page.
pub fn project_card(project: &Project) -> String {
    format!(
        r#"<article class="project-card" data-category="{category}">
  <a href="{url}"><img src="{thumb}" alt="{title}" loading="lazy"></a>
  <div class="project-card-body">
    <h3><a href="{url}">{title}</a></h3>
    {badge}
    <p class="tagline">{tagline}</p>
    {tech}
  </div>
</article>"#,
        category = project.category.as_str(),
        url = project.url_path(),
        thumb = esc(&project.thumbnail),
        title = esc(&project.title),
        badge = status_badge(project.status),
        tagline = esc(&project.tagline),
        tech = tech_badges(&project.tech_stack),
    )
}

pub fn project_grid(projects: &[&Project]) -> String {
    let cards: String = projects.iter().map(|p| project_card(p)).collect();
    format!(r#"<div class="project-grid">{cards}</div>"#)
}

/// One skill with a proficiency bar.
pub fn skill_bar(skill: &Skill) -> String {
    format!(
        r#"<li class="skill">
  <span class="skill-icon" aria-hidden="true">{icon}</span>
  <span class="skill-name">{name}</span>
  <span class="skill-bar" role="progressbar" aria-valuenow="{level}" aria-valuemin="0" aria-valuemax="100"><span style="width: {level}%"></span></span>
  <span class="skill-level">{level}%</span>
</li>"#,
        icon = esc(skill_icon(&skill.icon)),
        name = esc(&skill.name),
        level = skill.level,
    )
}

/// A titled group of skills. Empty categories render nothing.
pub fn skill_group(category: SkillCategory, skills: &[Skill]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let bars: String = skills.iter().map(skill_bar).collect();
    format!(
        r#"<div class="skill-group" id="skills-{key}"><h3>{label}</h3><ul>{bars}</ul></div>"#,
        key = category.as_str(),
        label = category.label(),
    )
}

/// Start/end dates of a project, e.g. `Jan 2024 – Present`.
pub fn date_range(project: &Project) -> String {
    let end = if project.is_ongoing() {
        None
    } else {
        project.end_date.as_deref()
    };
    format!(
        r#"<p class="dates">{}</p>"#,
        esc(&format_range(&project.start_date, end))
    )
}

/// Contact form wired for relay or simulated submission.
///
/// The mode and credentials travel as `data-*` attributes; the embedded
/// script reads them and never sends anything in simulated mode.
pub fn contact_form(config: &SiteConfig) -> String {
    let attrs = match config.contact.mode() {
        ContactMode::Relay {
            service_id,
            template_id,
            public_key,
        } => format!(
            r#"data-mode="relay" data-endpoint="{RELAY_ENDPOINT}" data-service="{}" data-template="{}" data-key="{}""#,
            esc(service_id),
            esc(template_id),
            esc(public_key)
        ),
        ContactMode::Simulated => {
            format!(r#"data-mode="simulated" data-delay="{SIMULATED_DELAY_MS}""#)
        }
    };

    format!(
        r#"<form id="contact-form" class="contact-form" {attrs}>
  <label>Name <input name="from_name" required></label>
  <label>Email <input name="reply_to" type="email" required></label>
  <label>Message <textarea name="message" rows="5" required></textarea></label>
  <button type="submit">Send message</button>
  <p class="form-status" role="status" aria-live="polite"></p>
</form>
<p class="contact-alt">Or write to <a href="mailto:{email}">{email}</a></p>
<script>{script}</script>"#,
        email = esc(&config.base.email),
        script = super::CONTACT_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProjectCategory;

    fn sample_project() -> Project {
        Project {
            id: "ray-tracer".into(),
            title: "Ray <Tracer>".into(),
            tagline: "Pixels & light".into(),
            description: "d".into(),
            thumbnail: "/images/rt.png".into(),
            screenshots: vec![],
            demo_url: None,
            github_url: None,
            tech_stack: vec!["Rust".into(), "WGSL".into()],
            features: vec![],
            highlights: vec![],
            status: ProjectStatus::InDevelopment,
            start_date: "2024-02".into(),
            end_date: None,
            category: ProjectCategory::Other,
        }
    }

    #[test]
    fn test_skill_icon_known_and_unknown() {
        assert_eq!(skill_icon("rust"), "🦀");
        assert_eq!(skill_icon("Docker"), "🐳");
        assert_eq!(skill_icon("zig"), "zig");
        assert_eq!(skill_icon(""), "");
    }

    #[test]
    fn test_skill_icons_are_visible() {
        assert_eq!(skill_icon("apple"), "🍎");
        for (key, glyph) in SKILL_ICONS {
            assert!(!glyph.trim().is_empty(), "icon `{key}` has no glyph");
        }
    }

    #[test]
    fn test_project_card_escapes_and_links() {
        let html = project_card(&sample_project());

        assert!(html.contains(r#"href="/projects/ray-tracer/""#));
        assert!(html.contains("Ray &lt;Tracer&gt;"));
        assert!(html.contains("Pixels &amp; light"));
        assert!(html.contains(r#"data-category="other""#));
        assert!(html.contains("badge-in-development"));
        assert!(html.contains(r#"<li class="tech">WGSL</li>"#));
    }

    #[test]
    fn test_tech_badges_empty() {
        assert_eq!(tech_badges(&[]), "");
    }

    #[test]
    fn test_skill_bar_level() {
        let skill = Skill {
            name: "Rust".into(),
            level: 85,
            icon: "rust".into(),
        };
        let html = skill_bar(&skill);

        assert!(html.contains(r#"aria-valuenow="85""#));
        assert!(html.contains("width: 85%"));
        assert!(html.contains("🦀"));
    }

    #[test]
    fn test_skill_group_empty_renders_nothing() {
        assert_eq!(skill_group(SkillCategory::Backend, &[]), "");
    }

    #[test]
    fn test_date_range_ongoing() {
        assert!(date_range(&sample_project()).contains("Feb 2024 – Present"));
    }

    #[test]
    fn test_contact_form_simulated_by_default() {
        let html = contact_form(&SiteConfig::default());

        assert!(html.contains(r#"data-mode="simulated""#));
        assert!(!html.contains("data-service"));
        assert!(html.contains("mailto:user@noreply.folio"));
    }

    #[test]
    fn test_contact_form_relay() {
        let mut config = SiteConfig::default();
        config.contact.service_id = Some("svc".into());
        config.contact.template_id = Some("tpl".into());
        config.contact.public_key = Some("key".into());
        let html = contact_form(&config);

        assert!(html.contains(r#"data-mode="relay""#));
        assert!(html.contains(r#"data-service="svc""#));
        assert!(html.contains(r#"data-key="key""#));
        assert!(html.contains(RELAY_ENDPOINT));
    }
}
