//! `[profile]` section configuration.
//!
//! The person behind the portfolio, rendered in the home page hero.

use serde::{Deserialize, Serialize};

/// `[profile]` section in folio.toml.
///
/// # Example
/// ```toml
/// [profile]
/// name = "Alice Chen"
/// role = "Full-stack developer"
/// bio = "I build fast, accessible web apps."
/// location = "Berlin"
///
/// [[profile.links]]
/// label = "GitHub"
/// url = "https://github.com/alice"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Display name. Falls back to `[base].author` when empty.
    pub name: String,

    /// Job title or tagline under the name.
    pub role: String,

    /// Short introduction paragraph.
    pub bio: String,

    pub location: String,

    /// Avatar image path or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Social and external links, in display order.
    pub links: Vec<ProfileLink>,
}

/// A labelled external link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}
