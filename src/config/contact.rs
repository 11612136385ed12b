//! `[contact]` section configuration.
//!
//! Credentials for the third-party email relay used by the contact form.
//! Without all three values the form falls back to a simulated submission.

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable overriding `service_id`.
pub const ENV_SERVICE_ID: &str = "FOLIO_CONTACT_SERVICE_ID";
/// Environment variable overriding `template_id`.
pub const ENV_TEMPLATE_ID: &str = "FOLIO_CONTACT_TEMPLATE_ID";
/// Environment variable overriding `public_key`.
pub const ENV_PUBLIC_KEY: &str = "FOLIO_CONTACT_PUBLIC_KEY";

/// `[contact]` section in folio.toml.
///
/// # Example
/// ```toml
/// [contact]
/// service_id = "service_abc"
/// template_id = "template_xyz"
/// public_key = "pk_123"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    /// Public (browser-side) API key of the relay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// How the rendered contact form submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMode<'a> {
    /// Post through the email relay with these credentials.
    Relay {
        service_id: &'a str,
        template_id: &'a str,
        public_key: &'a str,
    },
    /// Wait briefly, then report success without sending anything.
    Simulated,
}

impl ContactConfig {
    /// Apply non-empty environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields = [
            (ENV_SERVICE_ID, &mut self.service_id),
            (ENV_TEMPLATE_ID, &mut self.template_id),
            (ENV_PUBLIC_KEY, &mut self.public_key),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = Some(value);
            }
        }
    }

    /// Relay mode only when every credential is present and non-blank.
    pub fn mode(&self) -> ContactMode<'_> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        match (
            present(&self.service_id),
            present(&self.template_id),
            present(&self.public_key),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => ContactMode::Relay {
                service_id,
                template_id,
                public_key,
            },
            _ => ContactMode::Simulated,
        }
    }
}
