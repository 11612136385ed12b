//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)              |
//! | `[profile]` | Person shown in the hero (name, role, links)    |
//! | `[build]`   | Data/asset/output paths, minify, sitemap        |
//! | `[serve]`   | Development server (port, interface, watch)     |
//! | `[contact]` | Email relay credentials for the contact form    |
//! | `[extra]`   | User-defined custom fields                      |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Alice Chen"
//! description = "Full-stack developer"
//! url = "https://alice.dev"
//!
//! [build]
//! data = "data"
//! output = "public"
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
mod contact;
pub mod defaults;
mod error;
mod handle;
mod profile;
mod serve;

pub use contact::ContactMode;
pub use handle::{bind_config, cfg, init_config, reload_config};
pub use profile::ProfileLink;

use base::BaseConfig;
use build::BuildConfig;
use contact::ContactConfig;
use error::ConfigError;
use profile::ProfileConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Portfolio owner
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Contact form relay settings
    #[serde(default)]
    pub contact: ContactConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config file named by the CLI (or defaults if it doesn't exist)
    /// and merge CLI and environment overrides into it.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.contact.apply_env();

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Display name of the portfolio owner.
    pub fn owner_name(&self) -> &str {
        if self.profile.name.is_empty() {
            &self.base.author
        } else {
            &self.profile.name
        }
    }

    /// Absolute URL for a site path such as `/projects/foo/`.
    ///
    /// Without `[base.url]` the path is returned root-relative.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base.url.as_deref().unwrap_or("").trim_end_matches('/');
        format!("{base}{path}")
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = match &cli.command {
            Commands::Init { name: Some(name) } => cli
                .root
                .as_ref()
                .cloned()
                .unwrap_or_else(|| self.get_root().to_owned())
                .join(name),
            _ => cli
                .root
                .as_ref()
                .cloned()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };
        self.update_path_with_root(&root, cli);

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
            ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
        }
    }

    /// Serve the site from `addr`: pages link to the dev server instead of
    /// `[base.url]`.
    pub fn bind_to(&mut self, addr: SocketAddr) {
        self.serve.bound = Some(addr);
        self.base.url = Some(format!("http://{addr}"));
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.data, cli.data.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.data = Self::normalize_path(&root.join(&self.build.data));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.sitemap.path = self.build.output.join(&self.build.sitemap.path);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.featured == 0 {
            bail!(ConfigError::Validation(
                "[build.featured] must be at least 1".into()
            ));
        }

        if self.build.output == self.build.data || self.build.output == self.build.assets {
            bail!(ConfigError::Validation(
                "[build.output] must differ from [build.data] and [build.assets]".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
