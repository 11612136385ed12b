//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so the
//! watcher can pick up `folio.toml` edits while the server keeps reading.
//!
//! ```text
//!   rayon workers / http thread          watcher thread
//!            │                                 │
//!          cfg()  (lock-free load)      reload_config()  (atomic store)
//!            └──────────────► CONFIG ◄─────────┘
//! ```

use super::SiteConfig;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{
    net::SocketAddr,
    sync::{Arc, LazyLock},
};

/// Global config storage, replaced with the loaded config in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Get current config as `Arc<SiteConfig>`.
///
/// Lock-free; the returned `Arc` stays valid across a concurrent reload.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Initialize global config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    CONFIG.store(Arc::new(config));
}

/// Re-read the config file using the CLI captured at startup.
///
/// The old config stays valid for readers that loaded it before this call.
pub fn reload_config() -> Result<()> {
    let config = reloaded(&cfg())?;
    CONFIG.store(Arc::new(config));
    Ok(())
}

/// Point generated URLs at the address the dev server bound.
pub fn bind_config(addr: SocketAddr) {
    let mut config = SiteConfig::clone(&cfg());
    config.bind_to(addr);
    CONFIG.store(Arc::new(config));
}

/// Fresh config from disk. A running server cannot rebind, so the bound
/// address carries over.
fn reloaded(current: &SiteConfig) -> Result<SiteConfig> {
    let cli = current.cli.context("config was not initialized from the CLI")?;
    let mut config = SiteConfig::load(cli)?;
    if let Some(addr) = current.serve.bound {
        config.bind_to(addr);
    }
    config.validate()?;
    Ok(config)
}
