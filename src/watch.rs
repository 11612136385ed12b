//! File system watcher for live rebuild during `serve`.
//!
//! Monitors the data directory, the assets directory and the config file,
//! and rebuilds the site when they change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────────────────────────────┐
//! │ notify   │───▶│ Debouncer │───▶│ handle_changes()                 │
//! │ events   │    │ (300ms)   │    │   config → reload_config()       │
//! └──────────┘    └───────────┘    │   data   → Snapshot::reload()    │
//!                                  │   any    → build_site(snapshot)  │
//!                                  └──────────────────────────────────┘
//! ```
//!
//! The process-wide content store is never replaced. Data edits are loaded
//! into a watcher-owned snapshot; a snapshot that fails to load is reported
//! and the previous output stays in place.

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, reload_config},
    data::{ContentStore, DataError, content},
    log,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

// =============================================================================
// Change Classification
// =============================================================================

/// What a batch of changed paths touched.
#[derive(Debug, Default, PartialEq, Eq)]
struct Changes {
    config: bool,
    data: bool,
    assets: bool,
}

impl Changes {
    fn from_paths(paths: &[PathBuf], config: &SiteConfig) -> Self {
        let mut changes = Self::default();
        for path in paths {
            if path == &config.config_path {
                changes.config = true;
            } else if path.starts_with(&config.build.data) {
                changes.data = true;
            } else if path.starts_with(&config.build.assets) {
                changes.assets = true;
            }
        }
        changes
    }

    const fn is_empty(&self) -> bool {
        !(self.config || self.data || self.assets)
    }

    fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (self.config, "config"),
            (self.data, "data"),
            (self.assets, "assets"),
        ]
        .into_iter()
        .filter_map(|(changed, name)| changed.then_some(name))
        .collect();
        parts.join(", ")
    }
}

// =============================================================================
// Content Snapshot
// =============================================================================

/// Content the watcher rebuilds from.
///
/// Starts out as the process-wide store and is replaced by each successful
/// reload of the data directory.
#[derive(Default)]
struct Snapshot {
    latest: Option<ContentStore>,
}

impl Snapshot {
    fn current(&self) -> Option<&ContentStore> {
        self.latest.as_ref().or_else(|| content())
    }

    /// Load a fresh store from `dir`. On failure the previous snapshot is kept.
    fn reload(&mut self, dir: &Path) -> Result<&ContentStore, DataError> {
        let store = ContentStore::load(dir)?;
        Ok(self.latest.insert(store))
    }
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        self.pending
            .extend(event.paths.into_iter().filter(|p| !is_temp_file(p)));
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Reload whatever changed and rebuild. Returns true if a rebuild ran.
fn handle_changes(paths: &[PathBuf], snapshot: &mut Snapshot) -> bool {
    let changes = Changes::from_paths(paths, &cfg());
    if changes.is_empty() {
        return false;
    }
    log!("watch"; "{} changed, rebuilding...", changes.describe());

    if changes.config
        && let Err(e) = reload_config()
    {
        log!("watch"; "config reload failed, keeping previous config");
        log!("error"; "{e:#}");
    }
    let config = cfg();

    // The data directory may have moved with the config.
    if (changes.data || changes.config)
        && let Err(e) = snapshot.reload(&config.build.data)
    {
        log!("watch"; "content reload failed, keeping previous output");
        log!("error"; "{e}");
        return false;
    }

    let Some(store) = snapshot.current() else {
        return false;
    };
    match build_site(store, &config) {
        Ok(()) => true,
        Err(e) => {
            log!("watch"; "build failed");
            log!("error"; "{e:#}");
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to watch: data and assets recursively, the config file alone.
fn watch_targets(config: &SiteConfig) -> [(&Path, RecursiveMode); 3] {
    [
        (config.build.data.as_path(), RecursiveMode::Recursive),
        (config.build.assets.as_path(), RecursiveMode::Recursive),
        (config.config_path.as_path(), RecursiveMode::NonRecursive),
    ]
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();

    for (path, mode) in watch_targets(config) {
        if !path.exists() {
            continue;
        }
        watcher
            .watch(path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
        watched.push(path.strip_prefix(root).unwrap_or(path).display().to_string());
    }

    log!("watch"; "{}", watched.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking() -> Result<()> {
    let config = cfg();
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &config)?;

    let mut debouncer = Debouncer::new();
    let mut snapshot = Snapshot::default();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut snapshot) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
