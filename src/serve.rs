//! Development server with live rebuild.
//!
//! A small static file server over the build output, built on `tiny_http`:
//!
//! - `/path/` resolves to `path/index.html`
//! - unknown paths get the generated `404.html` with status 404
//! - file watching and auto-rebuild (via the `watch` module)
//! - graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Serve files             Rebuild site
//!          └───────────┬───────────┘
//!                      ▼
//!             config.build.output
//! ```

use crate::{
    build::build_site,
    config::{SiteConfig, bind_config, cfg},
    data::ContentStore,
    log,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Read,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Body used when the output has no 404.html
const FALLBACK_NOT_FOUND: &str = "404 Not Found";

/// Bind the development server, build `store` for the bound address and
/// serve it with optional file watching.
///
/// Blocks until Ctrl+C is received.
pub fn serve_site(store: &ContentStore) -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid [serve.interface]: {}", c.serve.interface))?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    bind_config(addr);
    build_site(store, &cfg())?;

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if c.serve.watch {
        std::thread::spawn(|| {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err}");
            }
        });
    }

    for request in server.incoming_requests() {
        // Re-read config on each request to pick up hot-reloaded changes
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve_path(&config.build.output, request.url()) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request, &config.build.output),
    }
}

/// Map a request URL onto a file under `root`.
///
/// Query strings are ignored, percent-escapes decoded and directories
/// resolved to their `index.html`. Returns `None` for anything that does not
/// name an existing file inside `root`.
fn resolve_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = urlencoding::decode(path).ok()?;
    let rel = Path::new(path.trim_start_matches('/'));

    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    let local = root.join(rel);
    if local.is_file() {
        return Some(local);
    }
    let index = local.join("index.html");
    index.is_file().then_some(index)
}

// ============================================================================
// Response Helpers
// ============================================================================

fn with_content_type<R: Read>(response: Response<R>, value: &str) -> Response<R> {
    match Header::from_bytes("Content-Type", value) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = with_content_type(Response::from_data(content), guess_content_type(path));
    request.respond(response)?;
    Ok(())
}

/// Serve the generated 404 page, or a plain-text body if it is missing.
fn serve_not_found(request: Request, root: &Path) -> Result<()> {
    let (body, content_type) = match fs::read(root.join("404.html")) {
        Ok(html) => (html, "text/html; charset=utf-8"),
        Err(_) => (
            FALLBACK_NOT_FOUND.as_bytes().to_vec(),
            "text/plain; charset=utf-8",
        ),
    };
    let response = with_content_type(
        Response::from_data(body).with_status_code(StatusCode(404)),
        content_type,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("pdf") => "application/pdf",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("projects/my app")).unwrap();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::write(root.join("projects/index.html"), "list").unwrap();
        fs::write(root.join("projects/my app/index.html"), "detail").unwrap();
        fs::write(root.join("sitemap.xml"), "<urlset/>").unwrap();
        dir
    }

    #[test]
    fn test_resolve_index_files() {
        let dir = site();
        let root = dir.path();

        assert_eq!(resolve_path(root, "/"), Some(root.join("index.html")));
        assert_eq!(
            resolve_path(root, "/projects/"),
            Some(root.join("projects/index.html"))
        );
        assert_eq!(
            resolve_path(root, "/projects"),
            Some(root.join("projects/index.html"))
        );
    }

    #[test]
    fn test_resolve_decodes_and_strips_query() {
        let dir = site();
        let root = dir.path();

        assert_eq!(
            resolve_path(root, "/projects/my%20app/?ref=home"),
            Some(root.join("projects/my app/index.html"))
        );
        assert_eq!(
            resolve_path(root, "/sitemap.xml?t=1"),
            Some(root.join("sitemap.xml"))
        );
    }

    #[test]
    fn test_resolve_unknown_and_traversal() {
        let dir = site();
        let root = dir.path();

        assert_eq!(resolve_path(root, "/missing/"), None);
        assert_eq!(resolve_path(root, "/../etc/passwd"), None);
        assert_eq!(resolve_path(root, "/projects/%2e%2e/%2e%2e/secret"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("a/index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(
            guess_content_type(Path::new("blob")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_try_bind_port_gives_up() {
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();
        let held = TcpListener::bind((localhost, 0)).unwrap();
        let port = held.local_addr().unwrap().port();

        let Err(err) = try_bind_port(localhost, port, 1) else {
            panic!("bound a port that is already in use");
        };
        assert!(err.to_string().contains("Failed to bind after 1 attempts"));
    }
}
