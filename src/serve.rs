//! Development HTTP server.
//!
//! A minimal threaded server over `std::net::TcpListener`: one accept loop,
//! one thread per connection, `Connection: close` on every response. Serves
//! the generated page and content files out of the project directory and
//! implements the random-image API against an in-memory [`Inventory`]:
//!
//! - `GET /random[?folder=NAME]`: `302` redirect to a randomly chosen
//!   entry path; an empty or unknown pool answers `404` with a JSON error
//!   payload. An unknown folder never falls back to the full pool.
//! - `GET /rescan`: rebuilds the inventory from disk and reports the new
//!   counts as JSON. This is the only way the inventory changes after
//!   startup; individual requests never touch `inventory.json`.
//! - anything else: static file serving relative to the project directory
//!   (`/` maps to `index.html`, directories to their `index.html`).

use crate::config::Config;
use crate::scan::{self, Inventory};
use crate::select;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

pub struct Server {
    listener: TcpListener,
    state: Arc<ServerState>,
}

struct ServerState {
    project_dir: PathBuf,
    content_root: String,
    inventory: RwLock<Inventory>,
}

impl Server {
    /// Bind to `port` (0 binds an ephemeral port) holding the given
    /// inventory snapshot.
    pub fn bind(
        project_dir: &Path,
        config: &Config,
        inventory: Inventory,
        port: u16,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        Ok(Self {
            listener,
            state: Arc::new(ServerState {
                project_dir: project_dir.to_path_buf(),
                content_root: config.content_root.clone(),
                inventory: RwLock::new(inventory),
            }),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until the listener fails.
    pub fn run(self) -> std::io::Result<()> {
        for stream in self.listener.incoming() {
            let Ok(stream) = stream else {
                continue;
            };
            let state = Arc::clone(&self.state);
            thread::spawn(move || handle_connection(stream, &state));
        }
        Ok(())
    }

    /// Run on a background thread, returning the bound address.
    pub fn spawn(self) -> std::io::Result<SocketAddr> {
        let addr = self.listener.local_addr()?;
        thread::spawn(move || {
            let _ = self.run();
        });
        Ok(addr)
    }
}

fn handle_connection(mut stream: TcpStream, state: &ServerState) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let target = request.split_whitespace().nth(1).unwrap_or("/");
    let _ = route(target, state).write_to(&mut stream);
}

// ============================================================================
// Routing
// ============================================================================

fn route(target: &str, state: &ServerState) -> Response {
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };
    match path {
        "/random" => random_response(state, query),
        "/rescan" => rescan_response(state),
        _ => static_response(state, path),
    }
}

fn random_response(state: &ServerState, query: Option<&str>) -> Response {
    let folder = query.and_then(|q| query_param(q, "folder"));
    let inventory = state.inventory.read().unwrap_or_else(|e| e.into_inner());
    match select::pick(&inventory, folder.as_deref()) {
        Some(path) => Response::redirect(format!("/{path}")),
        None => {
            let message = if folder.is_some() {
                "no images found in folder"
            } else {
                "no images found"
            };
            Response::json("404 Not Found", &serde_json::json!({ "error": message }))
        }
    }
}

fn rescan_response(state: &ServerState) -> Response {
    let root = state.project_dir.join(&state.content_root);
    match scan::scan(&root, &state.content_root) {
        Ok(inventory) => {
            let counts = serde_json::json!({
                "folders": inventory.folders.len(),
                "images": inventory.total_images(),
            });
            *state.inventory.write().unwrap_or_else(|e| e.into_inner()) = inventory;
            Response::json("200 OK", &counts)
        }
        Err(err) => Response::json(
            "500 Internal Server Error",
            &serde_json::json!({ "error": err.to_string() }),
        ),
    }
}

fn static_response(state: &ServerState, path: &str) -> Response {
    let rel = percent_decode(path.trim_start_matches('/'));
    if rel.split('/').any(|segment| segment == "..") {
        return Response::not_found_page();
    }

    let mut file_path = if rel.is_empty() {
        state.project_dir.join("index.html")
    } else {
        state.project_dir.join(&rel)
    };
    if file_path.is_dir() {
        file_path = file_path.join("index.html");
    }

    if !file_path.is_file() {
        return Response::not_found_page();
    }
    let body = fs::read(&file_path).unwrap_or_default();
    Response {
        status: "200 OK",
        content_type: content_type_for(&file_path),
        location: None,
        body,
    }
}

// ============================================================================
// Responses
// ============================================================================

struct Response {
    status: &'static str,
    content_type: &'static str,
    location: Option<String>,
    body: Vec<u8>,
}

impl Response {
    fn redirect(location: String) -> Self {
        Self {
            status: "302 Found",
            content_type: "text/plain; charset=utf-8",
            location: Some(location),
            body: Vec::new(),
        }
    }

    fn json(status: &'static str, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            location: None,
            body: value.to_string().into_bytes(),
        }
    }

    fn not_found_page() -> Self {
        Self {
            status: "404 Not Found",
            content_type: "text/html; charset=utf-8",
            location: None,
            body: b"<h1>404 - Not Found</h1>".to_vec(),
        }
    }

    fn write_to(&self, stream: &mut TcpStream) -> std::io::Result<()> {
        let mut header = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n",
            self.status,
            self.content_type,
            self.body.len()
        );
        if let Some(location) = &self.location {
            header.push_str(&format!("Location: {location}\r\n"));
        }
        header.push_str("Connection: close\r\n\r\n");
        stream.write_all(header.as_bytes())?;
        stream.write_all(&self.body)
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Query parsing
// ============================================================================

/// Extract a query parameter value, percent-decoded.
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| percent_decode(value))
    })
}

/// Minimal percent-decoding: `%XX` byte escapes and `+` as space. Invalid
/// escapes pass through literally.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hi = (bytes[i + 1] as char).to_digit(16);
                let lo = (bytes[i + 2] as char).to_digit(16);
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
