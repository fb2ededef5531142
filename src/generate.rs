//! HTML generation for the gallery page.
//!
//! Takes an [`Inventory`] and writes the browsable site into the project
//! directory:
//!
//! - **`index.html`**: stats header, search box, random-image panel, and the
//!   folder tree (root file rows first, then one collapsible section per
//!   folder). Each file row carries type/dimension/size badges and a copy
//!   button.
//! - **`inventory.json`**: the serialized scan snapshot, re-derivable from a
//!   scan at any time.
//!
//! The page is self-contained: CSS and JS are embedded at compile time
//! (`static/style.css`, `static/app.js`), colors are injected from
//! `config.toml` as CSS custom properties, and the path pools are embedded
//! as a JSON island (`<script type="application/json" id="image-data">`) so
//! the static page can run client-side random previews without a server.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; folder
//! collapsing uses native `<details>`/`<summary>`, so the page works with
//! JS disabled (minus clipboard and random preview).

use crate::config::{self, Config};
use crate::filesize::format_file_size;
use crate::scan::{FolderGroup, ImageEntry, Inventory};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generated page name.
pub const INDEX_FILE: &str = "index.html";
/// Generated data artifact name.
pub const INVENTORY_FILE: &str = "inventory.json";

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/app.js");

/// Path pools embedded in the page for client-side random previews.
#[derive(Serialize)]
struct ImageData<'a> {
    all_images: &'a [String],
    folder_images: &'a BTreeMap<String, Vec<String>>,
}

/// Render and write `index.html` and `inventory.json` into `project_dir`.
pub fn generate(
    inventory: &Inventory,
    config: &Config,
    project_dir: &Path,
) -> Result<(), GenerateError> {
    let data_json = serde_json::to_string(&ImageData {
        all_images: &inventory.all_paths,
        folder_images: &inventory.paths_by_folder,
    })?;

    let page = render_index(inventory, config, &data_json);
    fs::write(project_dir.join(INDEX_FILE), page.into_string())?;

    let inventory_json = serde_json::to_string_pretty(inventory)?;
    fs::write(project_dir.join(INVENTORY_FILE), inventory_json)?;

    Ok(())
}

// ============================================================================
// Page renderer
// ============================================================================

/// Render the full gallery page.
fn render_index(inventory: &Inventory, config: &Config, data_json: &str) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.title) }
                style { (PreEscaped(css)) }
            }
            body {
                header.site-header {
                    h1 { (config.title) }
                    p.site-stats {
                        (inventory.folders.len()) " folders · " (inventory.total_images()) " images"
                    }
                    input id="search-input" type="search" placeholder="Filter by file name…";
                }
                (render_random_panel(inventory, config))
                main.file-tree {
                    @for file in &inventory.root_files {
                        (render_file_row(file))
                    }
                    @for folder in &inventory.folders {
                        (render_folder(folder))
                    }
                    @if inventory.total_images() == 0 {
                        p.empty-state { "No images found in the content root." }
                    }
                }
                button id="back-to-top" type="button" title="Back to top" { "↑" }
                div id="toast" role="status" { "Copied" }
                script type="application/json" id="image-data" { (PreEscaped(data_json)) }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

// ============================================================================
// Components
// ============================================================================

/// One collapsible folder section with its file rows.
fn render_folder(folder: &FolderGroup) -> Markup {
    html! {
        details.folder-item data-name=(folder.name) {
            summary.folder-header {
                span.folder-name { (folder.name) }
                span.folder-count { "(" (folder.files.len()) ")" }
                button.copy-btn type="button" data-copy=(folder.name) { "Copy" }
            }
            div.folder-content {
                @for file in &folder.files {
                    (render_file_row(file))
                }
            }
        }
    }
}

/// One file row: link, type badge (with dimensions when known), size badge,
/// copy button. The copy button carries the path as a data attribute; all
/// behavior is wired up by event delegation in `app.js`.
fn render_file_row(file: &ImageEntry) -> Markup {
    let kind = file.ext.trim_start_matches('.').to_uppercase();
    html! {
        div.file-item data-name=(file.name) {
            a.file-name href={ "/" (file.path) } target="_blank" rel="noopener" { (file.name) }
            span.file-meta {
                span.file-type {
                    (kind)
                    @if let Some((w, h)) = file.dimensions {
                        " " (w) "×" (h)
                    }
                }
                span.file-size { (format_file_size(file.size)) }
            }
            button.copy-btn type="button" data-copy-link=(file.path) { "Copy" }
        }
    }
}

/// The random-image panel: folder dropdown (default folder pre-selected),
/// refresh/copy controls, API URL display, and the preview figure.
fn render_random_panel(inventory: &Inventory, config: &Config) -> Markup {
    html! {
        section.random-panel {
            h2 { "Random image" }
            div.random-controls {
                select id="folder-select" {
                    option value="" selected[config.default_folder.is_empty()] {
                        "All folders"
                    }
                    @for folder in &inventory.folders {
                        option value=(folder.name) selected[folder.name == config.default_folder] {
                            (folder.name)
                        }
                    }
                }
                button id="refresh-random" type="button" { "Refresh" }
                button id="copy-api-url" type="button" { "Copy API URL" }
            }
            p.api-line { "API: " code id="api-url" { "/random" } }
            figure.random-preview {
                img id="random-image" alt="Random image preview" hidden;
                figcaption id="random-path" {}
            }
        }
    }
}
