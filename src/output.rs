//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Scan
//!
//! ```text
//! Folders
//!     Genshin (2 images)
//!     Scenery (5 images)
//! Root images: 1
//!
//! Total: 8 images in 2 folders
//! ```

use crate::scan::Inventory;

/// Format the scan summary: per-folder counts, root count, totals.
pub fn format_scan_output(inventory: &Inventory) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Folders".to_string());
    if inventory.folders.is_empty() {
        lines.push("    (none)".to_string());
    }
    for folder in &inventory.folders {
        lines.push(format!(
            "    {} ({} {})",
            folder.name,
            folder.files.len(),
            plural(folder.files.len())
        ));
    }

    if !inventory.root_files.is_empty() {
        lines.push(format!("Root images: {}", inventory.root_files.len()));
    }

    lines.push(String::new());
    lines.push(format!(
        "Total: {} {} in {} {}",
        inventory.total_images(),
        plural(inventory.total_images()),
        inventory.folders.len(),
        if inventory.folders.len() == 1 {
            "folder"
        } else {
            "folders"
        }
    ));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(inventory: &Inventory) {
    for line in format_scan_output(inventory) {
        println!("{}", line);
    }
}

/// Format the build summary: generated artifacts with entry counts.
pub fn format_build_output(inventory: &Inventory) -> Vec<String> {
    vec![
        format!("index.html ({} entries)", inventory.total_images()),
        format!(
            "inventory.json ({} paths, {} folder pools)",
            inventory.all_paths.len(),
            inventory.paths_by_folder.len()
        ),
    ]
}

/// Print build output to stdout.
pub fn print_build_output(inventory: &Inventory) {
    for line in format_build_output(inventory) {
        println!("{}", line);
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "image" } else { "images" }
}
