//! Filesystem scanning and inventory generation.
//!
//! Walks the content root one level deep and produces an [`Inventory`]: every
//! image directly in the root, plus one [`FolderGroup`] per immediate
//! subdirectory that contains at least one image. Deeper nesting is not
//! scanned; the content root is a flat "folders of images" layout.
//!
//! ## Directory Structure
//!
//! ```text
//! website/                         # Content root
//! ├── a.png                        # Root image
//! ├── Genshin/                     # Folder group
//! │   ├── b.jpg
//! │   └── c.jpg
//! ├── Scenery/
//! │   └── hills.webp
//! └── notes/                       # No images → invisible to the inventory
//!     └── readme.txt
//! ```
//!
//! ## Entry Paths
//!
//! Every entry's `path` is built from the content-root segment, the folder
//! name (if any), and the file name, joined with forward slashes on every
//! platform, so `website/Genshin/b.jpg` works unchanged as a URL path.
//!
//! ## Failure Policy
//!
//! A missing or non-directory root is the only fatal condition. Per-file
//! problems degrade softly: a file whose metadata cannot be read is skipped,
//! a file whose pixel dimensions cannot be decoded keeps `dimensions: None`,
//! and an unreadable subdirectory is treated as empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("content root is not a directory: {0}")]
    RootNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extensions recognized as images: lowercase, leading dot.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico",
];

/// One discovered image file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Base filename including extension.
    pub name: String,
    /// Slash-normalized path relative to the project directory, prefixed
    /// with the content-root segment. Usable directly as a URL path.
    pub path: String,
    /// Lowercase extension with leading dot; always allow-listed.
    pub ext: String,
    /// Byte length at scan time.
    pub size: u64,
    /// Pixel dimensions, absent when the file could not be decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

/// One immediate subdirectory of the root with at least one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderGroup {
    pub name: String,
    /// Sorted by file name ascending.
    pub files: Vec<ImageEntry>,
}

/// The full snapshot produced by one scan. Immutable once produced; a new
/// scan fully replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Folder groups, sorted by name ascending.
    pub folders: Vec<FolderGroup>,
    /// Images directly in the root, sorted by file name ascending.
    pub root_files: Vec<ImageEntry>,
    /// Every entry path: root files first, then each folder's files in
    /// folder order. The default random-selection pool.
    pub all_paths: Vec<String>,
    /// Folder name → that folder's entry paths, for filtered selection.
    pub paths_by_folder: BTreeMap<String, Vec<String>>,
}

impl Inventory {
    /// Total number of images across the root and all folders.
    pub fn total_images(&self) -> usize {
        self.root_files.len() + self.folders.iter().map(|f| f.files.len()).sum::<usize>()
    }
}

/// Scan `root`, prefixing every entry path with the `content_root` segment.
///
/// Fails only when `root` is missing or not a directory, or when its listing
/// cannot be read at all.
pub fn scan(root: &Path, content_root: &str) -> Result<Inventory, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    let mut inventory = Inventory::default();

    // Root files first so they lead the random pool.
    for file in entries.iter().filter(|p| p.is_file()) {
        if let Some(entry) = build_entry(file, content_root) {
            inventory.all_paths.push(entry.path.clone());
            inventory.root_files.push(entry);
        }
    }

    // Entries were sorted up front, so folders land name-ascending.
    for dir in entries.iter().filter(|p| p.is_dir()) {
        let Some(name) = dir.file_name() else {
            continue;
        };
        let name = name.to_string_lossy().into_owned();
        let prefix = format!("{content_root}/{name}");
        let files = collect_folder_images(dir, &prefix);
        if files.is_empty() {
            continue;
        }
        let paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
        inventory.all_paths.extend(paths.iter().cloned());
        inventory.paths_by_folder.insert(name.clone(), paths);
        inventory.folders.push(FolderGroup { name, files });
    }

    Ok(inventory)
}

/// List one folder's images, sorted by file name. Read failures and
/// non-image files yield an empty or shorter list, never an error.
fn collect_folder_images(dir: &Path, prefix: &str) -> Vec<ImageEntry> {
    let Ok(read) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = read
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files.iter().filter_map(|f| build_entry(f, prefix)).collect()
}

/// Build an [`ImageEntry`] for `file`, or `None` when the extension is not
/// allow-listed or the file cannot be stat'd.
fn build_entry(file: &Path, prefix: &str) -> Option<ImageEntry> {
    let name = file.file_name()?.to_string_lossy().into_owned();
    let ext = image_extension(&name)?;
    let meta = fs::metadata(file).ok()?;
    let dimensions = probe_dimensions(file);
    Some(ImageEntry {
        path: format!("{prefix}/{name}"),
        name,
        ext,
        size: meta.len(),
        dimensions,
    })
}

/// Lowercased extension with leading dot, if allow-listed.
///
/// A leading dot alone is not an extension: `.png` the dotfile is excluded,
/// `shot.PNG` maps to `.png`.
fn image_extension(name: &str) -> Option<String> {
    let dot = name.rfind('.').filter(|&i| i > 0)?;
    let ext = name[dot..].to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Header-only decode of pixel dimensions. Files the decoder cannot
/// identify (SVG, truncated data) simply get no dimensions.
fn probe_dimensions(file: &Path) -> Option<(u32, u32)> {
    image::image_dimensions(file).ok()
}
