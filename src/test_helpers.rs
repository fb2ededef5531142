//! Shared test utilities for the imgbed test suite.
//!
//! Provides content-tree fixtures and a minimal real image encoder so scan
//! tests can exercise dimension probing without fixture files on disk.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a content tree in a temp directory: root images plus folders of
/// images, all with fake bytes (scan includes files by extension alone).
///
/// ```rust
/// let tmp = setup_content(&["a.png"], &[("Genshin", &["b.jpg", "c.jpg"])]);
/// ```
pub fn setup_content(root_files: &[&str], folders: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in root_files {
        fs::write(tmp.path().join(name), b"fake image").unwrap();
    }
    for (folder, files) in folders {
        let dir = tmp.path().join(folder);
        fs::create_dir_all(&dir).unwrap();
        for name in *files {
            fs::write(dir.join(name), b"fake image").unwrap();
        }
    }
    tmp
}

/// A minimal valid 24-bit uncompressed BMP with the given dimensions.
///
/// BMP is the one allow-listed format simple enough to emit by hand (no
/// compression, no checksums), which is all dimension probing needs.
pub fn tiny_bmp(width: u32, height: u32) -> Vec<u8> {
    let row = (width * 3).div_ceil(4) * 4;
    let pixel_bytes = row * height;
    let file_size = 54 + pixel_bytes;

    let mut bmp = Vec::with_capacity(file_size as usize);
    // File header
    bmp.extend_from_slice(b"BM");
    bmp.extend_from_slice(&file_size.to_le_bytes());
    bmp.extend_from_slice(&[0; 4]);
    bmp.extend_from_slice(&54u32.to_le_bytes());
    // BITMAPINFOHEADER
    bmp.extend_from_slice(&40u32.to_le_bytes());
    bmp.extend_from_slice(&(width as i32).to_le_bytes());
    bmp.extend_from_slice(&(height as i32).to_le_bytes());
    bmp.extend_from_slice(&1u16.to_le_bytes());
    bmp.extend_from_slice(&24u16.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&pixel_bytes.to_le_bytes());
    bmp.extend_from_slice(&2835u32.to_le_bytes());
    bmp.extend_from_slice(&2835u32.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    bmp.extend_from_slice(&0u32.to_le_bytes());
    // Pixel data (all black)
    bmp.resize(file_size as usize, 0);
    bmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_bmp_is_decodable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("probe.bmp");
        fs::write(&path, tiny_bmp(5, 7)).unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (5, 7));
    }
}
