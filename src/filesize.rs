//! Human-readable file sizes for the gallery badges.
//!
//! Units switch at the half-megabyte and half-gigabyte marks so a 600 KB
//! file reads as `0.57 MB` rather than `585.94 KB`. Values are rounded to
//! two decimals with trailing zeros trimmed (`1.00 KB` → `1 KB`).

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

/// Format a byte count as `N B`, `N KB`, `N MB`, or `N GB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let bytes = bytes as f64;
    if bytes >= 0.5 * GB {
        format!("{} GB", round2(bytes / GB))
    } else if bytes >= 0.5 * MB {
        format!("{} MB", round2(bytes / MB))
    } else {
        format!("{} KB", round2(bytes / KB))
    }
}

/// Round to two decimals, trimming trailing zeros and a dangling dot.
fn round2(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
