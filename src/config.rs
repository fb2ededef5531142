//! Project configuration.
//!
//! Handles loading and validating `config.toml` from the project directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "website"  # Directory scanned for images (single URL segment)
//! title = "Image Bed"       # Page title and header
//! default_folder = ""       # Folder pre-selected in the random panel ("" = all)
//!
//! [server]
//! port = 3000               # Dev server port
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # Badges, captions, API URL display
//! border = "#e0e0e0"
//! accent = "#333333"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#cccccc"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the pre-selected random folder
//! default_folder = "Genshin"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the directory scanned for images. Also the first segment of
    /// every entry path, so it must be a single path segment.
    pub content_root: String,
    /// Page title shown in the gallery header.
    pub title: String,
    /// Folder pre-selected in the random panel. Empty selects the full pool.
    pub default_folder: String,
    /// Dev server settings.
    pub server: ServerConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_root: "website".to_string(),
            title: "Image Bed".to_string(),
            default_folder: String::new(),
            server: ServerConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl Config {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if self.content_root.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "content_root must be a single path segment".into(),
            ));
        }
        Ok(())
    }
}

/// Dev server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP port the dev server listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Light and dark color schemes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme {
                background: "#ffffff".to_string(),
                text: "#111111".to_string(),
                text_muted: "#666666".to_string(),
                border: "#e0e0e0".to_string(),
                accent: "#333333".to_string(),
            },
            dark: ColorScheme {
                background: "#0a0a0a".to_string(),
                text: "#eeeeee".to_string(),
                text_muted: "#999999".to_string(),
                border: "#333333".to_string(),
                accent: "#cccccc".to_string(),
            },
        }
    }
}

/// One color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorConfig::default().light
    }
}

/// Load `config.toml` from the project directory, falling back to defaults
/// when the file does not exist.
pub fn load_config(project_dir: &Path) -> Result<Config, ConfigError> {
    let path = project_dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Generate CSS custom properties from the color config.
///
/// Light colors go on `:root`; dark colors apply under
/// `prefers-color-scheme: dark`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn scheme_vars(scheme: &ColorScheme) -> String {
        format!(
            "  --background: {};\n  --text: {};\n  --text-muted: {};\n  --border: {};\n  --accent: {};",
            scheme.background, scheme.text, scheme.text_muted, scheme.border, scheme.accent
        )
    }
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n  :root {{\n{}\n  }}\n}}",
        scheme_vars(&colors.light),
        scheme_vars(&colors.dark)
    )
}

/// A stock `config.toml` with every option documented. `Config::default()`
/// parses from this exact text.
pub fn stock_config_toml() -> &'static str {
    r##"# imgbed configuration
# All options are optional - the values below are the defaults.

# Directory scanned for images. Also the first segment of every entry path,
# so it must be a single path segment.
content_root = "website"

# Page title shown in the gallery header.
title = "Image Bed"

# Folder pre-selected in the random panel. Empty selects the full pool.
default_folder = ""

[server]
# Dev server port.
port = 3000

[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"
border = "#e0e0e0"
accent = "#333333"

[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#cccccc"
"##
}
