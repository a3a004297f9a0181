//! Project configuration module.
//!
//! Handles loading, validating, and merging the optional `memories.toml` that
//! lives in the web root next to the manifest. User values are layered on top
//! of the stock defaults, so a config file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! media_dir = "memories"        # Media folder, relative to the web root
//! manifest = "memories.json"    # Manifest file, relative to the web root
//! optimized_dir = "optimized"   # Transcoded images, relative to media_dir
//!
//! [optimize]
//! max_width = 1920              # Bounding box for transcoded images
//! max_height = 1080
//! quality = 80                  # AVIF quality (1-100)
//!
//! [slideshow]
//! auto_advance_ms = 5000        # Delay between automatic advances
//! swipe_threshold_px = 50       # Minimum horizontal travel for a swipe
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the config file looked up in the web root.
pub const CONFIG_FILENAME: &str = "memories.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `memories.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoriesConfig {
    /// Media folder name under the web root. Also the first URL segment.
    pub media_dir: String,
    /// Manifest file name under the web root.
    pub manifest: String,
    /// Subfolder of `media_dir` that receives transcoded images.
    pub optimized_dir: String,
    /// Transcoding settings.
    pub optimize: OptimizeConfig,
    /// Runtime slideshow settings.
    pub slideshow: SlideshowConfig,
}

impl Default for MemoriesConfig {
    fn default() -> Self {
        Self {
            media_dir: "memories".to_string(),
            manifest: "memories.json".to_string(),
            optimized_dir: "optimized".to_string(),
            optimize: OptimizeConfig::default(),
            slideshow: SlideshowConfig::default(),
        }
    }
}

impl MemoriesConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("media_dir", &self.media_dir),
            ("manifest", &self.manifest),
            ("optimized_dir", &self.optimized_dir),
        ] {
            if !is_plain_segment(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single path segment, got {value:?}"
                )));
            }
        }
        if self.optimize.quality == 0 || self.optimize.quality > 100 {
            return Err(ConfigError::Validation(
                "optimize.quality must be 1-100".into(),
            ));
        }
        if self.optimize.max_width == 0 || self.optimize.max_height == 0 {
            return Err(ConfigError::Validation(
                "optimize.max_width and optimize.max_height must be non-zero".into(),
            ));
        }
        if self.slideshow.auto_advance_ms == 0 {
            return Err(ConfigError::Validation(
                "slideshow.auto_advance_ms must be non-zero".into(),
            ));
        }
        let threshold = self.slideshow.swipe_threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::Validation(format!(
                "slideshow.swipe_threshold_px must be a non-negative number, got {threshold}"
            )));
        }
        Ok(())
    }
}

fn is_plain_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
}

/// Transcoding settings for the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizeConfig {
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// AVIF encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: 80,
        }
    }
}

/// Slideshow runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    /// Milliseconds between automatic advances.
    pub auto_advance_ms: u64,
    /// Horizontal travel, in pixels, a touch must exceed to count as a swipe.
    pub swipe_threshold_px: f64,
}

impl SlideshowConfig {
    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 5000,
            swipe_threshold_px: 50.0,
        }
    }
}

/// Where everything lives on disk and under which URL it is served.
///
/// The web root is served at `/`, so a file at `<root>/memories/a.jpg` has the
/// URL `/memories/a.jpg`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaLayout {
    pub web_root: PathBuf,
    pub media_dir: PathBuf,
    pub optimized_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// URL prefix of original media, without trailing slash.
    pub media_url: String,
    /// URL prefix of transcoded images, without trailing slash.
    pub optimized_url: String,
    /// Root-relative URL of the manifest.
    pub manifest_url: String,
}

impl MediaLayout {
    pub fn new(web_root: &Path, config: &MemoriesConfig) -> Self {
        let media_dir = web_root.join(&config.media_dir);
        let media_url = format!("/{}", config.media_dir);
        Self {
            web_root: web_root.to_path_buf(),
            optimized_dir: media_dir.join(&config.optimized_dir),
            media_dir,
            manifest_path: web_root.join(&config.manifest),
            optimized_url: format!("{}/{}", media_url, config.optimized_dir),
            media_url,
            manifest_url: format!("/{}", config.manifest),
        }
    }

    /// URL of an original file in the media folder.
    pub fn original_url(&self, filename: &str) -> String {
        format!("{}/{}", self.media_url, filename)
    }

    /// URL of a transcoded file in the optimized folder.
    pub fn optimized_file_url(&self, filename: &str) -> String {
        format!("{}/{}", self.optimized_url, filename)
    }

    /// True if `url` points at something under the media base URL.
    pub fn is_media_url(&self, url: &str) -> bool {
        url.strip_prefix(&self.media_url)
            .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MemoriesConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `memories.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MemoriesConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MemoriesConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `memories.toml` in the web root, falling back to defaults.
pub fn load_config(root: &Path) -> Result<MemoriesConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `memories.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# memories configuration
# ======================
# All settings are optional. Values shown below are the defaults.
# Place this file in the web root (next to memories.json).
# Unknown keys will cause an error.

# Media folder, relative to the web root. Also the URL prefix (/memories/...).
media_dir = "memories"

# Manifest written by `scan` / `optimize` and read by the slideshow.
manifest = "memories.json"

# Subfolder of media_dir that receives transcoded images.
optimized_dir = "optimized"

# ---------------------------------------------------------------------------
# Image optimization
# ---------------------------------------------------------------------------
[optimize]
# Images are shrunk to fit inside this box. Smaller images are never upscaled.
max_width = 1920
max_height = 1080

# AVIF encoding quality (1 = worst, 100 = best).
quality = 80

# ---------------------------------------------------------------------------
# Slideshow
# ---------------------------------------------------------------------------
[slideshow]
# Milliseconds between automatic advances. Manual navigation restarts the delay.
auto_advance_ms = 5000

# Horizontal travel (pixels) a touch must exceed to count as a swipe.
swipe_threshold_px = 50.0
"##
}
