//! Configuration file support for passport-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/passport-qa/config.toml` (lowest priority)
//! - Project-local: `.passport-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use passport_qa_core::ValidationConfig;
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Required photo format.
    pub photo: PhotoConfig,
    /// Head size and position thresholds.
    pub geometry: GeometryConfig,
    /// Background whiteness settings.
    pub background: BackgroundConfig,
    /// Lighting thresholds.
    pub lighting: LightingConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Photo format configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Required side length in pixels.
    pub size: Option<u32>,
}

/// Head geometry configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Lowest accepted head ratio.
    pub head_ratio_min: Option<f64>,
    /// Highest accepted head ratio.
    pub head_ratio_max: Option<f64>,
    /// Maximum nose offset as a fraction of width.
    pub centering_tolerance: Option<f64>,
}

/// Background configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Minimum fraction of near-white border pixels.
    pub whiteness_threshold: Option<f64>,
    /// Border band width as a fraction of the short side.
    pub border_fraction: Option<f64>,
    /// Minimum channel value of a near-white pixel.
    pub near_white_level: Option<u8>,
    /// Maximum channel spread of a near-white pixel.
    pub near_white_max_spread: Option<u8>,
}

/// Lighting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Lowest accepted mean luminance.
    pub luminance_min: Option<f64>,
    /// Highest accepted mean luminance.
    pub luminance_max: Option<f64>,
    /// Maximum fraction of clipped highlights.
    pub max_highlight_clip: Option<f64>,
    /// Maximum luminance variance in the shadow band.
    pub max_shadow_variance: Option<f64>,
    /// Highlight clip level (0-255).
    pub highlight_level: Option<u8>,
    /// Shadow clip level (0-255).
    pub shadow_level: Option<u8>,
    /// Percentile bounding the shadow band.
    pub shadow_percentile: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "jsonl", "json" or "text".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Include raw metrics.
    pub metrics: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/passport-qa/config.toml`
    /// 2. Project-local: `.passport-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            tracing::warn!("{e}");
        }

        config
    }

    /// Validation thresholds from defaults overlaid with file values.
    pub fn validation_config(&self) -> ValidationConfig {
        let mut c = ValidationConfig::default();
        let set = |slot: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *slot = v;
            }
        };

        if let Some(size) = self.photo.size {
            c.size = size;
        }

        set(&mut c.head_ratio_min, self.geometry.head_ratio_min);
        set(&mut c.head_ratio_max, self.geometry.head_ratio_max);
        set(&mut c.centering_tolerance, self.geometry.centering_tolerance);

        set(&mut c.whiteness_threshold, self.background.whiteness_threshold);
        set(&mut c.border_fraction, self.background.border_fraction);
        c.near_white_level = self.background.near_white_level.unwrap_or(c.near_white_level);
        c.near_white_max_spread = self
            .background
            .near_white_max_spread
            .unwrap_or(c.near_white_max_spread);

        set(&mut c.luminance_min, self.lighting.luminance_min);
        set(&mut c.luminance_max, self.lighting.luminance_max);
        set(&mut c.max_highlight_clip, self.lighting.max_highlight_clip);
        set(&mut c.max_shadow_variance, self.lighting.max_shadow_variance);
        set(&mut c.shadow_percentile, self.lighting.shadow_percentile);
        c.highlight_level = self.lighting.highlight_level.unwrap_or(c.highlight_level);
        c.shadow_level = self.lighting.shadow_level.unwrap_or(c.shadow_level);

        c
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref f) = self.output.format {
            if !matches!(f.as_str(), "json" | "jsonl" | "text") {
                return Err(format!(
                    "output.format must be 'json', 'jsonl' or 'text', got '{f}'"
                ));
            }
        }

        self.validation_config()
            .validate()
            .map_err(|e| format!("invalid threshold in config file: {e}"))
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Photo
        self.photo.size = other.photo.size.or(self.photo.size);

        // Geometry
        let (g, og) = (&mut self.geometry, other.geometry);
        g.head_ratio_min = og.head_ratio_min.or(g.head_ratio_min);
        g.head_ratio_max = og.head_ratio_max.or(g.head_ratio_max);
        g.centering_tolerance = og.centering_tolerance.or(g.centering_tolerance);

        // Background
        let (b, ob) = (&mut self.background, other.background);
        b.whiteness_threshold = ob.whiteness_threshold.or(b.whiteness_threshold);
        b.border_fraction = ob.border_fraction.or(b.border_fraction);
        b.near_white_level = ob.near_white_level.or(b.near_white_level);
        b.near_white_max_spread = ob.near_white_max_spread.or(b.near_white_max_spread);

        // Lighting
        let (l, ol) = (&mut self.lighting, other.lighting);
        l.luminance_min = ol.luminance_min.or(l.luminance_min);
        l.luminance_max = ol.luminance_max.or(l.luminance_max);
        l.max_highlight_clip = ol.max_highlight_clip.or(l.max_highlight_clip);
        l.max_shadow_variance = ol.max_shadow_variance.or(l.max_shadow_variance);
        l.highlight_level = ol.highlight_level.or(l.highlight_level);
        l.shadow_level = ol.shadow_level.or(l.shadow_level);
        l.shadow_percentile = ol.shadow_percentile.or(l.shadow_percentile);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.metrics = other.output.metrics.or(self.output.metrics);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("passport-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.passport-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".passport-qa.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
