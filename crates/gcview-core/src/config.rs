//! Configuration types for gcview.
//!
//! [`Config::load`] layers, in order: the embedded defaults, the user file
//! (normally [`user_config_path`], used only if present), and an explicit file
//! passed on the command line. [`Config::defaults`] returns the embedded defaults without
//! touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[chart]
width      = 800
height     = 400
point_size = 8.0
bar_width  = 0.01

[output]
file = "gc_analysis.html"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[chart]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    /// Width of each chart in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height of each chart in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Marker size in pixels for the heap scatter.
    #[serde(default = "default_point_size")]
    pub point_size: f64,
    /// Pause bar width in seconds of the shared time axis.
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 400 }
fn default_point_size() -> f64 { 8.0 }
fn default_bar_width() -> f64 { 0.01 }

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            point_size: default_point_size(),
            bar_width: default_bar_width(),
        }
    }
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// File the chart document is written to when `--output` is not given.
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
}

fn default_output_file() -> PathBuf { PathBuf::from("gc_analysis.html") }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit` must exist when given; the
    /// user file is optional and never created. `user: None` skips that layer.
    pub fn load(user: Option<&Path>, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = user {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/gcview/config.toml`, else `~/.config/gcview/config.toml`.
pub fn user_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("gcview")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
