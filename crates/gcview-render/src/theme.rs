//! Colour theme for the gcview charts.
//!
//! Themes are TOML files. The default theme is embedded in the binary via
//! [`include_str!`] so rendering works without any files on disk.

use config::{Config, File, FileFormat};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

/// Used when a theme names a colour that cannot be emitted safely.
const FALLBACK_COLOR: &str = "black";

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSeries {
    before: String,
    after: String,
    pause: String,
}

#[derive(Debug, Deserialize)]
struct RawAxes {
    line: String,
    grid: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    background: String,
    font: String,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    series: RawSeries,
    axes: RawAxes,
    page: RawPage,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Resolved chart colours. Every value is safe to drop into an SVG attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    /// Heap occupancy before collection.
    pub before: String,
    /// Heap occupancy after collection.
    pub after: String,
    /// Pause bars.
    pub pause: String,

    pub axis_line: String,
    pub grid_line: String,
    pub text: String,

    pub background: String,
    pub font: String,
}

impl ChartTheme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Parse a theme from a TOML string. Colours that are not plain names or
    /// hex values are replaced with black.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            before: color_or_fallback(&raw.series.before),
            after: color_or_fallback(&raw.series.after),
            pause: color_or_fallback(&raw.series.pause),
            axis_line: color_or_fallback(&raw.axes.line),
            grid_line: color_or_fallback(&raw.axes.grid),
            text: color_or_fallback(&raw.axes.text),
            background: color_or_fallback(&raw.page.background),
            font: raw
                .page
                .font
                .chars()
                .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | ',' | '-' | '_'))
                .collect(),
        })
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::load_default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn color_or_fallback(s: &str) -> String {
    parse_color(s).unwrap_or_else(|| FALLBACK_COLOR.to_string())
}

/// Accept a CSS colour name (`navy`, `darkgreen`) or hex RGB (`#rgb`,
/// `#rrggbb`). Anything else is rejected.
fn parse_color(s: &str) -> Option<String> {
    let s = s.trim();
    match s.strip_prefix('#') {
        Some(hex) if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            Some(s.to_ascii_lowercase())
        }
        Some(_) => None,
        None if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            Some(s.to_ascii_lowercase())
        }
        None => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
