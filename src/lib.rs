//! gcview — Java GC log viewer.
//!
//! Parses a GC log (JDK 9+ unified logging or JDK 8 `PrintGCDetails`) and
//! writes a self-contained HTML page with two charts: heap occupancy around
//! each collection and pause time per collection.
//!
//! # Architecture
//!
//! ```text
//! gcview-core::parser ──► Vec<GcEvent> ──► gcview-render::render ──► HTML file
//! ```
//!
//! Everything runs once, synchronously, on the calling thread.

use std::path::PathBuf;

use anyhow::Context;

pub use gcview_core::{config::Config, GcEvent, LogFormat};
pub use gcview_render::{RenderConfig, RenderOutcome};

/// Inputs of one `gcview` invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub log_file: PathBuf,
    pub format: LogFormat,
    /// Overrides `[output] file` from the configuration.
    pub output: Option<PathBuf>,
    /// Extra configuration file layered over the defaults.
    pub config: Option<PathBuf>,
    /// Per-user configuration file. `None` leaves that layer out.
    pub user_config: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(log_file: impl Into<PathBuf>, format: LogFormat) -> Self {
        Self {
            log_file: log_file.into(),
            format,
            output: None,
            config: None,
            user_config: Some(gcview_core::config::user_config_path()),
        }
    }
}

/// Parse the log and render it. Returns [`RenderOutcome::NoData`] when the log
/// has no line matching the selected format.
pub fn run(options: &RunOptions) -> anyhow::Result<RenderOutcome> {
    let config = load_config(options)?;

    let events = gcview_core::parse_file(&options.log_file, options.format)?;
    tracing::debug!(events = events.len(), format = %options.format, "log parsed");

    let render_config = RenderConfig::new(
        options
            .output
            .clone()
            .unwrap_or_else(|| config.output.file.clone()),
    )
    .with_chart(config.chart);

    gcview_render::render(&events, &render_config)
        .with_context(|| format!("rendering {}", render_config.output.display()))
}

fn load_config(options: &RunOptions) -> anyhow::Result<Config> {
    let user = options.user_config.as_deref();
    match &options.config {
        Some(path) => Config::load(user, Some(path.as_path()))
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(Config::load(user, None).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring unreadable user configuration");
            Config::defaults()
        })),
    }
}
